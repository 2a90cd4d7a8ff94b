use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("admin password not set")]
    NotConfigured,

    #[error("Wrong password")]
    WrongPassword,

    #[error("session token generation failed: {0}")]
    TokenGeneration(String),
}

impl AuthError {
    /// Whether the failure is on the server side rather than the caller's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        !matches!(self, Self::WrongPassword)
    }
}

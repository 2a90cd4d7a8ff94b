//! Client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: the server was unreachable or the connection broke.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the body, or the raw body.
        message: String,
    },

    /// The success body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

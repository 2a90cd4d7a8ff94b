//! Session verifiers.
//!
//! In flag mode the cookie value `1` is the capability and the server keeps
//! no state. In token mode login issues a random token that the server
//! remembers until logout or until the session lifetime runs out.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use adm_config::SessionMode;

use crate::error::AuthError;

/// Cookie value that marks a flag-mode session as authenticated.
pub const FLAG_VALUE: &str = "1";

/// Number of random bytes in a session token.
const TOKEN_BYTES: usize = 32;

#[derive(Debug)]
pub enum SessionStore {
    Flag,
    Token {
        /// Issued tokens and when they were issued.
        tokens: Mutex<HashMap<String, Instant>>,
        lifetime: Duration,
    },
}

impl SessionStore {
    /// `lifetime` bounds token-mode sessions; flag mode ignores it.
    #[must_use]
    pub fn new(mode: SessionMode, lifetime: Duration) -> Self {
        match mode {
            SessionMode::Flag => Self::Flag,
            SessionMode::Token => Self::Token {
                tokens: Mutex::new(HashMap::new()),
                lifetime,
            },
        }
    }

    /// Start a session and return the cookie value for it.
    ///
    /// Expired tokens are dropped on the way.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenGeneration` if the OS random source fails.
    pub fn issue(&self) -> Result<String, AuthError> {
        match self {
            Self::Flag => Ok(FLAG_VALUE.to_string()),
            Self::Token { tokens, lifetime } => {
                let token = random_token()?;
                let now = Instant::now();
                let mut tokens = tokens.lock().unwrap_or_else(PoisonError::into_inner);
                tokens.retain(|_, issued| now.duration_since(*issued) < *lifetime);
                tokens.insert(token.clone(), now);
                Ok(token)
            }
        }
    }

    /// Whether a cookie value proves an active session.
    #[must_use]
    pub fn verify(&self, value: &str) -> bool {
        match self {
            Self::Flag => value == FLAG_VALUE,
            Self::Token { tokens, lifetime } => {
                let mut tokens = tokens.lock().unwrap_or_else(PoisonError::into_inner);
                let Some(issued) = tokens.get(value) else {
                    return false;
                };
                if issued.elapsed() < *lifetime {
                    return true;
                }
                tokens.remove(value);
                tracing::debug!("expired session token rejected");
                false
            }
        }
    }

    /// End the session behind `value`. A no-op in flag mode.
    pub fn revoke(&self, value: &str) {
        if let Self::Token { tokens, .. } = self {
            tokens
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(value);
        }
    }

    /// Number of live tokens held (always zero in flag mode).
    #[must_use]
    pub fn active_tokens(&self) -> usize {
        match self {
            Self::Flag => 0,
            Self::Token { tokens, .. } => {
                tokens.lock().unwrap_or_else(PoisonError::into_inner).len()
            }
        }
    }
}

fn random_token() -> Result<String, AuthError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| AuthError::TokenGeneration(e.to_string()))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

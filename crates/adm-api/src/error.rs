//! API error taxonomy and its HTTP status mapping.

use adm_auth::AuthError;
use adm_core::errors::CoreError;
use adm_db::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Identifier, field, status, or transition problem, or a missing row.
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error("Application {id} was modified since {expected}")]
    Conflict { id: String, expected: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Malformed request body or parameter.
    #[error("{0}")]
    BadRequest(String),

    /// The store rejected the operation; carries its message.
    #[error("{0}")]
    Store(String),

    #[error("Not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    /// The listener could not be started or failed while serving.
    #[error("server error: {0}")]
    Server(String),
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Domain(core) => Self::Domain(core),
            DatabaseError::Conflict { id, expected } => Self::Conflict { id, expected },
            other => Self::Store(other.to_string()),
        }
    }
}

impl ApiError {
    /// HTTP status code for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Domain(CoreError::NotFound { .. }) | Self::RouteNotFound => 404,
            Self::Domain(_) | Self::BadRequest(_) => 400,
            Self::Conflict { .. } => 409,
            Self::Auth(AuthError::WrongPassword) => 401,
            Self::MethodNotAllowed => 405,
            Self::PayloadTooLarge { .. } => 413,
            Self::Auth(_) | Self::Store(_) | Self::Server(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        assert_eq!(
            ApiError::from(CoreError::InvalidIdentifier("{uuid}".into())).status(),
            400
        );
        assert_eq!(ApiError::from(CoreError::missing("status")).status(), 400);
        assert_eq!(
            ApiError::from(CoreError::UnknownStatus("Pending".into())).status(),
            400
        );
        assert_eq!(
            ApiError::from(CoreError::application_not_found("app-1")).status(),
            404
        );
    }

    #[test]
    fn store_failures_keep_their_message() {
        let err = ApiError::from(DatabaseError::Query("disk I/O error".into()));
        assert_eq!(err.status(), 500);
        assert_eq!(err.to_string(), "Query failed: disk I/O error");
    }

    #[test]
    fn conflict_and_auth_statuses() {
        let conflict = ApiError::from(DatabaseError::Conflict {
            id: "app-1".into(),
            expected: "2026-03-01T00:00:00.000Z".into(),
        });
        assert_eq!(conflict.status(), 409);
        assert_eq!(ApiError::from(AuthError::WrongPassword).status(), 401);
        assert_eq!(ApiError::from(AuthError::NotConfigured).status(), 500);
        assert_eq!(ApiError::PayloadTooLarge { limit: 16 }.status(), 413);
    }
}

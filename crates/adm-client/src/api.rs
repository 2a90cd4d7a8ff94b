//! The operations the review views need from the server.

use std::future::Future;

use adm_core::entities::Application;
use adm_core::enums::ApplicationStatus;

use crate::error::ClientError;

/// Review API as seen by a client. [`crate::http::HttpReviewApi`] talks to a
/// real server; tests substitute an in-memory implementation.
pub trait ReviewApi {
    fn list_applications(&self) -> impl Future<Output = Result<Vec<Application>, ClientError>> + Send;

    fn get_application(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Application, ClientError>> + Send;

    fn patch_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> impl Future<Output = Result<Application, ClientError>> + Send;
}

//! `/api/applications` handlers.

use adm_core::entities::NewApplication;
use adm_core::errors::CoreError;
use adm_core::ids::validate_id;
use adm_core::responses::Envelope;
use adm_core::workflow::{check_transition, parse_requested};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::app::ReviewApp;
use crate::error::ApiError;
use crate::http::{ApiRequest, ApiResponse};

/// Every application, newest first, as `{ data: [...] }`.
pub async fn list(app: &ReviewApp) -> Result<ApiResponse, ApiError> {
    let rows = app.store().list_applications().await?;
    Ok(ApiResponse::json(200, &Envelope::data(rows)))
}

/// Public intake. Returns the stored row as `{ data: {...} }`.
pub async fn create(app: &ReviewApp, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let new: NewApplication = serde_json::from_slice(&req.body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))?;
    let created = app.store().create_application(new).await?;
    Ok(ApiResponse::json(200, &Envelope::data(created)))
}

pub async fn get(app: &ReviewApp, id: &str) -> Result<ApiResponse, ApiError> {
    let application = app.store().get_application(id).await?;
    Ok(ApiResponse::json(200, &application))
}

/// Change the status of one application.
///
/// Body: `{ "status": "...", "expected_updated_at"?: "..." }`. A body that is
/// not JSON is treated as empty, so it fails on the missing status.
pub async fn patch(app: &ReviewApp, id: &str, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let id = validate_id(id)?;
    let body: Value = serde_json::from_slice(&req.body).unwrap_or(Value::Null);

    let requested = match body.get("status") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(other) => return Err(CoreError::UnknownStatus(other.to_string()).into()),
    };
    let next = parse_requested(requested)?;
    let expected = parse_expected(body.get("expected_updated_at"))?;

    if app.policy().depends_on_current() {
        let current = app.store().get_application(id).await?;
        check_transition(id, current.status, next, app.policy())?;
    }

    let updated = match expected {
        Some(expected) => {
            app.store()
                .update_status_if_unmodified(id, next, expected)
                .await?
        }
        None => app.store().update_application_status(id, next).await?,
    };
    Ok(ApiResponse::json(200, &updated))
}

fn parse_expected(value: Option<&Value>) -> Result<Option<DateTime<Utc>>, ApiError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| ApiError::BadRequest(format!("Invalid expected_updated_at: {s}"))),
        Some(other) => Err(ApiError::BadRequest(format!(
            "Invalid expected_updated_at: {other}"
        ))),
    }
}

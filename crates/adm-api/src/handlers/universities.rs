use crate::app::ReviewApp;
use crate::error::ApiError;
use crate::http::ApiResponse;

pub async fn list(app: &ReviewApp) -> Result<ApiResponse, ApiError> {
    let universities = app.store().list_universities().await?;
    Ok(ApiResponse::json(200, &universities))
}

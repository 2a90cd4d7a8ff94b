//! `reqwest` implementation of [`ReviewApi`] plus the public intake calls.
//!
//! No timeout and no retry: each call is attempted once and its failure is
//! reported to the caller.

use adm_config::ClientConfig;
use adm_core::entities::{Application, NewApplication, University};
use adm_core::enums::ApplicationStatus;
use adm_core::responses::{OkResponse, error_message, unwrap_data};
use serde_json::{Value, json};

use crate::api::ReviewApi;
use crate::error::ClientError;

pub struct HttpReviewApi {
    client: reqwest::Client,
    base_url: String,
    cookie: Option<String>,
}

impl HttpReviewApi {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    /// Send this `Cookie` header with every request.
    #[must_use]
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn application_url(&self, id: &str) -> String {
        self.url(&format!("/api/applications/{}", urlencoding::encode(id)))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, ClientError> {
        let request = match &self.cookie {
            Some(cookie) => request.header(reqwest::header::COOKIE, cookie),
            None => request,
        };
        let resp = check_response(request.send().await?).await?;
        resp.json::<Value>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Submit a new application through the public intake.
    ///
    /// # Errors
    ///
    /// `ClientError` on transport failure or a non-success response.
    pub async fn create_application(&self, new: &NewApplication) -> Result<Application, ClientError> {
        let body = self
            .send(self.client.post(self.url("/api/applications")).json(new))
            .await?;
        decode(body)
    }

    /// # Errors
    ///
    /// `ClientError` on transport failure or a non-success response.
    pub async fn list_universities(&self) -> Result<Vec<University>, ClientError> {
        let body = self
            .send(self.client.get(self.url("/api/universities")))
            .await?;
        decode(body)
    }

    /// Log in and remember the session cookie for later calls.
    ///
    /// # Errors
    ///
    /// `ClientError::Api` with status 401 on a wrong password.
    pub async fn login(&mut self, password: &str) -> Result<OkResponse, ClientError> {
        let resp = self
            .client
            .post(self.url("/api/admin/login"))
            .json(&json!({ "password": password }))
            .send()
            .await?;
        let resp = check_response(resp).await?;
        if let Some(set_cookie) = resp
            .headers()
            .get(reqwest::header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            self.cookie = set_cookie.split(';').next().map(str::to_string);
        }
        let body = resp
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        decode(body)
    }
}

impl ReviewApi for HttpReviewApi {
    async fn list_applications(&self) -> Result<Vec<Application>, ClientError> {
        let body = self
            .send(self.client.get(self.url("/api/applications")))
            .await?;
        decode(body)
    }

    async fn get_application(&self, id: &str) -> Result<Application, ClientError> {
        let body = self.send(self.client.get(self.application_url(id))).await?;
        decode(body)
    }

    async fn patch_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> Result<Application, ClientError> {
        tracing::debug!(id, %status, "patching application status");
        let body = self
            .send(
                self.client
                    .patch(self.application_url(id))
                    .json(&json!({ "status": status })),
            )
            .await?;
        decode(body)
    }
}

/// Turn a non-success response into [`ClientError::Api`], preferring the
/// body's `error` field for the message.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|v| error_message(&v))
        .unwrap_or(text);
    Err(ClientError::Api { status, message })
}

fn decode<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, ClientError> {
    unwrap_data(body).map_err(|e| ClientError::Decode(e.to_string()))
}

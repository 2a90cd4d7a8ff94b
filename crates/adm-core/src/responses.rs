//! JSON response shapes shared by the server and the client.
//!
//! Successful list responses are wrapped as `{ "data": [...] }`; single-row
//! reads return the bare object. Clients must accept either form, so
//! [`unwrap_data`] accepts both.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Uniform `{ data?, error? }` wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub const fn data(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Body of the login/logout endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OkResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// Decode a success body that is either `{ "data": T }` or a bare `T`.
///
/// # Errors
///
/// Returns the `serde_json` error when the value matches neither shape.
pub fn unwrap_data<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, serde_json::Error> {
    match value {
        serde_json::Value::Object(mut map) if map.contains_key("data") => {
            let data = map.remove("data").unwrap_or(serde_json::Value::Null);
            serde_json::from_value(data)
        }
        other => serde_json::from_value(other),
    }
}

/// Extract the `error` message from a failure body, if there is one.
#[must_use]
pub fn error_message(value: &serde_json::Value) -> Option<String> {
    value
        .get("error")
        .and_then(serde_json::Value::as_str)
        .map(String::from)
}

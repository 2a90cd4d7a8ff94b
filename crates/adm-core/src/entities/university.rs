use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A partner university an applicant can apply to. Read-only reference data.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct University {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub tag: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

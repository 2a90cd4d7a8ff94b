//! Review client configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the review API (scheme, host, port; no trailing `/api`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

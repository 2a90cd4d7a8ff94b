//! HTTP listener configuration.

use serde::{Deserialize, Serialize};

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address the review API listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

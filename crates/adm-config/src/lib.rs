//! # adm-config
//!
//! Layered configuration loading for the admissions review service using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ADMISSIONS_*` prefix, `__` as separator)
//! 2. Project-level `admissions.toml`
//! 3. User-level `~/.config/admissions/config.toml`
//! 4. Built-in defaults
//!
//! The loaded [`AdmConfig`] is constructed once at startup and handed to each
//! collaborator (store, session gate, API, client). Nothing reads the process
//! environment after that.
//!
//! # Environment Variable Mapping
//!
//! `ADMISSIONS_AUTH__ADMIN_PASSWORD` -> `auth.admin_password`,
//! `ADMISSIONS_DATABASE__PATH` -> `database.path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use adm_config::AdmConfig;
//!
//! let config = AdmConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind_addr);
//! ```

mod auth;
mod client;
mod database;
mod error;
mod server;
mod workflow;

pub use auth::{AuthConfig, SessionMode};
pub use client::ClientConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use server::ServerConfig;
pub use workflow::WorkflowConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "admissions.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdmConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

impl AdmConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("ADMISSIONS_").split("__"))
    }

    /// Reject values that would make the gate or the server misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, path) in [
            ("auth.protected_prefix", &self.auth.protected_prefix),
            ("auth.login_path", &self.auth.login_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("'{path}' must start with '/'"),
                });
            }
        }
        if self.auth.is_protected_path(&self.auth.login_path) {
            return Err(ConfigError::InvalidValue {
                field: "auth.login_path".to_string(),
                reason: "login page cannot live under the protected prefix".to_string(),
            });
        }
        if self.auth.session_days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.session_days".to_string(),
                reason: "must be at least one day".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("admissions").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AdmConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.auth.is_configured());
        assert!(!config.database.is_remote());
        assert_eq!(config.server.bind_addr, "127.0.0.1:3000");
    }

    #[test]
    fn login_under_protected_prefix_is_rejected() {
        let mut config = AdmConfig::default();
        config.auth.login_path = "/admin/login".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "auth.login_path"
        ));
    }

    #[test]
    fn login_beside_protected_prefix_is_accepted() {
        let mut config = AdmConfig::default();
        config.auth.login_path = "/admin-login".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn relative_prefix_is_rejected() {
        let mut config = AdmConfig::default();
        config.auth.protected_prefix = "admin".into();
        assert!(config.validate().is_err());
    }
}

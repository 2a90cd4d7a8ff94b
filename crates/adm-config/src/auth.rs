//! Staff session configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the session cookie proves the caller is staff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// The cookie value `1` is itself the capability.
    #[default]
    Flag,
    /// The cookie carries an opaque token issued at login and checked
    /// against a server-side registry.
    Token,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flag => "flag",
            Self::Token => "token",
        })
    }
}

fn default_cookie_name() -> String {
    "admin_authed".to_string()
}

const fn default_session_days() -> u64 {
    7
}

fn default_protected_prefix() -> String {
    "/admin".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Shared staff secret checked at login.
    #[serde(default)]
    pub admin_password: String,

    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session cookie lifetime in days.
    #[serde(default = "default_session_days")]
    pub session_days: u64,

    /// Path prefix the session gate protects.
    #[serde(default = "default_protected_prefix")]
    pub protected_prefix: String,

    /// Login page path (always reachable).
    #[serde(default = "default_login_path")]
    pub login_path: String,

    #[serde(default)]
    pub mode: SessionMode,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_password: String::new(),
            cookie_name: default_cookie_name(),
            session_days: default_session_days(),
            protected_prefix: default_protected_prefix(),
            login_path: default_login_path(),
            mode: SessionMode::default(),
        }
    }
}

impl AuthConfig {
    /// Whether a staff password has been set.
    pub fn is_configured(&self) -> bool {
        !self.admin_password.is_empty()
    }

    /// Whether `path` is the protected root or lies below it. Matches whole
    /// path segments, so `/administrator` is outside `/admin`.
    pub fn is_protected_path(&self, path: &str) -> bool {
        let prefix = self.protected_prefix.trim_end_matches('/');
        path == prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Cookie `Max-Age` in seconds.
    pub const fn session_max_age_secs(&self) -> u64 {
        self.session_days * 24 * 60 * 60
    }
}

//! Session gate for the protected review area.
//!
//! Decides, per request, whether a path may be served or must bounce to the
//! login page. Also owns login and logout so the cookie contract lives in
//! one place.

use std::time::Duration;

use adm_config::AuthConfig;
use subtle::ConstantTimeEq;

use crate::cookie;
use crate::error::AuthError;
use crate::session::SessionStore;

/// Path prefixes that are never gated: framework assets and the JSON API.
pub const PUBLIC_PREFIXES: &[&str] = &["/_next", "/favicon", "/static", "/assets", "/api"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    /// Send the caller to this location (login page with `next`).
    Redirect(String),
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login {
    /// `Set-Cookie` header value.
    pub set_cookie: String,
    /// Where the browser should go next.
    pub redirect: String,
}

pub struct SessionGate {
    config: AuthConfig,
    sessions: SessionStore,
}

impl SessionGate {
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        let lifetime = Duration::from_secs(config.session_max_age_secs());
        let sessions = SessionStore::new(config.mode, lifetime);
        Self { config, sessions }
    }

    #[must_use]
    pub const fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Login page and asset/API paths.
    #[must_use]
    pub fn is_public(&self, path: &str) -> bool {
        path == self.config.login_path || PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p))
    }

    /// The protected root itself or anything below it.
    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        self.config.is_protected_path(path)
    }

    /// Whether the `Cookie` header carries a valid session.
    #[must_use]
    pub fn is_authenticated(&self, cookie_header: Option<&str>) -> bool {
        cookie_header
            .and_then(|h| cookie::find(h, &self.config.cookie_name))
            .is_some_and(|value| self.sessions.verify(value))
    }

    /// Evaluate one request.
    ///
    /// `query` is the raw query string without the leading `?`.
    #[must_use]
    pub fn check(&self, path: &str, query: Option<&str>, cookie_header: Option<&str>) -> GateDecision {
        if self.is_public(path) || !self.is_protected(path) {
            return GateDecision::Allow;
        }
        if self.is_authenticated(cookie_header) {
            return GateDecision::Allow;
        }
        tracing::debug!(path, "unauthenticated request redirected to login");
        GateDecision::Redirect(self.login_redirect(path, query))
    }

    /// Login page URL carrying the original path and query as `next`.
    #[must_use]
    pub fn login_redirect(&self, path: &str, query: Option<&str>) -> String {
        let original = match query {
            Some(q) if !q.is_empty() => format!("{path}?{q}"),
            _ => path.to_string(),
        };
        format!(
            "{}?next={}",
            self.config.login_path,
            urlencoding::encode(&original)
        )
    }

    /// Accept `next` only if it is a local absolute path; otherwise use the
    /// protected root.
    ///
    /// Browsers drop tab, CR and LF from URLs before parsing, so any control
    /// character disqualifies the value.
    #[must_use]
    pub fn safe_next(&self, next: Option<&str>) -> String {
        match next {
            Some(n) if is_local_path(n) => n.to_string(),
            _ => self.config.protected_prefix.clone(),
        }
    }

    /// Check the shared secret and start a session.
    ///
    /// # Errors
    ///
    /// `AuthError::NotConfigured` when no password is set,
    /// `AuthError::WrongPassword` on mismatch.
    pub fn login(&self, password: &str, next: Option<&str>) -> Result<Login, AuthError> {
        if !self.config.is_configured() {
            tracing::warn!("login attempted but no admin password is configured");
            return Err(AuthError::NotConfigured);
        }
        let matches: bool = password
            .as_bytes()
            .ct_eq(self.config.admin_password.as_bytes())
            .into();
        if !matches {
            tracing::warn!("login rejected: wrong password");
            return Err(AuthError::WrongPassword);
        }

        let value = self.sessions.issue()?;
        tracing::info!(mode = %self.config.mode, "staff session started");
        Ok(Login {
            set_cookie: cookie::session(
                &self.config.cookie_name,
                &value,
                self.config.session_max_age_secs(),
            ),
            redirect: self.safe_next(next),
        })
    }

    /// End the caller's session. Returns the expiring `Set-Cookie` value.
    #[must_use]
    pub fn logout(&self, cookie_header: Option<&str>) -> String {
        if let Some(value) = cookie_header.and_then(|h| cookie::find(h, &self.config.cookie_name)) {
            self.sessions.revoke(value);
        }
        tracing::info!("staff session ended");
        cookie::expired(&self.config.cookie_name)
    }
}

fn is_local_path(next: &str) -> bool {
    !next.chars().any(|c| c.is_ascii_control())
        && next.starts_with('/')
        && !next.starts_with("//")
        && !next.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn gate() -> SessionGate {
        SessionGate::new(AuthConfig {
            admin_password: "s3cret".into(),
            ..AuthConfig::default()
        })
    }

    #[rstest]
    #[case("/admin", true)]
    #[case("/admin/app-1", true)]
    #[case("/administrator", false)]
    #[case("/", false)]
    #[case("/login", false)]
    fn protected_paths(#[case] path: &str, #[case] protected: bool) {
        assert_eq!(gate().is_protected(path), protected);
    }

    #[rstest]
    #[case(None, "/admin")]
    #[case(Some(""), "/admin")]
    #[case(Some("/admin/app-1?x=1"), "/admin/app-1?x=1")]
    #[case(Some("//evil.example"), "/admin")]
    #[case(Some("https://evil.example"), "/admin")]
    #[case(Some("/\\evil.example"), "/admin")]
    #[case(Some("/\t/evil.example"), "/admin")]
    #[case(Some("/\r\n/evil.example"), "/admin")]
    #[case(Some("/admin/app-1\n"), "/admin")]
    fn next_is_sanitized(#[case] next: Option<&str>, #[case] expected: &str) {
        assert_eq!(gate().safe_next(next), expected);
    }

    #[test]
    fn login_never_redirects_through_control_characters() {
        let login = gate().login("s3cret", Some("/\t/evil.example")).unwrap();
        assert_eq!(login.redirect, "/admin");
    }

    #[test]
    fn redirect_keeps_query() {
        assert_eq!(
            gate().login_redirect("/admin", Some("status=Approved&q=li")),
            "/login?next=%2Fadmin%3Fstatus%3DApproved%26q%3Dli"
        );
        assert_eq!(gate().login_redirect("/admin", None), "/login?next=%2Fadmin");
    }

    #[test]
    fn wrong_password_is_rejected() {
        assert!(matches!(
            gate().login("nope", None),
            Err(AuthError::WrongPassword)
        ));
        assert!(matches!(
            gate().login("s3cret-and-more", None),
            Err(AuthError::WrongPassword)
        ));
    }

    #[test]
    fn missing_password_is_a_server_error() {
        let gate = SessionGate::new(AuthConfig::default());
        let err = gate.login("anything", None).unwrap_err();
        assert!(matches!(err, AuthError::NotConfigured));
        assert!(err.is_server_error());
        assert_eq!(err.to_string(), "admin password not set");
    }
}

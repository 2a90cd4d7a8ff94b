//! Request router.
//!
//! `ReviewApp` owns every collaborator a request needs (store, session gate,
//! transition policy) and maps each request to exactly one response.

use adm_auth::{GateDecision, SessionGate};
use adm_config::AdmConfig;
use adm_core::enums::TransitionPolicy;
use adm_db::service::AdmService;

use crate::error::ApiError;
use crate::handlers::{applications, console, session, universities};
use crate::http::{ApiRequest, ApiResponse, Method};

pub struct ReviewApp {
    store: AdmService,
    gate: SessionGate,
    policy: TransitionPolicy,
}

impl ReviewApp {
    #[must_use]
    pub const fn new(store: AdmService, gate: SessionGate, policy: TransitionPolicy) -> Self {
        Self {
            store,
            gate,
            policy,
        }
    }

    /// Wire the app from loaded configuration and an opened store.
    #[must_use]
    pub fn from_config(config: &AdmConfig, store: AdmService) -> Self {
        Self::new(
            store,
            SessionGate::new(config.auth.clone()),
            config.workflow.policy,
        )
    }

    #[must_use]
    pub const fn store(&self) -> &AdmService {
        &self.store
    }

    #[must_use]
    pub const fn gate(&self) -> &SessionGate {
        &self.gate
    }

    #[must_use]
    pub const fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Handle one request. Never fails: every error becomes a response.
    pub async fn handle(&self, req: ApiRequest) -> ApiResponse {
        if let GateDecision::Redirect(location) =
            self.gate
                .check(&req.path, req.query.as_deref(), req.cookie.as_deref())
        {
            return ApiResponse::redirect(302, &location);
        }

        let response = match self.route(&req).await {
            Ok(response) => response,
            Err(error) => ApiResponse::error(&error),
        };
        tracing::debug!(path = %req.path, status = response.status, "request handled");
        response
    }

    async fn route(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let config = self.gate.config();
        if req.path == config.login_path {
            return match req.method {
                Method::Get => Ok(session::login_page(self, req)),
                Method::Post => Ok(session::login_form(self, req)),
                _ => Err(ApiError::MethodNotAllowed),
            };
        }
        if let Some(rest) = console_subpath(&req.path, &config.protected_prefix) {
            if req.method != Method::Get {
                return Err(ApiError::MethodNotAllowed);
            }
            return match rest {
                "" => console::list(self, req).await,
                id if !id.contains('/') => console::detail(self, &decode_segment(id)).await,
                _ => Err(ApiError::RouteNotFound),
            };
        }

        let segments: Vec<&str> = req
            .path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match (req.method, segments.as_slice()) {
            (Method::Get, ["api", "applications"]) => applications::list(self).await,
            (Method::Post, ["api", "applications"]) => applications::create(self, req).await,
            (Method::Get, ["api", "applications", id]) => {
                applications::get(self, &decode_segment(id)).await
            }
            (Method::Patch, ["api", "applications", id]) => {
                applications::patch(self, &decode_segment(id), req).await
            }
            (Method::Get, ["api", "universities"]) => universities::list(self).await,
            (Method::Post, ["api", "admin", "login"]) => session::api_login(self, req),
            (Method::Post, ["api", "admin", "logout"] | ["api", "logout"]) => {
                Ok(session::logout(self, req))
            }
            (
                _,
                ["api", "applications" | "universities"]
                | ["api", "applications", _]
                | ["api", "admin", "login" | "logout"]
                | ["api", "logout"],
            ) => Err(ApiError::MethodNotAllowed),
            _ => Err(ApiError::RouteNotFound),
        }
    }
}

/// Remainder of `path` below the console root, without surrounding slashes.
fn console_subpath<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix.trim_end_matches('/'))?;
    (rest.is_empty() || rest.starts_with('/')).then(|| rest.trim_matches('/'))
}

/// Percent-decode a path segment so `%7Buuid%7D` is validated as `{uuid}`.
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment).map_or_else(|_| segment.to_string(), std::borrow::Cow::into_owned)
}

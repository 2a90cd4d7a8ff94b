//! Login and logout, as JSON endpoints and as the HTML login form.

use adm_core::responses::OkResponse;
use serde::Deserialize;

use crate::app::ReviewApp;
use crate::error::ApiError;
use crate::handlers::console::{escape, page};
use crate::http::{ApiRequest, ApiResponse};

#[derive(Debug, Default, Deserialize)]
struct LoginBody {
    #[serde(default)]
    password: String,
    #[serde(default)]
    next: Option<String>,
}

/// `POST /api/admin/login` with `{ "password": "..." }`.
pub fn api_login(app: &ReviewApp, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let body: LoginBody = serde_json::from_slice(&req.body).unwrap_or_default();
    let login = app.gate().login(&body.password, body.next.as_deref())?;
    let ok = OkResponse {
        ok: true,
        redirect: Some(login.redirect),
    };
    Ok(ApiResponse::json(200, &ok).with_header("Set-Cookie", login.set_cookie))
}

/// Both logout endpoints. Always succeeds.
pub fn logout(app: &ReviewApp, req: &ApiRequest) -> ApiResponse {
    let expired = app.gate().logout(req.cookie.as_deref());
    let ok = OkResponse {
        ok: true,
        redirect: None,
    };
    ApiResponse::json(200, &ok).with_header("Set-Cookie", expired)
}

/// `GET /login?next=...`.
pub fn login_page(app: &ReviewApp, req: &ApiRequest) -> ApiResponse {
    let next = app.gate().safe_next(req.query_param("next").as_deref());
    ApiResponse::html(200, render_login(app, &next, None))
}

/// `POST /login` from the HTML form. Redirects on success, re-renders the
/// form with the error otherwise.
pub fn login_form(app: &ReviewApp, req: &ApiRequest) -> ApiResponse {
    let password = req.form_field("password").unwrap_or_default();
    let next = req.form_field("next");
    match app.gate().login(&password, next.as_deref()) {
        Ok(login) => {
            ApiResponse::redirect(303, &login.redirect).with_header("Set-Cookie", login.set_cookie)
        }
        Err(error) => {
            let error = ApiError::from(error);
            tracing::warn!(%error, "login form rejected");
            let next = app.gate().safe_next(next.as_deref());
            ApiResponse::html(
                error.status(),
                render_login(app, &next, Some(&error.to_string())),
            )
        }
    }
}

fn render_login(app: &ReviewApp, next: &str, error: Option<&str>) -> String {
    let error = error.map_or_else(String::new, |e| {
        format!(r#"<p class="error">{}</p>"#, escape(e))
    });
    page(
        "Staff login",
        &format!(
            r#"<h1>Staff login</h1>
{error}
<form method="post" action="{action}">
  <input type="hidden" name="next" value="{next}">
  <label>Password <input type="password" name="password" autofocus></label>
  <button type="submit">Sign in</button>
</form>"#,
            action = escape(&app.gate().config().login_path),
            next = escape(next),
        ),
    )
}

//! Server-rendered staff console: the review list and the detail page.
//!
//! Both pages sit behind the session gate. Status changes from the detail
//! page go through the JSON API, so the same workflow rules apply.

use adm_core::entities::Application;
use adm_core::enums::ApplicationStatus;
use adm_core::search::{ApplicationQuery, StatusFilter};

use crate::app::ReviewApp;
use crate::error::ApiError;
use crate::http::{ApiRequest, ApiResponse};

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem;color:#1f2933}\
table{border-collapse:collapse;width:100%}th,td{padding:.4rem .6rem;border-bottom:1px solid #e4e7eb;text-align:left}\
.error{color:#b42318}.muted{color:#7b8794}dt{font-weight:600}dd{margin:0 0 .6rem}";

/// Escape text for HTML element content and quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Wrap `body` in the shared page layout.
#[must_use]
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{}</title><style>{STYLE}</style></head>\n<body>\n{body}\n</body></html>\n",
        escape(title)
    )
}

/// `GET /admin?q=...&status=...`.
pub async fn list(app: &ReviewApp, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let search = req.query_param("q").unwrap_or_default();
    let status: StatusFilter = req
        .query_param("status")
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();
    let query = ApplicationQuery::new(search, status);

    let rows = app.store().list_applications().await?;
    let visible = query.apply(&rows);

    let mut table = String::new();
    for application in &visible {
        table.push_str(&row_html(app, application));
    }
    if visible.is_empty() {
        table.push_str(r#"<tr><td colspan="5" class="muted">No applications match.</td></tr>"#);
    }

    let body = format!(
        r#"<h1>Applications</h1>
<form method="get">
  <input type="search" name="q" value="{q}" placeholder="Search name, email, university...">
  <select name="status">{options}</select>
  <button type="submit">Filter</button>
</form>
<p class="muted">Showing {showing} of {total}</p>
<table>
<thead><tr><th>Name</th><th>University</th><th>Email</th><th>Status</th><th>Submitted</th></tr></thead>
<tbody>
{table}
</tbody>
</table>
{logout}"#,
        q = escape(&query.search),
        options = filter_options(query.status),
        showing = visible.len(),
        total = rows.len(),
        logout = logout_button(),
    );
    Ok(ApiResponse::html(200, page("Applications", &body)))
}

/// `GET /admin/{id}`.
pub async fn detail(app: &ReviewApp, id: &str) -> Result<ApiResponse, ApiError> {
    let application = match app.store().get_application(id).await {
        Ok(application) => application,
        Err(error) => {
            let error = ApiError::from(error);
            let body = format!(
                r#"<h1>Application</h1><p class="error">{}</p><p><a href="{}">Back to list</a></p>"#,
                escape(&error.to_string()),
                escape(&app.gate().config().protected_prefix),
            );
            return Ok(ApiResponse::html(error.status(), page("Application", &body)));
        }
    };

    let fields = [
        ("Status", Some(application.status.as_str())),
        ("Email", application.email.as_deref()),
        ("WhatsApp", application.whatsapp.as_deref()),
        ("University", application.university_name.as_deref()),
        ("Nationality", application.nationality.as_deref()),
        ("Current country", application.current_country.as_deref()),
        ("Degree", application.degree.as_deref()),
        ("Current major", application.majors.as_deref()),
        ("Preferred major 1", application.china_major_1.as_deref()),
        ("Preferred major 2", application.china_major_2.as_deref()),
        ("Preferred major 3", application.china_major_3.as_deref()),
    ];
    let mut list = String::new();
    for (label, value) in fields {
        list.push_str(&format!(
            "<dt>{label}</dt><dd>{}</dd>",
            value.map_or_else(|| "<span class=\"muted\">-</span>".to_string(), escape)
        ));
    }

    let body = format!(
        r#"<p><a href="{back}">Back to list</a></p>
<h1>{name}</h1>
<p class="muted">Submitted {created} &middot; updated <span id="updated">{updated}</span></p>
<dl>{list}</dl>
<label>Change status <select id="status">{options}</select></label>
<p id="message" class="error"></p>
<script>
document.getElementById("status").addEventListener("change", async (event) => {{
  const res = await fetch("/api/applications/{id}", {{
    method: "PATCH",
    headers: {{ "Content-Type": "application/json" }},
    body: JSON.stringify({{ status: event.target.value }}),
  }});
  if (!res.ok) {{
    const body = await res.json().catch(() => ({{}}));
    alert(body.error || "Update failed");
  }}
  location.reload();
}});
</script>
{logout}"#,
        back = escape(&app.gate().config().protected_prefix),
        name = escape(&application.full_name),
        created = application.created_at.to_rfc3339(),
        updated = application.updated_at.to_rfc3339(),
        id = urlencoding::encode(&application.id),
        options = status_options(application.status),
        logout = logout_button(),
    );
    Ok(ApiResponse::html(200, page(&application.full_name, &body)))
}

fn row_html(app: &ReviewApp, application: &Application) -> String {
    let href = format!(
        "{}/{}",
        app.gate().config().protected_prefix.trim_end_matches('/'),
        urlencoding::encode(&application.id)
    );
    format!(
        r#"<tr><td><a href="{href}">{name}</a></td><td>{university}</td><td>{email}</td><td>{status}</td><td>{created}</td></tr>
"#,
        href = escape(&href),
        name = escape(&application.full_name),
        university = escape(application.university_name.as_deref().unwrap_or("")),
        email = escape(application.email.as_deref().unwrap_or("")),
        status = application.status,
        created = application.created_at.format("%Y-%m-%d %H:%M"),
    )
}

fn filter_options(selected: StatusFilter) -> String {
    std::iter::once(StatusFilter::All)
        .chain(ApplicationStatus::ALL.into_iter().map(StatusFilter::Only))
        .map(|filter| option(&filter.to_string(), filter == selected))
        .collect()
}

fn status_options(selected: ApplicationStatus) -> String {
    ApplicationStatus::ALL
        .into_iter()
        .map(|status| option(status.as_str(), status == selected))
        .collect()
}

fn option(value: &str, selected: bool) -> String {
    let selected = if selected { " selected" } else { "" };
    format!(r#"<option value="{value}"{selected}>{value}</option>"#)
}

fn logout_button() -> &'static str {
    r#"<p><button onclick="fetch('/api/admin/logout',{method:'POST'}).then(()=>location.href='/login')">Log out</button></p>"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn filter_options_mark_selection() {
        let html = filter_options(StatusFilter::Only(ApplicationStatus::Approved));
        assert!(html.contains(r#"<option value="Approved" selected>"#));
        assert!(html.contains(r#"<option value="ALL">"#));
    }
}

//! Search and status filtering over the application list.
//!
//! The computation is purely local: it never talks to the store. The review
//! list recomputes the visible subset on every keystroke or filter change,
//! and the server-rendered console reuses the same rules.

use std::fmt;
use std::str::FromStr;

use crate::entities::Application;
use crate::enums::ApplicationStatus;
use crate::errors::CoreError;

/// Status filter selected in the review list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, status: ApplicationStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    /// `"ALL"` (any case) or an empty string selects everything; anything else
    /// must be an exact status name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Only(status) => f.write_str(status.as_str()),
        }
    }
}

/// Search text plus status filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationQuery {
    pub search: String,
    pub status: StatusFilter,
}

impl ApplicationQuery {
    #[must_use]
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    /// Whether `app` passes both the status filter and the search text.
    #[must_use]
    pub fn matches(&self, app: &Application) -> bool {
        if !self.status.matches(app.status) {
            return false;
        }
        let keyword = self.search.trim().to_lowercase();
        keyword.is_empty() || search_blob(app).contains(&keyword)
    }

    /// Visible subset of `rows`, newest first.
    #[must_use]
    pub fn apply<'a>(&self, rows: &'a [Application]) -> Vec<&'a Application> {
        let mut visible: Vec<&Application> = rows.iter().filter(|app| self.matches(app)).collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        visible
    }
}

/// Lowercased concatenation of every non-empty textual field.
#[must_use]
pub fn search_blob(app: &Application) -> String {
    app.text_fields()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn app(id: &str, name: &str, status: ApplicationStatus, minutes: i64) -> Application {
        let created = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes);
        Application {
            id: id.into(),
            created_at: created,
            updated_at: created,
            status,
            university_name: Some("Fudan University".into()),
            full_name: name.into(),
            email: Some(format!("{id}@example.com")),
            whatsapp: None,
            nationality: Some("Kenya".into()),
            current_country: None,
            degree: Some("Bachelor".into()),
            majors: None,
            china_major_1: Some("Computer Science".into()),
            china_major_2: None,
            china_major_3: None,
        }
    }

    fn sample() -> Vec<Application> {
        vec![
            app("a1", "Grace Otieno", ApplicationStatus::Submitted, 0),
            app("a2", "Omar Haddad", ApplicationStatus::Reviewing, 10),
            app("a3", "Ana Souza", ApplicationStatus::Approved, 20),
            app("a4", "Kwame Mensah", ApplicationStatus::Rejected, 30),
        ]
    }

    fn ids(rows: &[&Application]) -> Vec<String> {
        rows.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn filter_selects_exact_status() {
        let rows = sample();
        for status in ApplicationStatus::ALL {
            let visible = ApplicationQuery::new("", StatusFilter::Only(status)).apply(&rows);
            assert_eq!(visible.len(), 1);
            assert_eq!(visible[0].status, status);
        }
    }

    #[test]
    fn all_filter_keeps_everything_newest_first() {
        let rows = sample();
        let visible = ApplicationQuery::default().apply(&rows);
        assert_eq!(ids(&visible), ["a4", "a3", "a2", "a1"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let rows = sample();
        let visible = ApplicationQuery::new("  oMAR ", StatusFilter::All).apply(&rows);
        assert_eq!(ids(&visible), ["a2"]);

        let visible = ApplicationQuery::new("fudan", StatusFilter::All).apply(&rows);
        assert_eq!(visible.len(), 4);
    }

    #[test]
    fn search_covers_status_text() {
        let rows = sample();
        let visible = ApplicationQuery::new("approved", StatusFilter::All).apply(&rows);
        assert_eq!(ids(&visible), ["a3"]);
    }

    #[test]
    fn search_and_filter_combine() {
        let rows = sample();
        let visible =
            ApplicationQuery::new("kenya", StatusFilter::Only(ApplicationStatus::Rejected)).apply(&rows);
        assert_eq!(ids(&visible), ["a4"]);
    }

    #[test]
    fn status_filter_parsing() {
        assert_eq!("ALL".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "Reviewing".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(ApplicationStatus::Reviewing)
        );
        assert!("reviewing".parse::<StatusFilter>().is_err());
    }
}

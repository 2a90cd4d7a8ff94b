//! Application repository: intake, lookup, listing, status writes.

use chrono::{DateTime, Utc};

use adm_core::entities::{Application, NewApplication};
use adm_core::enums::ApplicationStatus;
use adm_core::errors::CoreError;
use adm_core::ids::{PREFIX_APPLICATION, validate_id};
use adm_core::workflow::initial_status;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, parse_datetime, parse_status};
use crate::service::AdmService;

const SELECT_COLS: &str = "id, created_at, updated_at, status, university_name, full_name, email, \
     whatsapp, nationality, current_country, degree, majors, china_major_1, china_major_2, \
     china_major_3";

/// `updated_at` for a status write: the statement time, or one millisecond
/// past the stored value when the clock has not moved past it.
const NEXT_UPDATED_AT: &str = "CASE WHEN ?2 > updated_at THEN ?2 \
     ELSE strftime('%Y-%m-%dT%H:%M:%fZ', updated_at, '+0.001 seconds') END";

fn row_to_application(row: &libsql::Row) -> Result<Application, DatabaseError> {
    Ok(Application {
        id: row.get(0)?,
        created_at: parse_datetime(&row.get::<String>(1)?)?,
        updated_at: parse_datetime(&row.get::<String>(2)?)?,
        status: match get_opt_string(row, 3)? {
            Some(s) => parse_status(&s)?,
            None => ApplicationStatus::INITIAL,
        },
        university_name: get_opt_string(row, 4)?,
        full_name: row.get(5)?,
        email: get_opt_string(row, 6)?,
        whatsapp: get_opt_string(row, 7)?,
        nationality: get_opt_string(row, 8)?,
        current_country: get_opt_string(row, 9)?,
        degree: get_opt_string(row, 10)?,
        majors: get_opt_string(row, 11)?,
        china_major_1: get_opt_string(row, 12)?,
        china_major_2: get_opt_string(row, 13)?,
        china_major_3: get_opt_string(row, 14)?,
    })
}

impl AdmService {
    /// Persist a new submission and return the stored row.
    ///
    /// Status defaults to `Submitted`. A missing `full_name` is rejected by
    /// the schema and surfaces as a store failure.
    ///
    /// # Errors
    ///
    /// `Domain(UnknownStatus)` for a status outside the enumeration, or a
    /// store failure if the insert is rejected.
    pub async fn create_application(
        &self,
        new: NewApplication,
    ) -> Result<Application, DatabaseError> {
        let new = new.normalized();
        let status = initial_status(new.status.as_deref())?;
        let id = self.db().generate_id(PREFIX_APPLICATION).await?;
        let now = format_timestamp(Utc::now());

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "INSERT INTO applications (id, created_at, updated_at, status, university_name, full_name,
                         email, whatsapp, nationality, current_country, degree, majors,
                         china_major_1, china_major_2, china_major_3)
                     VALUES (?1, ?2, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
                     RETURNING {SELECT_COLS}"
                ),
                libsql::params![
                    id.as_str(),
                    now.as_str(),
                    status.as_str(),
                    new.university_name,
                    new.full_name,
                    new.email,
                    new.whatsapp,
                    new.nationality,
                    new.current_country,
                    new.degree,
                    new.majors,
                    new.china_major_1,
                    new.china_major_2,
                    new.china_major_3
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let application = row_to_application(&row)?;

        tracing::info!(id = %application.id, status = %application.status, "application created");
        Ok(application)
    }

    /// Fetch one application.
    ///
    /// # Errors
    ///
    /// `Domain(InvalidIdentifier)` before any query for a malformed id,
    /// `Domain(NotFound)` when no row matches.
    pub async fn get_application(&self, id: &str) -> Result<Application, DatabaseError> {
        let id = validate_id(id)?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM applications WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::application_not_found(id))?;
        tracing::debug!(id, "application loaded");
        row_to_application(&row)
    }

    /// Every application, newest first. Ties keep insertion order reversed.
    ///
    /// # Errors
    ///
    /// Returns a store failure if the query fails.
    pub async fn list_applications(&self) -> Result<Vec<Application>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM applications ORDER BY created_at DESC, rowid DESC"
                ),
                (),
            )
            .await?;

        let mut applications = Vec::new();
        while let Some(row) = rows.next().await? {
            applications.push(row_to_application(&row)?);
        }
        tracing::debug!(count = applications.len(), "applications listed");
        Ok(applications)
    }

    /// Set the status and refresh `updated_at` in one statement.
    ///
    /// `updated_at` always moves strictly forward, even when two writes land
    /// within the same millisecond.
    ///
    /// # Errors
    ///
    /// `Domain(InvalidIdentifier)`, `Domain(NotFound)`, or a store failure.
    pub async fn update_application_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> Result<Application, DatabaseError> {
        let id = validate_id(id)?;
        let now = format_timestamp(Utc::now());

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "UPDATE applications SET status = ?1, updated_at = {NEXT_UPDATED_AT}
                     WHERE id = ?3 RETURNING {SELECT_COLS}"
                ),
                libsql::params![status.as_str(), now.as_str(), id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::application_not_found(id))?;
        let application = row_to_application(&row)?;

        tracing::info!(id, status = %status, "application status updated");
        Ok(application)
    }

    /// Like [`Self::update_application_status`], but only if the stored
    /// `updated_at` still equals `expected_updated_at`.
    ///
    /// # Errors
    ///
    /// `Conflict` if the row changed since the caller read it,
    /// `Domain(NotFound)` if it does not exist, or a store failure.
    pub async fn update_status_if_unmodified(
        &self,
        id: &str,
        status: ApplicationStatus,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<Application, DatabaseError> {
        let id = validate_id(id)?;
        let now = format_timestamp(Utc::now());
        let expected = format_timestamp(expected_updated_at);

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "UPDATE applications SET status = ?1, updated_at = {NEXT_UPDATED_AT}
                     WHERE id = ?3 AND updated_at = ?4 RETURNING {SELECT_COLS}"
                ),
                libsql::params![status.as_str(), now.as_str(), id, expected.as_str()],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            let application = row_to_application(&row)?;
            tracing::info!(id, status = %status, "application status updated (conditional)");
            return Ok(application);
        }

        if self.application_exists(id).await? {
            tracing::warn!(id, expected = %expected, "conditional status update lost the race");
            Err(DatabaseError::Conflict {
                id: id.to_string(),
                expected,
            })
        } else {
            Err(CoreError::application_not_found(id).into())
        }
    }

    async fn application_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT 1 FROM applications WHERE id = ?1", [id])
            .await?;
        Ok(rows.next().await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn test_service() -> AdmService {
        AdmService::new_local(":memory:").await.unwrap()
    }

    fn submission(name: &str) -> NewApplication {
        NewApplication {
            full_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_defaults_to_submitted() {
        let svc = test_service().await;
        let app = svc.create_application(submission("Li Wei")).await.unwrap();
        assert_eq!(app.status, ApplicationStatus::Submitted);
        assert_eq!(app.created_at, app.updated_at);
        assert!(app.id.starts_with("app-"));
    }

    #[tokio::test]
    async fn create_keeps_supplied_status() {
        let svc = test_service().await;
        let app = svc
            .create_application(NewApplication {
                status: Some("Reviewing".into()),
                ..submission("Li Wei")
            })
            .await
            .unwrap();
        assert_eq!(app.status, ApplicationStatus::Reviewing);
    }

    #[tokio::test]
    async fn create_rejects_unknown_status_without_writing() {
        let svc = test_service().await;
        let err = svc
            .create_application(NewApplication {
                status: Some("Pending".into()),
                ..submission("Li Wei")
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Domain(CoreError::UnknownStatus(ref s)) if s == "Pending"
        ));
        assert!(svc.list_applications().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_full_name_is_a_store_failure() {
        let svc = test_service().await;
        let err = svc
            .create_application(NewApplication::default())
            .await
            .unwrap_err();
        assert!(err.is_store_failure(), "got {err:?}");
    }

    #[tokio::test]
    async fn status_update_advances_within_same_millisecond() {
        let svc = test_service().await;
        let app = svc.create_application(submission("Li Wei")).await.unwrap();

        svc.db()
            .conn()
            .execute(
                "UPDATE applications SET updated_at = '2999-01-01T00:00:00.000Z' WHERE id = ?1",
                [app.id.as_str()],
            )
            .await
            .unwrap();

        let updated = svc
            .update_application_status(&app.id, ApplicationStatus::Approved)
            .await
            .unwrap();
        assert_eq!(format_timestamp(updated.updated_at), "2999-01-01T00:00:00.001Z");
    }

    #[tokio::test]
    async fn conditional_update_reports_conflict_and_not_found() {
        let svc = test_service().await;
        let app = svc.create_application(submission("Li Wei")).await.unwrap();

        let first = svc
            .update_status_if_unmodified(&app.id, ApplicationStatus::Reviewing, app.updated_at)
            .await
            .unwrap();
        assert_eq!(first.status, ApplicationStatus::Reviewing);

        let stale = svc
            .update_status_if_unmodified(&app.id, ApplicationStatus::Approved, app.updated_at)
            .await
            .unwrap_err();
        assert!(matches!(stale, DatabaseError::Conflict { .. }));
        assert_eq!(
            svc.get_application(&app.id).await.unwrap().status,
            ApplicationStatus::Reviewing
        );

        let missing = svc
            .update_status_if_unmodified("app-missing", ApplicationStatus::Approved, app.updated_at)
            .await
            .unwrap_err();
        assert!(matches!(
            missing,
            DatabaseError::Domain(CoreError::NotFound { .. })
        ));
    }
}

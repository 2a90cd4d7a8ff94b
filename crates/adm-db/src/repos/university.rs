//! University repository. The catalog is reference data; the service only reads it.

use adm_core::entities::University;
use adm_core::ids::PREFIX_UNIVERSITY;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_optional_datetime};
use crate::service::AdmService;

const SELECT_COLS: &str = "id, name, city, tag, image_url, created_at";

fn row_to_university(row: &libsql::Row) -> Result<University, DatabaseError> {
    Ok(University {
        id: row.get(0)?,
        name: row.get(1)?,
        city: get_opt_string(row, 2)?,
        tag: get_opt_string(row, 3)?,
        image_url: get_opt_string(row, 4)?,
        created_at: parse_optional_datetime(get_opt_string(row, 5)?.as_deref())?,
    })
}

impl AdmService {
    /// Every university, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns a store failure if the query fails.
    pub async fn list_universities(&self) -> Result<Vec<University>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM universities ORDER BY name ASC"),
                (),
            )
            .await?;

        let mut universities = Vec::new();
        while let Some(row) = rows.next().await? {
            universities.push(row_to_university(&row)?);
        }
        tracing::debug!(count = universities.len(), "universities listed");
        Ok(universities)
    }

    /// Add a catalog entry. Used to seed reference data.
    ///
    /// # Errors
    ///
    /// Returns a store failure if the insert is rejected.
    pub async fn add_university(
        &self,
        name: &str,
        city: Option<&str>,
        tag: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<University, DatabaseError> {
        let id = self.db().generate_id(PREFIX_UNIVERSITY).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "INSERT INTO universities (id, name, city, tag, image_url)
                     VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {SELECT_COLS}"
                ),
                libsql::params![id.as_str(), name, city, tag, image_url],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let university = row_to_university(&row)?;
        tracing::info!(id = %university.id, name, "university added");
        Ok(university)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn universities_are_ordered_by_name() {
        let svc = AdmService::new_local(":memory:").await.unwrap();
        for name in ["Zhejiang University", "Fudan University", "Peking University"] {
            svc.add_university(name, Some("China"), None, None)
                .await
                .unwrap();
        }
        let names: Vec<_> = svc
            .list_universities()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(
            names,
            ["Fudan University", "Peking University", "Zhejiang University"]
        );
    }

    #[tokio::test]
    async fn created_at_is_filled_by_the_store() {
        let svc = AdmService::new_local(":memory:").await.unwrap();
        let uni = svc
            .add_university("Tongji University", Some("Shanghai"), Some("985"), None)
            .await
            .unwrap();
        assert!(uni.created_at.is_some());
        assert_eq!(uni.tag.as_deref(), Some("985"));
        assert_eq!(uni.image_url, None);
    }
}

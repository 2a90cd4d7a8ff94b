//! Review list state.
//!
//! Holds the fetched rows plus the local search text and status filter.
//! The visible subset is recomputed from those on every read, so it is
//! always consistent with the latest input.
//!
//! Status changes are optimistic: the row is rewritten locally before the
//! request goes out. The server row replaces it on success; on failure the
//! view raises an alert and re-fetches the whole collection.

use adm_core::entities::Application;
use adm_core::enums::ApplicationStatus;
use adm_core::search::{ApplicationQuery, StatusFilter};

use crate::api::ReviewApi;
use crate::error::ClientError;

/// A status change that has been applied locally but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "settle the change once the server has answered"]
pub struct PendingStatusChange {
    pub id: String,
    pub status: ApplicationStatus,
}

pub struct ListView<A> {
    api: A,
    rows: Vec<Application>,
    loading: bool,
    error: Option<String>,
    query: ApplicationQuery,
    alert: Option<String>,
}

impl<A: ReviewApi> ListView<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            rows: Vec::new(),
            loading: false,
            error: None,
            query: ApplicationQuery::default(),
            alert: None,
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the collection (on mount and on manual refresh).
    ///
    /// A failure leaves an inline error and an empty list.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.api.list_applications().await {
            Ok(rows) => self.rows = rows,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load applications");
                self.rows.clear();
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub const fn set_status_filter(&mut self, filter: StatusFilter) {
        self.query.status = filter;
    }

    #[must_use]
    pub const fn query(&self) -> &ApplicationQuery {
        &self.query
    }

    /// Rows passing the current search and filter, newest first.
    #[must_use]
    pub fn visible(&self) -> Vec<&Application> {
        self.query.apply(&self.rows)
    }

    #[must_use]
    pub fn rows(&self) -> &[Application] {
        &self.rows
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn showing(&self) -> usize {
        self.visible().len()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Blocking alert raised by a failed mutation, cleared on read.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Rewrite the row's status locally. Returns `None` if the row is not
    /// in the current collection.
    pub fn begin_status_change(
        &mut self,
        id: &str,
        status: ApplicationStatus,
    ) -> Option<PendingStatusChange> {
        let row = self.rows.iter_mut().find(|row| row.id == id)?;
        row.status = status;
        Some(PendingStatusChange {
            id: id.to_string(),
            status,
        })
    }

    /// Reconcile a pending change with the server's answer.
    pub async fn settle(
        &mut self,
        pending: PendingStatusChange,
        result: Result<Application, ClientError>,
    ) {
        match result {
            Ok(updated) => {
                if let Some(row) = self.rows.iter_mut().find(|row| row.id == updated.id) {
                    *row = updated;
                }
            }
            Err(e) => {
                tracing::warn!(id = %pending.id, status = %pending.status, error = %e, "status change failed");
                self.alert = Some(e.to_string());
                self.load().await;
            }
        }
    }

    /// Optimistically change one row's status and send the patch.
    pub async fn change_status(&mut self, id: &str, status: ApplicationStatus) {
        let Some(pending) = self.begin_status_change(id, status) else {
            return;
        };
        let result = self.api.patch_status(id, status).await;
        self.settle(pending, result).await;
    }
}

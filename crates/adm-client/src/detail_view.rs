//! Single-application view state.
//!
//! A view opened without an identifier stays in [`LoadState::MissingId`]
//! and never calls the server. Status changes stamp a client-side
//! `updated_at` until the server row arrives and replaces every field.

use adm_core::entities::Application;
use adm_core::enums::ApplicationStatus;
use chrono::Utc;

use crate::api::ReviewApi;
use crate::error::ClientError;

pub const MISSING_ID_MESSAGE: &str = "Missing id in URL.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No identifier was supplied.
    MissingId,
    Loading,
    Loaded(Application),
    /// The fetch failed; carries the message.
    Failed(String),
}

pub struct DetailView<A> {
    api: A,
    id: Option<String>,
    state: LoadState,
    saving: bool,
    alert: Option<String>,
}

impl<A: ReviewApi> DetailView<A> {
    #[must_use]
    pub fn new(api: A, id: Option<&str>) -> Self {
        let id = id.filter(|s| !s.is_empty()).map(str::to_string);
        let state = if id.is_some() {
            LoadState::Loading
        } else {
            LoadState::MissingId
        };
        Self {
            api,
            id,
            state,
            saving: false,
            alert: None,
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub const fn application(&self) -> Option<&Application> {
        match &self.state {
            LoadState::Loaded(app) => Some(app),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Fetch the application for the current id.
    pub async fn load(&mut self) {
        let Some(id) = self.id.clone() else {
            self.state = LoadState::MissingId;
            return;
        };
        self.state = match self.api.get_application(&id).await {
            Ok(app) => LoadState::Loaded(app),
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to load application");
                LoadState::Failed(e.to_string())
            }
        };
    }

    /// Switch to another id and fetch it.
    pub async fn set_id(&mut self, id: Option<&str>) {
        self.id = id.filter(|s| !s.is_empty()).map(str::to_string);
        self.load().await;
    }

    /// Rewrite the status and stamp a local `updated_at`. Returns the
    /// previous status, or `None` when nothing is loaded.
    pub fn begin_status_change(&mut self, status: ApplicationStatus) -> Option<ApplicationStatus> {
        let LoadState::Loaded(app) = &mut self.state else {
            return None;
        };
        let previous = app.status;
        app.status = status;
        app.updated_at = Utc::now();
        self.saving = true;
        Some(previous)
    }

    /// Reconcile with the server's answer: its row wins on success; a
    /// failure raises an alert and re-fetches.
    pub async fn settle(&mut self, result: Result<Application, ClientError>) {
        self.saving = false;
        match result {
            Ok(updated) => self.state = LoadState::Loaded(updated),
            Err(e) => {
                tracing::warn!(id = ?self.id, error = %e, "status change failed");
                self.alert = Some(e.to_string());
                self.load().await;
            }
        }
    }

    /// Optimistically change the status and send the patch.
    pub async fn change_status(&mut self, status: ApplicationStatus) {
        let Some(id) = self.id.clone() else {
            return;
        };
        if self.begin_status_change(status).is_none() {
            return;
        }
        let result = self.api.patch_status(&id, status).await;
        self.settle(result).await;
    }
}

impl LoadState {
    /// Message to show for a non-loaded state.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::MissingId => Some(MISSING_ID_MESSAGE),
            Self::Failed(msg) => Some(msg.as_str()),
            Self::Loading | Self::Loaded(_) => None,
        }
    }
}

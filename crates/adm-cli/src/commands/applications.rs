use anyhow::{Context, bail};

use adm_client::HttpReviewApi;
use adm_client::detail_view::DetailView;
use adm_client::list_view::ListView;
use adm_config::AdmConfig;
use adm_core::enums::ApplicationStatus;
use adm_core::search::StatusFilter;

use crate::cli::{ApplicationCommands, OutputFormat};
use crate::output::output;

pub async fn handle(
    action: ApplicationCommands,
    config: &AdmConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let api = HttpReviewApi::from_config(&config.client);
    match action {
        ApplicationCommands::List { search, status } => {
            let filter: StatusFilter = status
                .as_deref()
                .unwrap_or_default()
                .parse()
                .context("invalid --status")?;

            let mut view = ListView::new(api);
            view.load().await;
            if let Some(error) = view.error() {
                bail!("failed to load applications: {error}");
            }
            view.set_search(search.unwrap_or_default());
            view.set_status_filter(filter);

            tracing::debug!(total = view.total(), showing = view.showing(), "applications filtered");
            output(&view.visible(), format)
        }
        ApplicationCommands::Show { id } => {
            let mut view = DetailView::new(api, Some(&id));
            view.load().await;
            match view.application() {
                Some(app) => output(app, format),
                None => bail!(
                    "{}",
                    view.state().message().unwrap_or("application not loaded")
                ),
            }
        }
        ApplicationCommands::SetStatus { id, status } => {
            let status: ApplicationStatus = status.parse()?;
            let mut view = DetailView::new(api, Some(&id));
            view.load().await;
            if let Some(message) = view.state().message() {
                bail!("{message}");
            }
            view.change_status(status).await;
            if let Some(alert) = view.take_alert() {
                bail!("status change failed: {alert}");
            }
            match view.application() {
                Some(app) => output(app, format),
                None => bail!("application disappeared after the status change"),
            }
        }
    }
}

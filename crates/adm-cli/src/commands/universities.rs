use adm_client::HttpReviewApi;
use adm_config::AdmConfig;

use crate::cli::OutputFormat;
use crate::output::output;

pub async fn handle(config: &AdmConfig, format: OutputFormat) -> anyhow::Result<()> {
    let api = HttpReviewApi::from_config(&config.client);
    let universities = api.list_universities().await?;
    output(&universities, format)
}

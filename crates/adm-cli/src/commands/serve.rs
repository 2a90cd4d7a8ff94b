use anyhow::Context;

use adm_api::{ReviewApp, Server};
use adm_config::AdmConfig;
use adm_db::service::AdmService;

pub async fn handle(config: &AdmConfig, bind: Option<&str>) -> anyhow::Result<()> {
    if !config.auth.is_configured() {
        tracing::warn!("no admin password configured; staff login will fail until auth.admin_password is set");
    }

    let store = AdmService::from_config(&config.database)
        .await
        .context("failed to open application store")?;
    let app = ReviewApp::from_config(config, store);

    let addr = bind.unwrap_or(&config.server.bind_addr);
    let server = Server::bind(addr, app)?;
    eprintln!("Review server listening on http://{}", server.local_addr()?);

    server.run().await?;
    Ok(())
}

use adm_config::AdmConfig;

use crate::cli::{Commands, OutputFormat};

pub mod applications;
pub mod serve;
pub mod submit;
pub mod universities;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: &AdmConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve { bind } => serve::handle(config, bind.as_deref()).await,
        Commands::Applications { action } => applications::handle(action, config, format).await,
        Commands::Submit(args) => submit::handle(args, config, format).await,
        Commands::Universities => universities::handle(config, format).await,
    }
}

//! panelbot binary: run the bot, or manage panels/admins/log channel from the shell.

use anyhow::{Context, Result};
use clap::Parser;
use panelbot::{database_config_from_env, execute, load_config, run_bot, AuditLogHandler, Cli, Commands};
use panel_storage::open_store;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config, |_config, components| {
                Arc::new(AuditLogHandler::new(components.reporter.clone()))
            })
            .await
        }
        Commands::Manage(command) => {
            tracing_subscriber::fmt()
                .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
                .with_target(false)
                .init();

            let database = database_config_from_env()?;
            let store = open_store(&database)
                .await
                .context("Failed to open panel storage")?;
            let output = execute(store.as_ref(), command).await?;
            println!("{}", output);
            Ok(())
        }
    }
}

use anyhow::{Context, Result};
use handler_chain::HandlerChain;
use panel_core::{init_tracing, Bot as CoreBot, Handler, HandlerResponse, Message};
use panel_storage::{open_store, PanelStore};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::components::{build_bot_components, build_handler_chain, BotComponents};
use crate::config::BotConfig;
use crate::telegram::run_repl;

/// Main entry: validate config, init logging, open the store, build the chain, then run the REPL.
/// The factory receives (config, BotComponents) and returns the application handler.
#[instrument(skip(config, make_handler))]
pub async fn run_bot<F>(config: BotConfig, make_handler: F) -> Result<()>
where
    F: FnOnce(&BotConfig, BotComponents) -> Arc<dyn Handler>,
{
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        backend = %config.database().backend,
        static_admins = config.admin_ids().len(),
        "Initializing bot"
    );

    let store = open_store(config.database())
        .await
        .context("Failed to initialize panel storage")?;

    let components = build_bot_components(&config, store, None)?;
    let handler = make_handler(&config, components.clone());
    let handler_chain = build_handler_chain(&components, handler);

    info!("Bot started successfully");

    run_repl(
        components.teloxide_bot.clone(),
        handler_chain,
        components.bot.clone(),
    )
    .await
}

/// Builds components and handler chain without starting the REPL. Used by integration tests
/// that inject a recording bot and drive the chain with fake messages.
#[instrument(skip(config, store, bot_override, make_handler))]
pub fn build_only<F>(
    config: &BotConfig,
    store: Arc<dyn PanelStore>,
    bot_override: Option<Arc<dyn CoreBot>>,
    make_handler: F,
) -> Result<(BotComponents, HandlerChain)>
where
    F: FnOnce(&BotConfig, BotComponents) -> Arc<dyn Handler>,
{
    config.validate()?;
    let components = build_bot_components(config, store, bot_override)?;
    let handler = make_handler(config, components.clone());
    let handler_chain = build_handler_chain(&components, handler);
    Ok((components, handler_chain))
}

/// Runs one message through the chain and sends a `Reply` back to its chat. Errors are logged.
pub async fn dispatch_message(chain: &HandlerChain, bot: &dyn CoreBot, message: &Message) {
    match chain.handle(message).await {
        Ok(HandlerResponse::Reply(text)) => {
            if let Err(e) = bot.reply_to(message, &text).await {
                error!(error = %e, chat_id = message.chat.id, "Failed to send reply");
            }
        }
        Ok(_) => {}
        Err(e) => {
            error!(error = %e, user_id = message.user.id, "Handler chain failed");
        }
    }
}

//! Component factory: builds BotComponents from config and an opened store.

use anyhow::Result;
use handler_chain::HandlerChain;
use panel_core::{Bot as CoreBot, Handler};
use panel_storage::PanelStore;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, instrument};

use crate::config::BotConfig;
use crate::handlers::AdminGuardHandler;
use crate::reporter::LogChannelReporter;
use crate::telegram::TelegramBotAdapter;

/// Core dependencies shared by the runner and the application handler.
#[derive(Clone)]
pub struct BotComponents {
    pub store: Arc<dyn PanelStore>,
    pub teloxide_bot: Bot,
    /// Outgoing messages (replies and log channel reports); a recorder in tests.
    pub bot: Arc<dyn CoreBot>,
    pub reporter: Arc<LogChannelReporter>,
    pub admin_ids: Vec<i64>,
}

/// Builds BotComponents. When `bot_override` is `Some`, it replaces the Telegram adapter for outgoing messages.
#[instrument(skip(config, store, bot_override))]
pub fn build_bot_components(
    config: &BotConfig,
    store: Arc<dyn PanelStore>,
    bot_override: Option<Arc<dyn CoreBot>>,
) -> Result<BotComponents> {
    let teloxide_bot = {
        let bot = Bot::new(config.bot_token());
        match config.telegram_api_url() {
            Some(url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    };

    let bot: Arc<dyn CoreBot> = match bot_override {
        Some(bot) => bot,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };
    let reporter = Arc::new(LogChannelReporter::new(store.clone(), bot.clone()));

    Ok(BotComponents {
        store,
        teloxide_bot,
        bot,
        reporter,
        admin_ids: config.admin_ids().to_vec(),
    })
}

/// Chain order: admin guard, then the application handler.
pub fn build_handler_chain(components: &BotComponents, handler: Arc<dyn Handler>) -> HandlerChain {
    let guard = AdminGuardHandler::new(components.admin_ids.clone(), components.store.clone())
        .with_reporter(components.reporter.clone());

    HandlerChain::new()
        .add_handler(Arc::new(guard))
        .add_handler(handler)
}

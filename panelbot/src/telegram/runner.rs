//! REPL runner: converts teloxide messages to core::Message and dispatches them through the handler chain.

use anyhow::Result;
use handler_chain::HandlerChain;
use panel_core::{Bot as CoreBot, ToCoreMessage};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, instrument};

use super::adapters::TelegramMessageWrapper;
use crate::runner::dispatch_message;

/// Starts the REPL. Each message is converted to core::Message and handled in its own task.
#[instrument(skip(bot, handler_chain, reply_bot))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    reply_bot: Arc<dyn CoreBot>,
) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Connected to Telegram");
        }
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = handler_chain.clone();
        let reply_bot = reply_bot.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_type = %core_msg.message_type,
                "Received message"
            );

            tokio::spawn(async move {
                dispatch_message(&chain, reply_bot.as_ref(), &core_msg).await;
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}

//! CLI parser: `run` starts the bot, the other subcommands manage the panel store directly.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "panelbot")]
#[command(about = "Telegram panel bot: run the bot or manage panels, admins and the log channel", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    #[command(flatten)]
    Manage(ManageCommand),
}

/// Store management commands. Only the database settings (DB_*) are required.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ManageCommand {
    /// Create the tables if they do not exist.
    InitDb,
    /// Manage admin chats.
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Manage the log channel.
    LogChannel {
        #[command(subcommand)]
        action: LogChannelAction,
    },
    /// Manage panels of a chat.
    Panel {
        #[command(subcommand)]
        action: PanelAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    Add {
        #[arg(allow_negative_numbers = true)]
        chat_id: i64,
    },
    Remove {
        #[arg(allow_negative_numbers = true)]
        chat_id: i64,
    },
    List,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum LogChannelAction {
    Set {
        #[arg(allow_negative_numbers = true)]
        channel_id: i64,
    },
    Show,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    /// Insert or overwrite a panel.
    Save {
        #[arg(allow_negative_numbers = true)]
        chat_id: i64,
        alias: String,
        panel_url: String,
        #[arg(long, default_value = "")]
        token: String,
        #[arg(long, default_value = "")]
        username: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    List {
        #[arg(allow_negative_numbers = true)]
        chat_id: i64,
    },
    Delete {
        #[arg(allow_negative_numbers = true)]
        chat_id: i64,
        alias: String,
    },
    /// Make an existing panel the chat's selected panel.
    Select {
        #[arg(allow_negative_numbers = true)]
        chat_id: i64,
        alias: String,
    },
    Selected {
        #[arg(allow_negative_numbers = true)]
        chat_id: i64,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

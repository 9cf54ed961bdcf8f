//! # Panel bot application
//!
//! Wires the panel store, the handler chain and the Telegram REPL. Loads config from env.
//! `run` starts the bot; the other CLI subcommands manage the store directly.

pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod handlers;
pub mod reporter;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, AdminAction, Cli, Commands, LogChannelAction, ManageCommand, PanelAction};
pub use commands::execute;
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{database_config_from_env, BotConfig};
pub use handlers::{AdminGuardHandler, AuditLogHandler};
pub use reporter::LogChannelReporter;
pub use runner::{build_only, dispatch_message, run_bot};
pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};

//! Bot configuration: BaseConfig (Telegram + log + admins) + DatabaseConfig (storage backend).

mod base;
mod bot_config;
mod database;

#[cfg(test)]
mod tests;

pub use base::{parse_admin_ids, BaseConfig};
pub use bot_config::BotConfig;
pub use database::database_config_from_env;

//! BotConfig: BaseConfig + DatabaseConfig. Use load() for env-based loading.

use anyhow::Result;
use panel_storage::DatabaseConfig;

use super::{database_config_from_env, BaseConfig};

/// Bot config: Telegram/log/admin settings plus the storage backend.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub database: DatabaseConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let database = database_config_from_env()?;
        Ok(Self { base, database })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.database.validate()?;
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn database(&self) -> &DatabaseConfig {
        &self.database
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn admin_ids(&self) -> &[i64] {
        &self.base.admin_ids
    }
}

//! Base config: Telegram Bot connection, logging, static admin ids. Loaded from env.

use anyhow::{Context, Result};
use panel_core::mask_secret;
use std::env;
use std::fmt;

/// Base config: Telegram-related, logging and the static admin list.
#[derive(Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
    /// ADMIN_IDS: users always allowed, in addition to the stored admins table
    pub admin_ids: Vec<i64>,
}

impl fmt::Debug for BaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseConfig")
            .field("bot_token", &mask_secret(&self.bot_token))
            .field("telegram_api_url", &self.telegram_api_url)
            .field("log_file", &self.log_file)
            .field("admin_ids", &self.admin_ids)
            .finish()
    }
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/panelbot.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let admin_ids = match env::var("ADMIN_IDS") {
            Ok(raw) => parse_admin_ids(&raw).context("Invalid ADMIN_IDS")?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            admin_ids,
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}

/// Parses a comma- or whitespace-separated list of chat/user ids, e.g. "123, -100456".
pub fn parse_admin_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .with_context(|| format!("'{}' is not a numeric id", part))
        })
        .collect()
}

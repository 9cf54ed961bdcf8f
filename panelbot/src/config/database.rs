//! Database settings from env: DB_TYPE, DB_PATH, DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME, DB_TIMEOUT_SECS.

use anyhow::{Context, Result};
use panel_storage::{Backend, DatabaseConfig, MySqlSettings, DEFAULT_SQLITE_PATH, DEFAULT_TIMEOUT};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Builds the [`DatabaseConfig`] once at startup. An unknown DB_TYPE is a configuration error.
pub fn database_config_from_env() -> Result<DatabaseConfig> {
    let backend: Backend = env::var("DB_TYPE")
        .unwrap_or_else(|_| "sqlite".to_string())
        .parse()?;

    let sqlite_path =
        PathBuf::from(env::var("DB_PATH").unwrap_or_else(|_| DEFAULT_SQLITE_PATH.to_string()));

    let defaults = MySqlSettings::default();
    let port = match env::var("DB_PORT") {
        Ok(raw) => raw
            .trim()
            .parse::<u16>()
            .with_context(|| format!("DB_PORT is not a valid port: {}", raw))?,
        Err(_) => defaults.port,
    };
    let mysql = MySqlSettings {
        host: env::var("DB_HOST").unwrap_or(defaults.host),
        port,
        user: env::var("DB_USER").unwrap_or_default(),
        password: env::var("DB_PASSWORD").unwrap_or_default(),
        database: env::var("DB_NAME").unwrap_or_default(),
    };

    let timeout = match env::var("DB_TIMEOUT_SECS") {
        Ok(raw) => Duration::from_secs(
            raw.trim()
                .parse()
                .with_context(|| format!("DB_TIMEOUT_SECS is not a number: {}", raw))?,
        ),
        Err(_) => DEFAULT_TIMEOUT,
    };

    Ok(DatabaseConfig {
        backend,
        sqlite_path,
        mysql,
        timeout,
    })
}

//! Config tests.

use crate::config::{parse_admin_ids, BotConfig};
use panel_storage::{Backend, StorageError};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DB_VARS: &[&str] = &[
    "DB_TYPE",
    "DB_PATH",
    "DB_HOST",
    "DB_PORT",
    "DB_USER",
    "DB_PASSWORD",
    "DB_NAME",
    "DB_TIMEOUT_SECS",
];

fn clear_env() {
    for var in DB_VARS {
        env::remove_var(var);
    }
    env::remove_var("BOT_TOKEN");
    env::remove_var("TELEGRAM_API_URL");
    env::remove_var("TELOXIDE_API_URL");
    env::remove_var("LOG_FILE");
    env::remove_var("ADMIN_IDS");
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.log_file(), "logs/panelbot.log");
    assert!(config.admin_ids().is_empty());
    assert_eq!(config.database().backend, Backend::Sqlite);
    assert_eq!(config.database().sqlite_path, PathBuf::from("data/bot_data.db"));
    assert_eq!(config.database().mysql.host, "localhost");
    assert_eq!(config.database().mysql.port, 3306);
    assert_eq!(config.database().timeout, Duration::from_secs(10));
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_mysql_values() {
    clear_env();
    env::set_var("BOT_TOKEN", "custom_token");
    env::set_var("DB_TYPE", "MySQL");
    env::set_var("DB_HOST", "db.internal");
    env::set_var("DB_PORT", "3307");
    env::set_var("DB_USER", "panel");
    env::set_var("DB_PASSWORD", "s3cret-password");
    env::set_var("DB_NAME", "panels");
    env::set_var("DB_TIMEOUT_SECS", "3");
    env::set_var("ADMIN_IDS", "111, -100222");

    let config = BotConfig::load(None).unwrap();
    let db = config.database();

    assert_eq!(db.backend, Backend::MySql);
    assert_eq!(db.mysql.host, "db.internal");
    assert_eq!(db.mysql.port, 3307);
    assert_eq!(db.mysql.user, "panel");
    assert_eq!(db.mysql.password, "s3cret-password");
    assert_eq!(db.mysql.database, "panels");
    assert_eq!(db.timeout, Duration::from_secs(3));
    assert_eq!(config.admin_ids(), &[111, -100222]);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_token_override() {
    clear_env();
    env::set_var("BOT_TOKEN", "env_token");

    let config = BotConfig::load(Some("cli_token".to_string())).unwrap();

    assert_eq!(config.bot_token(), "cli_token");
}

#[test]
#[serial]
fn test_load_config_without_token_fails() {
    clear_env();

    let err = BotConfig::load(None).unwrap_err();

    assert!(err.to_string().contains("BOT_TOKEN"));
}

/// **Test: Unknown DB_TYPE is a configuration error, not a silent fallback.**
#[test]
#[serial]
fn test_unknown_db_type_is_rejected() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("DB_TYPE", "postgres");

    let err = BotConfig::load(None).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<StorageError>(),
        Some(StorageError::Configuration(_))
    ));
}

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("DB_PORT", "not-a-port");

    let err = BotConfig::load(None).unwrap_err();

    assert!(err.to_string().contains("DB_PORT"));
}

/// **Test: MySQL without DB_NAME passes load but fails validate.**
#[test]
#[serial]
fn test_validate_rejects_incomplete_mysql() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("DB_TYPE", "mysql");
    env::set_var("DB_USER", "panel");

    let config = BotConfig::load(None).unwrap();

    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn test_validate_rejects_invalid_api_url() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("TELEGRAM_API_URL", "not a url");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.telegram_api_url(), Some("not a url"));
    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn test_teloxide_api_url_fallback() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("TELOXIDE_API_URL", "http://127.0.0.1:8081");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.telegram_api_url(), Some("http://127.0.0.1:8081"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_admin_ids() {
    assert_eq!(parse_admin_ids("1,2 3").unwrap(), vec![1, 2, 3]);
    assert_eq!(parse_admin_ids(" ,, ").unwrap(), Vec::<i64>::new());
    assert!(parse_admin_ids("12,abc").is_err());
}

/// **Test: Debug output of the loaded config never shows the bot token.**
#[test]
#[serial]
fn test_debug_masks_bot_token() {
    clear_env();
    env::set_var("BOT_TOKEN", "123456789:AAHsecretTelegramToken");

    let config = BotConfig::load(None).unwrap();
    let rendered = format!("{:?}", config);

    assert!(!rendered.contains("AAHsecretTelegramToken"));
    assert!(rendered.contains("bot_token"));
}

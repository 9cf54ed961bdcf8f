//! Database configuration consumed by the connection providers.
//!
//! Built once at process start (panelbot reads it from env) and passed down explicitly.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use panel_core::mask_secret;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StorageError};

pub const DEFAULT_SQLITE_PATH: &str = "data/bot_data.db";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Which SQL engine backs the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// File-based SQLite database.
    Sqlite,
    /// MySQL (or MariaDB) server.
    MySql,
}

impl FromStr for Backend {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "mysql" => Ok(Backend::MySql),
            other => Err(StorageError::Configuration(format!(
                "Unknown database type: '{}' (expected 'sqlite' or 'mysql')",
                other
            ))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Sqlite => f.write_str("sqlite"),
            Backend::MySql => f.write_str("mysql"),
        }
    }
}

/// Client/server connection settings; only read when the backend is MySQL.
#[derive(Clone)]
pub struct MySqlSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for MySqlSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: String::new(),
            password: String::new(),
            database: String::new(),
        }
    }
}

impl fmt::Debug for MySqlSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &mask_secret(&self.password))
            .field("database", &self.database)
            .finish()
    }
}

/// Full database configuration: backend selector, SQLite path, MySQL settings, per-operation timeout.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: Backend,
    pub sqlite_path: PathBuf,
    pub mysql: MySqlSettings,
    /// Upper bound for one store operation (acquire + statements); also the SQLite busy timeout.
    pub timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Sqlite,
            sqlite_path: PathBuf::from(DEFAULT_SQLITE_PATH),
            mysql: MySqlSettings::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl DatabaseConfig {
    /// SQLite config at `path` with default timeout.
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            sqlite_path: path.into(),
            ..Self::default()
        }
    }

    /// MySQL config with default timeout.
    pub fn mysql(settings: MySqlSettings) -> Self {
        Self {
            backend: Backend::MySql,
            mysql: settings,
            ..Self::default()
        }
    }

    /// Checks the settings the selected backend needs.
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(StorageError::Configuration(
                "database timeout must be greater than zero".to_string(),
            ));
        }
        match self.backend {
            Backend::Sqlite => {
                if self.sqlite_path.as_os_str().is_empty() {
                    return Err(StorageError::Configuration(
                        "DB_PATH must not be empty for the sqlite backend".to_string(),
                    ));
                }
            }
            Backend::MySql => {
                let m = &self.mysql;
                for (name, value) in [("DB_HOST", &m.host), ("DB_USER", &m.user), ("DB_NAME", &m.database)] {
                    if value.trim().is_empty() {
                        return Err(StorageError::Configuration(format!(
                            "{} must be set for the mysql backend",
                            name
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

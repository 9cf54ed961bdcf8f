//! Connection providers: resolve a live connection for one store operation.
//!
//! No pooling: each operation acquires its own connection and releases it when done.
//! Early returns drop the connection, which closes it as well.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, error, info, warn};

use crate::config::{Backend, MySqlSettings};
use crate::error::{Result, StorageError};

/// Hands out a fresh connection per call.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    type Connection: sqlx::Connection + Send;

    fn backend(&self) -> Backend;

    /// Opens a new connection. Callers release it with [`release`] (or by dropping it on error paths).
    async fn acquire(&self) -> Result<Self::Connection>;
}

/// Embedded SQLite provider; creates the database directory and file if missing.
#[derive(Debug, Clone)]
pub struct SqliteConnectionProvider {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteConnectionProvider {
    pub fn new(path: impl Into<PathBuf>, busy_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            busy_timeout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_directory(&self) -> Result<()> {
        let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) else {
            return Ok(());
        };
        tokio::fs::create_dir_all(dir).await.map_err(|source| {
            error!(error = %source, dir = %dir.display(), "Failed to create database directory");
            StorageError::StorageUnavailable {
                path: dir.to_path_buf(),
                source,
            }
        })?;
        debug!(dir = %dir.display(), "Database directory ensured");
        Ok(())
    }
}

#[async_trait]
impl ConnectionProvider for SqliteConnectionProvider {
    type Connection = SqliteConnection;

    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    async fn acquire(&self) -> Result<SqliteConnection> {
        self.ensure_directory().await?;

        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .busy_timeout(self.busy_timeout);

        options.connect().await.map_err(|e| {
            error!(error = %e, path = %self.path.display(), "Failed to open SQLite database");
            StorageError::connection(Backend::Sqlite, e)
        })
    }
}

/// MySQL provider; one TCP connection per operation.
#[derive(Debug, Clone)]
pub struct MySqlConnectionProvider {
    options: MySqlConnectOptions,
    host: String,
    port: u16,
}

impl MySqlConnectionProvider {
    pub fn new(settings: &MySqlSettings) -> Self {
        info!(
            host = %settings.host,
            port = settings.port,
            database = %settings.database,
            "Configuring MySQL connection provider"
        );
        let options = MySqlConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.password)
            .database(&settings.database);
        Self {
            options,
            host: settings.host.clone(),
            port: settings.port,
        }
    }
}

#[async_trait]
impl ConnectionProvider for MySqlConnectionProvider {
    type Connection = MySqlConnection;

    fn backend(&self) -> Backend {
        Backend::MySql
    }

    async fn acquire(&self) -> Result<MySqlConnection> {
        self.options.connect().await.map_err(|e| {
            error!(error = %e, host = %self.host, port = self.port, "Failed to connect to MySQL");
            StorageError::connection(Backend::MySql, e)
        })
    }
}

/// Closes a connection after a successful operation. Close failures are logged, not returned:
/// the operation itself already committed.
pub(crate) async fn release<C: Connection>(conn: C) {
    if let Err(e) = conn.close().await {
        warn!(error = %e, "Failed to close database connection cleanly");
    }
}

/// Bounds one store operation (acquire + statements) by `timeout`.
/// On expiry the inner future is dropped, which also drops its connection.
pub(crate) async fn with_timeout<T, F>(operation: &'static str, timeout: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => {
            error!(operation, timeout_secs = timeout.as_secs(), "Store operation timed out");
            Err(StorageError::Timeout { operation, timeout })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sqlite_acquire_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("bot.db");
        let provider = SqliteConnectionProvider::new(&path, Duration::from_secs(1));

        let conn = provider.acquire().await.unwrap();
        release(conn).await;

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_sqlite_acquire_reports_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();
        let provider =
            SqliteConnectionProvider::new(blocker.join("bot.db"), Duration::from_secs(1));

        let err = provider.acquire().await.unwrap_err();

        assert!(matches!(err, StorageError::StorageUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result: Result<()> = with_timeout("sleep", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        assert!(matches!(
            result,
            Err(StorageError::Timeout { operation: "sleep", .. })
        ));
    }

    #[test]
    fn test_provider_backends() {
        let sqlite = SqliteConnectionProvider::new("x.db", Duration::from_secs(1));
        assert_eq!(sqlite.backend(), Backend::Sqlite);
        assert_eq!(sqlite.path(), Path::new("x.db"));

        let mysql = MySqlConnectionProvider::new(&MySqlSettings::default());
        assert_eq!(mysql.backend(), Backend::MySql);
    }
}

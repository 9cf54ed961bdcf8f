//! MySQL implementation of [`PanelStore`].
//!
//! Dialect: `BIGINT`/`VARCHAR` columns, `ON DUPLICATE KEY UPDATE` upserts, `INSERT IGNORE`.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::Connection;
use tracing::{debug, info, instrument};

use crate::config::{Backend, DatabaseConfig};
use crate::error::{Result, StorageError};
use crate::models::{validate_alias, PanelRecord, PANEL_COLUMNS};
use crate::provider::{release, with_timeout, ConnectionProvider, MySqlConnectionProvider};
use crate::repository::PanelStore;

pub(crate) const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS panels (
        chat_id BIGINT NOT NULL,
        alias VARCHAR(255) NOT NULL,
        panel_url VARCHAR(1024),
        token TEXT,
        username VARCHAR(255),
        password VARCHAR(255),
        PRIMARY KEY (chat_id, alias)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS admins (
        chat_id BIGINT PRIMARY KEY
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS log_channel (
        id INT PRIMARY KEY,
        channel_id BIGINT UNIQUE,
        CHECK (id = 1)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS selected_panels (
        chat_id BIGINT PRIMARY KEY,
        selected_panel_alias VARCHAR(255) NOT NULL
    )
    "#,
];

/// Panel store over a MySQL server.
#[derive(Debug, Clone)]
pub struct MySqlPanelStore {
    provider: MySqlConnectionProvider,
    timeout: Duration,
}

impl MySqlPanelStore {
    pub fn new(provider: MySqlConnectionProvider, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn from_config(config: &DatabaseConfig) -> Self {
        info!(host = %config.mysql.host, database = %config.mysql.database, "Using MySQL panel store");
        Self::new(MySqlConnectionProvider::new(&config.mysql), config.timeout)
    }
}

#[async_trait]
impl PanelStore for MySqlPanelStore {
    fn backend(&self) -> Backend {
        Backend::MySql
    }

    #[instrument(skip(self))]
    async fn initialize_schema(&self) -> Result<()> {
        info!("Creating database tables if not exist");
        with_timeout("initialize_schema", self.timeout, async {
            let mut conn = self.provider.acquire().await?;
            for ddl in SCHEMA {
                sqlx::query(ddl)
                    .execute(&mut conn)
                    .await
                    .map_err(StorageError::statement)?;
            }
            release(conn).await;
            Ok(())
        })
        .await?;
        info!("Database tables created successfully");
        Ok(())
    }

    #[instrument(skip(self, panel), fields(chat_id = panel.chat_id, alias = %panel.alias))]
    async fn upsert_panel(&self, panel: &PanelRecord) -> Result<()> {
        panel.validate()?;
        with_timeout("upsert_panel", self.timeout, async {
            let mut conn = self.provider.acquire().await?;
            sqlx::query(
                r#"
                INSERT INTO panels (chat_id, alias, panel_url, token, username, password)
                VALUES (?, ?, ?, ?, ?, ?)
                ON DUPLICATE KEY UPDATE
                    panel_url = ?, token = ?, username = ?, password = ?
                "#,
            )
            .bind(panel.chat_id)
            .bind(&panel.alias)
            .bind(&panel.panel_url)
            .bind(&panel.token)
            .bind(&panel.username)
            .bind(&panel.password)
            .bind(&panel.panel_url)
            .bind(&panel.token)
            .bind(&panel.username)
            .bind(&panel.password)
            .execute(&mut conn)
            .await
            .map_err(StorageError::statement)?;
            release(conn).await;
            Ok(())
        })
        .await?;
        info!(chat_id = panel.chat_id, alias = %panel.alias, "Panel saved");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_panels(&self, chat_id: i64) -> Result<Vec<PanelRecord>> {
        let panels = with_timeout("list_panels", self.timeout, async {
            let mut conn = self.provider.acquire().await?;
            let sql = format!("SELECT {} FROM panels WHERE chat_id = ?", PANEL_COLUMNS);
            let panels = sqlx::query_as::<_, PanelRecord>(&sql)
                .bind(chat_id)
                .fetch_all(&mut conn)
                .await
                .map_err(StorageError::statement)?;
            release(conn).await;
            Ok(panels)
        })
        .await?;
        debug!(chat_id, count = panels.len(), "Fetched panels");
        Ok(panels)
    }

    #[instrument(skip(self))]
    async fn get_panel(&self, chat_id: i64, alias: &str) -> Result<Option<PanelRecord>> {
        with_timeout("get_panel", self.timeout, async {
            let mut conn = self.provider.acquire().await?;
            let sql = format!(
                "SELECT {} FROM panels WHERE chat_id = ? AND alias = ?",
                PANEL_COLUMNS
            );
            let panel = sqlx::query_as::<_, PanelRecord>(&sql)
                .bind(chat_id)
                .bind(alias)
                .fetch_optional(&mut conn)
                .await
                .map_err(StorageError::statement)?;
            release(conn).await;
            Ok(panel)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete_panel(&self, chat_id: i64, alias: &str) -> Result<bool> {
        let removed = with_timeout("delete_panel", self.timeout, async {
            let mut conn = self.provider.acquire().await?;
            let mut tx = conn.begin().await.map_err(StorageError::statement)?;
            // Panel row first, so locks are taken in the same order as set_selected_panel.
            let result = sqlx::query("DELETE FROM panels WHERE chat_id = ? AND alias = ?")
                .bind(chat_id)
                .bind(alias)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::statement)?;
            sqlx::query(
                "DELETE FROM selected_panels WHERE chat_id = ? AND selected_panel_alias = ?",
            )
            .bind(chat_id)
            .bind(alias)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::statement)?;
            tx.commit().await.map_err(StorageError::statement)?;
            release(conn).await;
            Ok(result.rows_affected() > 0)
        })
        .await?;
        info!(chat_id, alias, removed, "Panel deleted");
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn add_admin(&self, chat_id: i64) -> Result<()> {
        with_timeout("add_admin", self.timeout, async {
            let mut conn = self.provider.acquire().await?;
            sqlx::query("INSERT IGNORE INTO admins (chat_id) VALUES (?)")
                .bind(chat_id)
                .execute(&mut conn)
                .await
                .map_err(StorageError::statement)?;
            release(conn).await;
            Ok(())
        })
        .await?;
        info!(chat_id, "Admin added");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_admin(&self, chat_id: i64) -> Result<bool> {
        let removed = with_timeout("remove_admin", self.timeout, async {
            let mut conn = self.provider.acquire().await?;
            let result = sqlx::query("DELETE FROM admins WHERE chat_id = ?")
                .bind(chat_id)
                .execute(&mut conn)
                .await
                .map_err(StorageError::statement)?;
            release(conn).await;
            Ok(result.rows_affected() > 0)
        })
        .await?;
        info!(chat_id, removed, "Admin removed");
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn list_admins(&self) -> Result<Vec<i64>> {
        let admins = with_timeout("list_admins", self.timeout, async {
            let mut conn = self.provider.acquire().await?;
            let admins = sqlx::query_scalar::<_, i64>("SELECT chat_id FROM admins")
                .fetch_all(&mut conn)
                .await
                .map_err(StorageError::statement)?;
            release(conn).await;
            Ok(admins)
        })
        .await?;
        debug!(count = admins.len(), "Fetched admins");
        Ok(admins)
    }

    #[instrument(skip(self))]
    async fn is_admin(&self, chat_id: i64) -> Result<bool> {
        with_timeout("is_admin", self.timeout, async {
            let mut conn = self.provider.acquire().await?;
            let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM admins WHERE chat_id = ?")
                .bind(chat_id)
                .fetch_optional(&mut conn)
                .await
                .map_err(StorageError::statement)?;
            release(conn).await;
            Ok(found.is_some())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn set_log_channel(&self, channel_id: i64) -> Result<()> {
        with_timeout("set_log_channel", self.timeout, async {
            let mut conn = self.provider.acquire().await?;
            sqlx::query(
                r#"
                INSERT INTO log_channel (id, channel_id) VALUES (1, ?)
                ON DUPLICATE KEY UPDATE channel_id = ?
                "#,
            )
            .bind(channel_id)
            .bind(channel_id)
            .execute(&mut conn)
            .await
            .map_err(StorageError::statement)?;
            release(conn).await;
            Ok(())
        })
        .await?;
        info!(channel_id, "Log channel set");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_log_channel(&self) -> Result<Option<i64>> {
        let channel_id = with_timeout("get_log_channel", self.timeout, async {
            let mut conn = self.provider.acquire().await?;
            let channel_id = sqlx::query_scalar::<_, Option<i64>>(
                "SELECT channel_id FROM log_channel WHERE id = 1",
            )
            .fetch_optional(&mut conn)
            .await
            .map_err(StorageError::statement)?;
            release(conn).await;
            Ok(channel_id.flatten())
        })
        .await?;
        debug!(channel_id = ?channel_id, "Fetched log channel");
        Ok(channel_id)
    }

    #[instrument(skip(self))]
    async fn set_selected_panel(&self, chat_id: i64, alias: &str) -> Result<()> {
        validate_alias(alias)?;
        with_timeout("set_selected_panel", self.timeout, async {
            let mut conn = self.provider.acquire().await?;
            let mut tx = conn.begin().await.map_err(StorageError::statement)?;
            // Shared lock holds off a concurrent delete_panel until this transaction commits.
            let exists = sqlx::query_scalar::<_, i64>(
                "SELECT 1 FROM panels WHERE chat_id = ? AND alias = ? LOCK IN SHARE MODE",
            )
            .bind(chat_id)
            .bind(alias)
            .fetch_optional(&mut *tx)
            .await
            .map_err(StorageError::statement)?;
            if exists.is_none() {
                tx.rollback().await.map_err(StorageError::statement)?;
                return Err(StorageError::NotFound(format!(
                    "panel '{}' in chat {}",
                    alias, chat_id
                )));
            }
            sqlx::query(
                r#"
                INSERT INTO selected_panels (chat_id, selected_panel_alias) VALUES (?, ?)
                ON DUPLICATE KEY UPDATE selected_panel_alias = ?
                "#,
            )
            .bind(chat_id)
            .bind(alias)
            .bind(alias)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::statement)?;
            tx.commit().await.map_err(StorageError::statement)?;
            release(conn).await;
            Ok(())
        })
        .await?;
        info!(chat_id, alias, "Selected panel set");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_selected_panel(&self, chat_id: i64) -> Result<Option<String>> {
        with_timeout("get_selected_panel", self.timeout, async {
            let mut conn = self.provider.acquire().await?;
            let alias = sqlx::query_scalar::<_, String>(
                "SELECT selected_panel_alias FROM selected_panels WHERE chat_id = ?",
            )
            .bind(chat_id)
            .fetch_optional(&mut conn)
            .await
            .map_err(StorageError::statement)?;
            release(conn).await;
            Ok(alias)
        })
        .await
    }
}

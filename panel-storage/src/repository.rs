use async_trait::async_trait;

use crate::config::Backend;
use crate::error::Result;
use crate::models::PanelRecord;

/// CRUD over panels, admins, the log channel setting and per-chat panel selection.
///
/// Implementations own their SQL dialect. Each call acquires its own connection,
/// runs one statement (or one transaction), and releases the connection.
#[async_trait]
pub trait PanelStore: Send + Sync {
    fn backend(&self) -> Backend;

    /// Creates all tables if absent. Safe to call on every start.
    async fn initialize_schema(&self) -> Result<()>;

    /// Inserts the panel or overwrites the existing row for (chat_id, alias).
    async fn upsert_panel(&self, panel: &PanelRecord) -> Result<()>;

    /// All panels of a chat, in storage order (no ordering guarantee).
    async fn list_panels(&self, chat_id: i64) -> Result<Vec<PanelRecord>>;

    async fn get_panel(&self, chat_id: i64, alias: &str) -> Result<Option<PanelRecord>>;

    /// Deletes the panel and any selection pointing at it. Returns whether a panel row was removed.
    async fn delete_panel(&self, chat_id: i64, alias: &str) -> Result<bool>;

    /// Idempotent: adding an existing admin is a no-op.
    async fn add_admin(&self, chat_id: i64) -> Result<()>;

    /// Returns whether a row was removed; removing a non-member is not an error.
    async fn remove_admin(&self, chat_id: i64) -> Result<bool>;

    async fn list_admins(&self) -> Result<Vec<i64>>;

    async fn is_admin(&self, chat_id: i64) -> Result<bool>;

    /// Sets the singleton log channel, replacing any previous value.
    async fn set_log_channel(&self, channel_id: i64) -> Result<()>;

    async fn get_log_channel(&self) -> Result<Option<i64>>;

    /// Marks `alias` as the active panel of the chat. `NotFound` if the chat has no such panel.
    async fn set_selected_panel(&self, chat_id: i64, alias: &str) -> Result<()>;

    async fn get_selected_panel(&self, chat_id: i64) -> Result<Option<String>>;
}

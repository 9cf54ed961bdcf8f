//! Storage crate: panel, admin, log channel and selection persistence.
//!
//! ## Modules
//!
//! - [`error`] – Storage error taxonomy
//! - [`config`] – Backend selector and database settings
//! - [`provider`] – Connection providers (one connection per operation)
//! - [`models`] – PanelRecord
//! - [`repository`] – PanelStore trait
//! - [`sqlite_store`] / [`mysql_store`] – dialect-owning implementations
//!
//! [`open_store`] picks the implementation once, from [`DatabaseConfig::backend`].

mod config;
mod error;
mod models;
mod mysql_store;
mod provider;
mod repository;
mod sqlite_store;


use std::sync::Arc;
use tracing::{info, instrument};

pub use config::{Backend, DatabaseConfig, MySqlSettings, DEFAULT_SQLITE_PATH, DEFAULT_TIMEOUT};
pub use error::{Result, StorageError};
pub use models::PanelRecord;
pub use mysql_store::MySqlPanelStore;
pub use provider::{ConnectionProvider, MySqlConnectionProvider, SqliteConnectionProvider};
pub use repository::PanelStore;
pub use sqlite_store::SqlitePanelStore;

/// Builds the store for the configured backend and initializes its schema.
///
/// Schema failures propagate: the service cannot run without its tables.
#[instrument(skip(config), fields(backend = %config.backend))]
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn PanelStore>> {
    config.validate()?;

    let store: Arc<dyn PanelStore> = match config.backend {
        Backend::Sqlite => Arc::new(SqlitePanelStore::from_config(config)),
        Backend::MySql => Arc::new(MySqlPanelStore::from_config(config)),
    };

    store.initialize_schema().await?;
    info!(backend = %config.backend, "Panel store ready");
    Ok(store)
}

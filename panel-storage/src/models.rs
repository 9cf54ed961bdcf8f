//! Panel record model.
//!
//! Maps to the `panels` table; credentials are stored as given (plaintext).

use std::fmt;

use panel_core::mask_secret;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StorageError};

/// Columns selected for a [`PanelRecord`]. NULLs written by older schema versions read back as "".
pub(crate) const PANEL_COLUMNS: &str = "chat_id, alias, \
     COALESCE(panel_url, '') AS panel_url, \
     COALESCE(token, '') AS token, \
     COALESCE(username, '') AS username, \
     COALESCE(password, '') AS password";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PanelRecord {
    pub chat_id: i64,
    pub alias: String,
    pub panel_url: String,
    pub token: String,
    pub username: String,
    pub password: String,
}

impl PanelRecord {
    pub fn new(
        chat_id: i64,
        alias: impl Into<String>,
        panel_url: impl Into<String>,
        token: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            chat_id,
            alias: alias.into(),
            panel_url: panel_url.into(),
            token: token.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Alias must be non-blank; it is half of the primary key.
    pub(crate) fn validate(&self) -> Result<()> {
        validate_alias(&self.alias)
    }
}

pub(crate) fn validate_alias(alias: &str) -> Result<()> {
    if alias.trim().is_empty() {
        return Err(StorageError::InvalidInput(
            "panel alias must not be empty".to_string(),
        ));
    }
    Ok(())
}

impl fmt::Debug for PanelRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelRecord")
            .field("chat_id", &self.chat_id)
            .field("alias", &self.alias)
            .field("panel_url", &self.panel_url)
            .field("token", &mask_secret(&self.token))
            .field("username", &self.username)
            .field("password", &mask_secret(&self.password))
            .finish()
    }
}

//! Shared fixtures: a recording Bot, a temp-dir SQLite store, and message builders.

#![allow(dead_code)]

use async_trait::async_trait;
use panel_core::{Bot, BotError, Chat, Message, MessageDirection, Result, User};
use panel_storage::{open_store, DatabaseConfig, PanelStore};
use panelbot::config::{BaseConfig, BotConfig};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Records every sent message as (chat_id, text). With `failing()`, every send errors.
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<(i64, String)>>,
    fail: bool,
}

impl RecordingBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        if self.fail {
            return Err(BotError::Bot("send failed".to_string()));
        }
        self.sent.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }
}

pub async fn temp_store(dir: &TempDir) -> Arc<dyn PanelStore> {
    let config = DatabaseConfig::sqlite(dir.path().join("bot_data.db"));
    open_store(&config).await.unwrap()
}

pub fn test_config(dir: &TempDir, admin_ids: Vec<i64>) -> BotConfig {
    BotConfig {
        base: BaseConfig {
            bot_token: "123456:test-token".to_string(),
            telegram_api_url: None,
            log_file: dir.path().join("panelbot.log").display().to_string(),
            admin_ids,
        },
        database: DatabaseConfig::sqlite(dir.path().join("bot_data.db")),
    }
}

pub fn incoming(user_id: i64, chat_id: i64, content: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: user_id,
            username: Some("operator".to_string()),
            first_name: Some("Op".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: chat_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        direction: MessageDirection::Incoming,
        created_at: chrono::Utc::now(),
    }
}

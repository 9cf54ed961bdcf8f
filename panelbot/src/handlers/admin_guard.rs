//! Admin guard: only configured or stored admins get past `before()`.

use async_trait::async_trait;
use panel_core::{Handler, Message, Result};
use panel_storage::PanelStore;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

use crate::reporter::LogChannelReporter;

/// Stops the chain for senders who are neither in ADMIN_IDS nor in the admins table.
///
/// A store failure denies access; the error is logged and the chain stops.
pub struct AdminGuardHandler {
    static_admins: Vec<i64>,
    store: Arc<dyn PanelStore>,
    reporter: Option<Arc<LogChannelReporter>>,
}

impl AdminGuardHandler {
    pub fn new(static_admins: Vec<i64>, store: Arc<dyn PanelStore>) -> Self {
        Self {
            static_admins,
            store,
            reporter: None,
        }
    }

    /// Denied attempts are also sent to the log channel.
    pub fn with_reporter(mut self, reporter: Arc<LogChannelReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    async fn is_authorized(&self, user_id: i64) -> bool {
        if self.static_admins.contains(&user_id) {
            return true;
        }
        match self.store.is_admin(user_id).await {
            Ok(is_admin) => is_admin,
            Err(e) => {
                error!(error = %e, user_id, "Admin lookup failed, denying access");
                false
            }
        }
    }
}

#[async_trait]
impl Handler for AdminGuardHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn before(&self, message: &Message) -> Result<bool> {
        if self.is_authorized(message.user.id).await {
            debug!("Admin check passed");
            return Ok(true);
        }

        warn!("Unauthorized access attempt");
        if let Some(reporter) = &self.reporter {
            let text = format!(
                "Unauthorized access attempt: user_id={} username=@{} chat_id={}",
                message.user.id,
                message.user.username.as_deref().unwrap_or("-"),
                message.chat.id
            );
            reporter.report_best_effort(&text).await;
        }
        Ok(false)
    }
}

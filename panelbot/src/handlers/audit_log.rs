//! Audit handler: records handled admin activity to the log channel. Message content is never forwarded.

use async_trait::async_trait;
use panel_core::{Handler, HandlerResponse, Message, MessageDirection, Result};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::reporter::LogChannelReporter;

pub struct AuditLogHandler {
    reporter: Arc<LogChannelReporter>,
}

impl AuditLogHandler {
    pub fn new(reporter: Arc<LogChannelReporter>) -> Self {
        Self { reporter }
    }
}

/// Builds the audit line. Content is left out since it can carry panel credentials.
pub(crate) fn audit_line(message: &Message, response: &HandlerResponse) -> String {
    format!(
        "Admin activity: user_id={} username=@{} chat_id={} type={} response={}",
        message.user.id,
        message.user.username.as_deref().unwrap_or("-"),
        message.chat.id,
        message.message_type,
        response.kind()
    )
}

#[async_trait]
impl Handler for AuditLogHandler {
    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        if !matches!(message.direction, MessageDirection::Incoming) {
            return Ok(());
        }
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            response = response.kind(),
            "Admin activity"
        );
        self.reporter
            .report_best_effort(&audit_line(message, response))
            .await;
        Ok(())
    }
}

//! Forwards operational notices to the configured log channel.

use panel_core::{Bot, BotError, Chat, Result};
use panel_storage::PanelStore;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Sends notices to the log channel stored in [`PanelStore::get_log_channel`].
///
/// The channel is read on every report, so `log-channel set` takes effect without a restart.
pub struct LogChannelReporter {
    store: Arc<dyn PanelStore>,
    bot: Arc<dyn Bot>,
}

impl LogChannelReporter {
    pub fn new(store: Arc<dyn PanelStore>, bot: Arc<dyn Bot>) -> Self {
        Self { store, bot }
    }

    /// Sends `text` to the log channel. Returns `Ok(false)` when no channel is configured.
    #[instrument(skip(self, text))]
    pub async fn report(&self, text: &str) -> Result<bool> {
        let channel_id = self
            .store
            .get_log_channel()
            .await
            .map_err(|e| BotError::Database(e.to_string()))?;

        let Some(channel_id) = channel_id else {
            debug!("No log channel configured, report skipped");
            return Ok(false);
        };

        let chat = Chat {
            id: channel_id,
            chat_type: "channel".to_string(),
        };
        self.bot.send_message(&chat, text).await?;
        debug!(channel_id, "Report sent to log channel");
        Ok(true)
    }

    /// Like [`report`](Self::report) but logs failures instead of returning them.
    pub async fn report_best_effort(&self, text: &str) -> bool {
        match self.report(text).await {
            Ok(sent) => sent,
            Err(e) => {
                warn!(error = %e, "Failed to report to log channel");
                false
            }
        }
    }
}

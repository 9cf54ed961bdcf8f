//! LogChannelReporter and AuditLogHandler tests.

mod common;

use common::{incoming, temp_store, RecordingBot};
use panel_core::{Handler, HandlerResponse};
use panelbot::{AuditLogHandler, LogChannelReporter};
use std::sync::Arc;
use tempfile::TempDir;

/// **Test: Without a configured channel nothing is sent and report returns false.**
#[tokio::test]
async fn test_report_without_channel_is_skipped() {
    let dir = TempDir::new().unwrap();
    let store = temp_store(&dir).await;
    let bot = Arc::new(RecordingBot::new());
    let reporter = LogChannelReporter::new(store, bot.clone());

    assert!(!reporter.report("hello").await.unwrap());
    assert!(bot.sent().is_empty());
}

/// **Test: Changing the channel takes effect on the next report.**
#[tokio::test]
async fn test_report_follows_current_channel() {
    let dir = TempDir::new().unwrap();
    let store = temp_store(&dir).await;
    let bot = Arc::new(RecordingBot::new());
    let reporter = LogChannelReporter::new(store.clone(), bot.clone());

    store.set_log_channel(-1001).await.unwrap();
    assert!(reporter.report("first").await.unwrap());
    store.set_log_channel(-1002).await.unwrap();
    assert!(reporter.report("second").await.unwrap());

    assert_eq!(
        bot.sent(),
        vec![(-1001, "first".to_string()), (-1002, "second".to_string())]
    );
}

#[tokio::test]
async fn test_report_propagates_send_failure() {
    let dir = TempDir::new().unwrap();
    let store = temp_store(&dir).await;
    store.set_log_channel(-1001).await.unwrap();
    let reporter = LogChannelReporter::new(store, Arc::new(RecordingBot::failing()));

    assert!(reporter.report("x").await.is_err());
    assert!(!reporter.report_best_effort("x").await);
}

/// **Test: Audit line carries user, chat, type and response kind, never the content.**
#[tokio::test]
async fn test_audit_handler_reports_without_content() {
    let dir = TempDir::new().unwrap();
    let store = temp_store(&dir).await;
    store.set_log_channel(-1001).await.unwrap();
    let bot = Arc::new(RecordingBot::new());
    let handler = AuditLogHandler::new(Arc::new(LogChannelReporter::new(store, bot.clone())));

    handler
        .after(
            &incoming(7, 42, "password=hunter22"),
            &HandlerResponse::Reply("ok".to_string()),
        )
        .await
        .unwrap();

    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    let line = &sent[0].1;
    assert!(line.contains("user_id=7"));
    assert!(line.contains("chat_id=42"));
    assert!(line.contains("type=text"));
    assert!(line.contains("response=Reply"));
    assert!(!line.contains("hunter22"));
}

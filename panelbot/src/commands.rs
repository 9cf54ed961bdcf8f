//! Management commands run against the panel store. Output is returned as text; secrets are masked.

use anyhow::{Context, Result};
use panel_core::mask_secret;
use panel_storage::{PanelRecord, PanelStore};
use std::fmt::Write;
use tracing::{info, instrument};

use crate::cli::{AdminAction, LogChannelAction, ManageCommand, PanelAction};

/// Executes one management command and returns what the CLI prints.
#[instrument(skip_all)]
pub async fn execute(store: &dyn PanelStore, command: ManageCommand) -> Result<String> {
    let output = match command {
        ManageCommand::InitDb => {
            store
                .initialize_schema()
                .await
                .context("Failed to initialize schema")?;
            format!("Schema ready ({})", store.backend())
        }
        ManageCommand::Admin { action } => admin(store, action).await?,
        ManageCommand::LogChannel { action } => log_channel(store, action).await?,
        ManageCommand::Panel { action } => panel(store, action).await?,
    };
    Ok(output)
}

async fn admin(store: &dyn PanelStore, action: AdminAction) -> Result<String> {
    match action {
        AdminAction::Add { chat_id } => {
            store.add_admin(chat_id).await?;
            info!(chat_id, "Admin added");
            Ok(format!("Admin {} added", chat_id))
        }
        AdminAction::Remove { chat_id } => {
            if store.remove_admin(chat_id).await? {
                info!(chat_id, "Admin removed");
                Ok(format!("Admin {} removed", chat_id))
            } else {
                Ok(format!("Admin {} was not registered", chat_id))
            }
        }
        AdminAction::List => {
            let admins = store.list_admins().await?;
            if admins.is_empty() {
                return Ok("No admins registered".to_string());
            }
            let lines: Vec<String> = admins.iter().map(|id| id.to_string()).collect();
            Ok(lines.join("\n"))
        }
    }
}

async fn log_channel(store: &dyn PanelStore, action: LogChannelAction) -> Result<String> {
    match action {
        LogChannelAction::Set { channel_id } => {
            store.set_log_channel(channel_id).await?;
            info!(channel_id, "Log channel set");
            Ok(format!("Log channel set to {}", channel_id))
        }
        LogChannelAction::Show => Ok(match store.get_log_channel().await? {
            Some(channel_id) => format!("Log channel: {}", channel_id),
            None => "No log channel configured".to_string(),
        }),
    }
}

async fn panel(store: &dyn PanelStore, action: PanelAction) -> Result<String> {
    match action {
        PanelAction::Save {
            chat_id,
            alias,
            panel_url,
            token,
            username,
            password,
        } => {
            let record = PanelRecord::new(chat_id, alias, panel_url, token, username, password);
            store.upsert_panel(&record).await?;
            Ok(format!("Panel '{}' saved for chat {}", record.alias, chat_id))
        }
        PanelAction::List { chat_id } => {
            let panels = store.list_panels(chat_id).await?;
            let selected = store.get_selected_panel(chat_id).await?;
            if panels.is_empty() {
                return Ok(format!("No panels for chat {}", chat_id));
            }
            Ok(format_panels(&panels, selected.as_deref()))
        }
        PanelAction::Delete { chat_id, alias } => {
            if store.delete_panel(chat_id, &alias).await? {
                Ok(format!("Panel '{}' deleted", alias))
            } else {
                Ok(format!("Panel '{}' not found", alias))
            }
        }
        PanelAction::Select { chat_id, alias } => {
            store.set_selected_panel(chat_id, &alias).await?;
            Ok(format!("Panel '{}' selected for chat {}", alias, chat_id))
        }
        PanelAction::Selected { chat_id } => Ok(match store.get_selected_panel(chat_id).await? {
            Some(alias) => alias,
            None => format!("No panel selected for chat {}", chat_id),
        }),
    }
}

fn masked_or_dash(secret: &str) -> String {
    if secret.is_empty() {
        "-".to_string()
    } else {
        mask_secret(secret)
    }
}

/// One row per panel; `*` marks the selected one.
pub(crate) fn format_panels(panels: &[PanelRecord], selected: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<16} {:<40} {:<16} {:<12} {:<12}",
        "ALIAS", "URL", "USERNAME", "PASSWORD", "TOKEN"
    );
    for panel in panels {
        let marker = if selected == Some(panel.alias.as_str()) { '*' } else { ' ' };
        let username = if panel.username.is_empty() { "-" } else { panel.username.as_str() };
        let _ = writeln!(
            out,
            "{} {:<16} {:<40} {:<16} {:<12} {:<12}",
            marker,
            panel.alias,
            panel.panel_url,
            username,
            masked_or_dash(&panel.password),
            masked_or_dash(&panel.token)
        );
    }
    out.trim_end().to_string()
}

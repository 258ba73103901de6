use serde::Serialize;
use stavba_store::{BackupPayload, ImportStats};
use tracing::info;

use crate::error::Result;
use crate::events::{emit_event, ThemePayload, EVENT_THEME_CHANGED};
use crate::state::{lock, SharedState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettingsDto {
    pub theme: String,
    pub default_channel: String,
    pub persistent: bool,
}

pub fn get_settings(state: &SharedState) -> Result<AppSettingsDto> {
    let guard = lock(state)?;
    Ok(AppSettingsDto {
        theme: guard.store.theme()?.to_string(),
        default_channel: guard.config.default_channel.clone(),
        persistent: !guard.config.in_memory,
    })
}

pub fn toggle_theme(state: &SharedState) -> Result<String> {
    let mut guard = lock(state)?;
    let theme = guard.store.toggle_theme()?;
    emit_event(
        guard.event_sink(),
        EVENT_THEME_CHANGED,
        ThemePayload {
            theme: theme.to_string(),
        },
    );
    Ok(theme.to_string())
}

pub fn audit_log(state: &SharedState) -> Result<Vec<stavba_store::AuditLogEntry>> {
    let guard = lock(state)?;
    Ok(guard.store.audit_log()?)
}

pub fn export_backup(state: &SharedState) -> Result<BackupPayload> {
    let guard = lock(state)?;
    let payload = guard.store.export_backup()?;
    info!(users = payload.users.len(), "Backup exported");
    Ok(payload)
}

pub fn import_backup(state: &SharedState, payload: BackupPayload) -> Result<ImportStats> {
    let mut guard = lock(state)?;
    Ok(guard.store.import_backup(&payload)?)
}

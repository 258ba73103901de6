use serde::Serialize;

pub const EVENT_CHAT_MESSAGE: &str = "chat-message";
pub const EVENT_ATTENDANCE_CHANGED: &str = "attendance-changed";
pub const EVENT_THEME_CHANGED: &str = "theme-changed";
pub const EVENT_SESSION_CHANGED: &str = "session-changed";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessagePayload {
    pub channel: String,
    pub sender: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendancePayload {
    pub user_id: String,
    pub checked_in: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemePayload {
    pub theme: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub user_name: Option<String>,
}

/// Receiver of UI notifications, implemented by the presentation host.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &str, payload: serde_json::Value) -> Result<(), String>;
}

pub fn emit_event<S: Serialize>(sink: Option<&dyn EventSink>, event: &str, payload: S) {
    let Some(sink) = sink else {
        return;
    };
    let result = serde_json::to_value(payload)
        .map_err(|e| e.to_string())
        .and_then(|value| sink.emit(event, value));
    if let Err(e) = result {
        tracing::error!(event, error = %e, "Failed to emit event");
    }
}

use chrono::{DateTime, Utc};
use serde_json::Value;

pub const MIN_LOG_PANE_ROWS: u16 = 10;
pub const MAX_LOG_PANE_ROWS: u16 = 24;
pub const DEFAULT_LOG_PANE_ROWS: u16 = 13;

pub const NO_LOGS_FALLBACK: &str = "No logs available.";
pub const LOGS_LOADING: &str = "Loading logs...";
pub const LOGS_FAILED: &str = "Failed to load logs.";

/// What the log pane currently shows.
#[derive(Clone, Debug, PartialEq)]
pub enum LogContent {
    Loading,
    Ready(String),
    Failed,
}

/// State of an open log viewer session. Wrap, fullscreen, and scroll reset
/// on each open; the pane-size preference lives on the session owner and
/// persists across opens.
pub struct LogViewState {
    pub container_id: String,
    pub container_name: String,
    pub content: LogContent,
    pub wrap: bool,
    pub fullscreen: bool,
    pub scroll_offset: usize, // lines up from the tail; 0 = at bottom
}

impl LogViewState {
    pub fn new(container_id: String, container_name: String) -> Self {
        Self {
            container_id,
            container_name,
            content: LogContent::Loading,
            wrap: true,
            fullscreen: false,
            scroll_offset: 0,
        }
    }

    /// Text the pane displays right now, including placeholders.
    pub fn display_text(&self) -> &str {
        match &self.content {
            LogContent::Loading => LOGS_LOADING,
            LogContent::Ready(text) => text,
            LogContent::Failed => LOGS_FAILED,
        }
    }
}

pub fn clamp_pane_rows(rows: i32) -> u16 {
    rows.clamp(MIN_LOG_PANE_ROWS as i32, MAX_LOG_PANE_ROWS as i32) as u16
}

/// Extract the log text from a `GET /containers/{id}/logs` payload.
/// A missing, wrong-typed, or empty `logs` field yields the fallback text.
pub fn logs_text(payload: &Value) -> String {
    match payload.get("logs").and_then(Value::as_str) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NO_LOGS_FALLBACK.to_string(),
    }
}

/// Restrict a container name to `[A-Za-z0-9._-]`, capped at 80 characters,
/// with a fixed fallback for names that sanitize to nothing.
pub fn sanitize_file_name(input: &str) -> String {
    let sanitized: String = input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .take(80)
        .collect();
    if sanitized.is_empty() {
        "container".to_string()
    } else {
        sanitized
    }
}

/// File name for a downloaded log: sanitized container name plus a UTC
/// timestamp with colons flattened so the name is portable.
pub fn log_file_name(container_name: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}-{}.log",
        sanitize_file_name(container_name),
        now.format("%Y-%m-%dT%H-%M-%S%.3fZ")
    )
}

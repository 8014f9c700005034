use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::model::{
    DEFAULT_LOG_PANE_ROWS, LogContent, LogViewState, clamp_pane_rows, is_valid_container_id,
    log_file_name, logs_text,
};

/// Receiver for a background log fetch, tagged with its generation.
type LogReceiver = mpsc::Receiver<Result<String, ApiError>>;

/// Outcome of draining the log fetch channel.
pub enum LogPoll {
    Idle,
    Ready,
    Failed(ApiError),
}

/// One log viewer session: at most one in-flight fetch, superseded (not
/// queued) by re-opens, plus display state for the pane. The pane-size
/// preference outlives individual sessions.
pub struct LogSession {
    client: Arc<ApiClient>,
    handle: tokio::runtime::Handle,
    pub state: Option<LogViewState>,
    pub pane_rows: u16,
    generation: u64,
    receiver: Option<(u64, LogReceiver)>,
    task: Option<JoinHandle<()>>,
}

impl LogSession {
    pub fn new(client: Arc<ApiClient>, handle: tokio::runtime::Handle) -> Self {
        Self {
            client,
            handle,
            state: None,
            pane_rows: DEFAULT_LOG_PANE_ROWS,
            generation: 0,
            receiver: None,
            task: None,
        }
    }

    /// Open the viewer for a container and issue the log fetch. Any previous
    /// in-flight fetch is aborted so only the most recent request can ever
    /// surface. Returns false (and issues nothing) for an invalid id.
    pub fn open(&mut self, container_id: &str, container_name: &str) -> bool {
        if !is_valid_container_id(container_id) {
            return false;
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
        let generation = self.generation;

        self.state = Some(LogViewState::new(
            container_id.to_string(),
            container_name.to_string(),
        ));

        let (tx, rx) = mpsc::channel();
        self.receiver = Some((generation, rx));

        let client = Arc::clone(&self.client);
        let id = container_id.to_string();
        self.task = Some(self.handle.spawn(async move {
            let result = client.container_logs(&id).await.map(|p| logs_text(&p));
            let _ = tx.send(result);
        }));
        debug!(container = container_id, generation, "log fetch issued");
        true
    }

    /// Close the viewer, aborting any in-flight fetch. Safe when not open.
    pub fn close(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.receiver = None;
        self.state = None;
    }

    /// Drain a completed log fetch into the pane, discarding results from
    /// superseded requests.
    pub fn poll(&mut self) -> LogPoll {
        let Some((generation, rx)) = &self.receiver else {
            return LogPoll::Idle;
        };
        let generation = *generation;
        match rx.try_recv() {
            Ok(result) => {
                self.receiver = None;
                self.apply(generation, result)
            }
            Err(mpsc::TryRecvError::Empty) => LogPoll::Idle,
            Err(mpsc::TryRecvError::Disconnected) => {
                // sender dropped without a result: aborted, settle silently
                self.receiver = None;
                LogPoll::Idle
            }
        }
    }

    fn apply(&mut self, generation: u64, result: Result<String, ApiError>) -> LogPoll {
        if generation != self.generation {
            return LogPoll::Idle;
        }
        self.task = None;
        let Some(state) = &mut self.state else {
            return LogPoll::Idle;
        };
        match result {
            Ok(text) => {
                state.content = LogContent::Ready(text);
                state.scroll_offset = 0;
                LogPoll::Ready
            }
            Err(err) => {
                warn!(container = %state.container_id, error = %err, "log fetch failed");
                state.content = LogContent::Failed;
                LogPoll::Failed(err)
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.fullscreen)
    }

    pub fn toggle_wrap(&mut self) {
        if let Some(state) = &mut self.state {
            state.wrap = !state.wrap;
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        if let Some(state) = &mut self.state {
            state.fullscreen = !state.fullscreen;
        }
    }

    /// Step the pane size, clamped to its supported range.
    pub fn adjust_pane(&mut self, delta: i32) {
        self.pane_rows = clamp_pane_rows(self.pane_rows as i32 + delta);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        if let Some(state) = &mut self.state {
            let max = state.display_text().lines().count().saturating_sub(1);
            state.scroll_offset = (state.scroll_offset + lines).min(max);
        }
    }

    pub fn scroll_down(&mut self, lines: usize) {
        if let Some(state) = &mut self.state {
            state.scroll_offset = state.scroll_offset.saturating_sub(lines);
        }
    }

    /// Write the currently displayed text to a timestamp-suffixed file in
    /// the working directory. Returns the path written, or None when the
    /// viewer is not open.
    pub fn download(&self) -> std::io::Result<Option<PathBuf>> {
        let Some(state) = &self.state else {
            return Ok(None);
        };
        let path = PathBuf::from(log_file_name(&state.container_name, Utc::now()));
        std::fs::write(&path, state.display_text())?;
        Ok(Some(path))
    }
}

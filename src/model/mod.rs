// Re-export all model types from submodules.

pub use app::{AppView, ContainerAction, Notice, NoticeKind};
pub use container::{
    ContainerRecord, ContainerStatus, IMAGE_PLACEHOLDER, NAME_PLACEHOLDER,
    is_valid_container_id, normalize_list,
};
pub use logs::{
    DEFAULT_LOG_PANE_ROWS, LOGS_FAILED, LOGS_LOADING, LogContent, LogViewState,
    MAX_LOG_PANE_ROWS, MIN_LOG_PANE_ROWS, NO_LOGS_FALLBACK, clamp_pane_rows,
    log_file_name, logs_text, sanitize_file_name,
};

mod app;
mod container;
mod logs;

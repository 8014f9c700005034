mod detail;
mod header;
mod logs;
mod shared;
mod summary;

use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Color, ResetColor, SetForegroundColor},
    terminal,
};

use crate::logview::LogSession;
use crate::model::ContainerRecord;

pub use header::{HEADER_ROWS, HeaderData};
pub use logs::visible_lines;
pub use shared::{safe_truncate, truncate_str, wrap_line};

/// Minimum terminal dimensions for usable rendering.
pub const MIN_COLS: u16 = 80;
pub const MIN_ROWS: u16 = 10;

pub struct Presenter;

impl Presenter {
    /// Check if the terminal is large enough. If not, render a "too small"
    /// message and return `true` (meaning "skip normal rendering").
    pub fn render_size_guard() -> io::Result<bool> {
        let (cols, rows) = terminal::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            let mut out = std::io::stdout();
            execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
            let msg = format!(
                "Terminal too small ({}x{}). Resize to at least {}x{}.",
                cols, rows, MIN_COLS, MIN_ROWS
            );
            let y = rows / 2;
            let x = cols.saturating_sub(msg.len() as u16) / 2;
            queue!(out, cursor::MoveTo(x, y), SetForegroundColor(Color::Yellow))?;
            write!(out, "{}", msg)?;
            queue!(out, ResetColor)?;
            out.flush()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn render_header(
        out: &mut impl Write,
        data: &HeaderData<'_>,
        time: &str,
    ) -> io::Result<()> {
        header::render_header(out, data, time)
    }

    pub fn render_summary(
        out: &mut impl Write,
        containers: &[ContainerRecord],
        cursor: usize,
        loading: bool,
    ) -> io::Result<()> {
        summary::render_summary(out, containers, cursor, loading)
    }

    pub fn render_detail(
        out: &mut impl Write,
        container: &ContainerRecord,
        action_in_progress: bool,
        logs: &LogSession,
    ) -> io::Result<()> {
        detail::render_detail(out, container, action_in_progress, logs)
    }

    pub fn render_logs_fullscreen(
        out: &mut impl Write,
        state: &crate::model::LogViewState,
    ) -> io::Result<()> {
        logs::render_logs_fullscreen(out, state)
    }
}

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    execute, queue,
    style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::model::LogViewState;

use super::shared::{safe_truncate, truncate_str, wrap_line, write_footer, writeln};

/// The window of log lines visible in a pane of the given size, honoring
/// the wrap setting and the scroll offset (lines up from the tail).
pub fn visible_lines(state: &LogViewState, width: usize, height: usize) -> Vec<String> {
    let mut display: Vec<String> = Vec::new();
    for line in state.display_text().lines() {
        if state.wrap {
            display.extend(wrap_line(line, width));
        } else {
            display.push(safe_truncate(line, width).to_string());
        }
    }
    if display.is_empty() {
        display.push(String::new());
    }

    let total = display.len();
    let bottom_start = total.saturating_sub(height);
    let start = bottom_start.saturating_sub(state.scroll_offset);
    display.into_iter().skip(start).take(height).collect()
}

/// One-line summary of the pane's display settings for headers.
pub fn display_settings_label(state: &LogViewState, pane_rows: u16) -> String {
    format!(
        "wrap {} | {} rows",
        if state.wrap { "on" } else { "off" },
        pane_rows
    )
}

/// Fullscreen log view: the whole terminal belongs to this session's logs.
pub fn render_logs_fullscreen(out: &mut impl Write, state: &LogViewState) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    let (cols, rows) = terminal::size()?;
    let width = cols as usize;
    let height = rows as usize;

    let header = format!(
        "  Logs: {} ({}) - wrap {}",
        truncate_str(&state.container_name, 24),
        state.container_id,
        if state.wrap { "on" } else { "off" },
    );
    queue!(out, SetAttribute(Attribute::Bold))?;
    writeln(out, &header)?;
    queue!(out, SetAttribute(Attribute::Reset))?;

    let sep: String = "─".repeat(width);
    queue!(out, SetForegroundColor(Color::DarkGrey))?;
    writeln(out, &sep)?;
    queue!(out, ResetColor)?;

    let log_area_height = height.saturating_sub(3);
    let lines = visible_lines(state, width, log_area_height);
    let mut lines_printed = 0;
    for line in &lines {
        writeln(out, line)?;
        lines_printed += 1;
    }
    for _ in lines_printed..log_area_height {
        writeln(out, "")?;
    }

    write_footer(
        out,
        "Esc/←: Exit fullscreen | ↑/↓: Scroll | w: Wrap | d: Download | l: Reload",
    )?;
    out.flush()?;
    Ok(())
}

use std::io::{self, Write};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use crate::model::ContainerStatus;

/// Truncate a string to at most `max_len` characters (not bytes), appending "..."
/// if truncated. Safe for multi-byte UTF-8.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else {
        let keep = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(keep).collect();
        format!("{}...", truncated)
    }
}

/// Truncate a string to at most `max_len` bytes for display. Returns a &str
/// slice up to the last valid char boundary within `max_len` bytes.
pub fn safe_truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Split a line into display chunks of at most `width` characters.
/// Empty input still yields one (empty) chunk so the line keeps its row.
pub fn wrap_line(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|chunk| chunk.iter().collect()).collect()
}

pub fn writeln(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "{}\r\n", text)
}

/// Print dimmed at an absolute position.
pub fn write_at_dim(out: &mut impl Write, x: u16, y: u16, text: &str) -> io::Result<()> {
    queue!(out, MoveTo(x, y), SetForegroundColor(Color::DarkGrey), Print(text), ResetColor)?;
    Ok(())
}

pub fn write_at_bold(out: &mut impl Write, x: u16, y: u16, text: &str) -> io::Result<()> {
    queue!(
        out,
        MoveTo(x, y),
        SetAttribute(Attribute::Bold),
        Print(text),
        SetAttribute(Attribute::Reset)
    )?;
    Ok(())
}

pub fn status_color(status: ContainerStatus) -> Color {
    match status {
        ContainerStatus::Running => Color::Green,
        ContainerStatus::Exited => Color::Red,
        ContainerStatus::Inactive => Color::DarkGrey,
    }
}

/// Colored status indicator dot.
pub fn write_status_dot(out: &mut impl Write, status: ContainerStatus) -> io::Result<()> {
    queue!(out, SetForegroundColor(status_color(status)), Print("●"), ResetColor)?;
    Ok(())
}

/// Help line pinned to the bottom row, padded to the full width.
pub fn write_footer(out: &mut impl Write, help: &str) -> io::Result<()> {
    let (cols, rows) = crossterm::terminal::size()?;
    let y = rows.saturating_sub(1);
    queue!(
        out,
        MoveTo(1, y),
        SetForegroundColor(Color::DarkGrey),
        Print(format!("{:<width$}", help, width = cols as usize)),
        ResetColor
    )?;
    Ok(())
}

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal,
};

use crate::logview::LogSession;
use crate::model::{ContainerRecord, ContainerStatus};

use super::header::HEADER_ROWS;
use super::logs::{display_settings_label, visible_lines};
use super::shared::{truncate_str, write_footer, write_status_dot, writeln};

fn write_control(out: &mut impl Write, label: &str, enabled: bool) -> io::Result<()> {
    if enabled {
        queue!(out, Print(label))?;
    } else {
        queue!(out, SetForegroundColor(Color::DarkGrey), Print(label), ResetColor)?;
    }
    queue!(out, Print("   "))?;
    Ok(())
}

/// Detail view for the selected container: header, status, action controls,
/// and the (collapsed or open) log panel.
pub fn render_detail(
    out: &mut impl Write,
    container: &ContainerRecord,
    action_in_progress: bool,
    logs: &LogSession,
) -> io::Result<()> {
    let (cols, _rows) = terminal::size()?;
    let width = cols as usize;

    queue!(out, MoveTo(0, HEADER_ROWS + 1))?;

    queue!(out, SetAttribute(Attribute::Bold))?;
    writeln(out, &format!("  {}", truncate_str(&container.name, width.saturating_sub(4))))?;
    queue!(out, SetAttribute(Attribute::Reset))?;

    queue!(out, Print("  Status: "))?;
    write_status_dot(out, container.status)?;
    writeln(out, &format!(" {}", container.status))?;
    writeln(out, &format!("  Image:  {}", truncate_str(&container.image, width.saturating_sub(10))))?;
    writeln(out, &format!("  Id:     {}", container.id))?;
    writeln(out, "")?;

    let running = container.status == ContainerStatus::Running;
    queue!(out, Print("  "))?;
    write_control(out, "[s] Start", !running && !action_in_progress)?;
    write_control(out, "[t] Stop", running && !action_in_progress)?;
    write_control(out, "[l] View Logs", !action_in_progress)?;
    writeln(out, "")?;
    writeln(out, "")?;

    match &logs.state {
        None => {
            queue!(out, SetAttribute(Attribute::Bold))?;
            writeln(out, "  Logs")?;
            queue!(out, SetAttribute(Attribute::Reset))?;
            queue!(out, SetForegroundColor(Color::DarkGrey))?;
            writeln(out, "  (collapsed - press l to load)")?;
            queue!(out, ResetColor)?;
        }
        Some(state) => {
            queue!(out, SetAttribute(Attribute::Bold))?;
            writeln(out, &format!("  Logs - {}", display_settings_label(state, logs.pane_rows)))?;
            queue!(out, SetAttribute(Attribute::Reset))?;

            let pane_width = width.saturating_sub(4);
            for line in visible_lines(state, pane_width, logs.pane_rows as usize) {
                writeln(out, &format!("  {}", line))?;
            }
        }
    }

    let help = if logs.is_open() {
        "Esc/←: Close logs | ↑/↓: Scroll | w: Wrap | f: Fullscreen | d: Download | +/-: Pane size | s/t: Start/Stop"
    } else {
        "q/Esc/←: Back | s: Start | t: Stop | l: Logs | r: Refresh | x: Dismiss notice"
    };
    write_footer(out, help)?;
    Ok(())
}

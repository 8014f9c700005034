use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::model::{Notice, NoticeKind};

use super::shared::{write_at_bold, write_at_dim};

/// Rows the header occupies; content starts below this.
pub const HEADER_ROWS: u16 = 3;

pub struct HeaderData<'a> {
    pub title: &'a str,
    pub container_count: usize,
    pub auto_refresh_minutes: Option<u32>, // None when auto-refresh is off
    pub refreshing: bool,
    pub action_pending: bool,
    pub notice: Option<&'a Notice>,
}

pub fn render_header(out: &mut impl Write, data: &HeaderData<'_>, time: &str) -> io::Result<()> {
    let (cols, _rows) = crossterm::terminal::size()?;
    let width = cols as usize;

    // Title line with a right-aligned clock
    write_at_bold(out, 1, 0, &format!("quaywatch · {}", data.title))?;
    let clock_x = cols.saturating_sub(time.len() as u16 + 1);
    write_at_dim(out, clock_x, 0, time)?;

    // Status line
    let refresh = match data.auto_refresh_minutes {
        Some(minutes) => format!("auto-refresh: every {}m", minutes),
        None => "auto-refresh: off".to_string(),
    };
    let mut status = format!("{} containers | {}", data.container_count, refresh);
    if data.refreshing {
        status.push_str(" | refreshing...");
    }
    if data.action_pending {
        status.push_str(" | action pending...");
    }
    write_at_dim(out, 1, 1, &status)?;

    // Notice line, or a plain separator when there is nothing to say
    match data.notice {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Error => Color::Red,
                NoticeKind::Success => Color::Green,
            };
            queue!(
                out,
                MoveTo(1, 2),
                SetForegroundColor(color),
                Print(super::shared::truncate_str(&notice.text, width.saturating_sub(2))),
                ResetColor
            )?;
        }
        None => {
            let sep: String = "─".repeat(width);
            write_at_dim(out, 0, 2, &sep)?;
        }
    }
    Ok(())
}

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::model::{ContainerRecord, ContainerStatus};

use super::header::HEADER_ROWS;
use super::shared::{
    truncate_str, write_at_bold, write_at_dim, write_footer, write_status_dot,
};

const SIDEBAR_WIDTH: u16 = 30;

const BUCKETS: [(&str, &str, ContainerStatus); 3] = [
    ("RUNNING", "No running containers", ContainerStatus::Running),
    ("EXITED", "No exited containers", ContainerStatus::Exited),
    ("INACTIVE", "No inactive containers", ContainerStatus::Inactive),
];

/// Summary view: a sidebar listing every container in server order, plus
/// three status buckets. Buckets show an empty-state placeholder rather
/// than collapsing.
pub fn render_summary(
    out: &mut impl Write,
    containers: &[ContainerRecord],
    cursor: usize,
    loading: bool,
) -> io::Result<()> {
    let (_cols, rows) = crossterm::terminal::size()?;
    let top = HEADER_ROWS + 1;
    let footer_y = rows.saturating_sub(1);

    // Sidebar
    write_at_bold(out, 1, top, "CONTAINERS")?;
    if loading {
        write_at_dim(out, 1, top + 1, "Loading containers...")?;
    } else if containers.is_empty() {
        write_at_dim(out, 1, top + 1, "No containers found")?;
    } else {
        for (idx, container) in containers.iter().enumerate() {
            let y = top + 1 + idx as u16;
            if y >= footer_y {
                break;
            }
            queue!(out, MoveTo(1, y))?;
            write_status_dot(out, container.status)?;
            let selected = idx == cursor;
            if selected {
                queue!(out, SetBackgroundColor(Color::DarkGrey), SetForegroundColor(Color::White))?;
            }
            queue!(
                out,
                Print(format!(" {}", truncate_str(&container.name, SIDEBAR_WIDTH as usize - 5)))
            )?;
            if selected {
                queue!(out, ResetColor)?;
            }
        }
    }

    // Divider between sidebar and buckets
    for y in top..footer_y {
        write_at_dim(out, SIDEBAR_WIDTH, y, "│")?;
    }

    // Status buckets
    let x = SIDEBAR_WIDTH + 2;
    let mut y = top;
    for (title, empty_label, status) in BUCKETS {
        if y >= footer_y {
            break;
        }
        let members: Vec<&ContainerRecord> =
            containers.iter().filter(|c| c.status == status).collect();
        write_at_bold(out, x, y, &format!("{} ({})", title, members.len()))?;
        y += 1;

        if loading {
            write_at_dim(out, x + 1, y, "Loading...")?;
            y += 1;
        } else if members.is_empty() {
            write_at_dim(out, x + 1, y, empty_label)?;
            y += 1;
        } else {
            for container in members {
                if y >= footer_y {
                    break;
                }
                queue!(out, MoveTo(x + 1, y))?;
                write_status_dot(out, container.status)?;
                queue!(out, Print(format!(" {}", truncate_str(&container.name, 24))))?;
                queue!(
                    out,
                    SetForegroundColor(Color::DarkGrey),
                    Print(format!("  {}", truncate_str(&container.image, 32))),
                    ResetColor
                )?;
                y += 1;
            }
        }
        y += 1; // gap between buckets
    }

    write_footer(
        out,
        "q: Quit | ↑/↓: Navigate | Enter/→: Details | r: Refresh | a: Auto-refresh on/off | +/-: Interval | x: Dismiss notice",
    )?;
    Ok(())
}

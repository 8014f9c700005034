use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use crate::model::AppView;
use crate::view::{HeaderData, Presenter};

use super::App;

pub fn render(app: &mut App) -> io::Result<()> {
    let mut out = io::stdout();

    // detail without a surviving selection falls back to the summary
    if app.view == AppView::Detail && app.monitor.selected_container().is_none() {
        app.view = AppView::Summary;
    }

    // fullscreen logs own the whole frame
    if app.view == AppView::Detail && app.monitor.logs.is_fullscreen() {
        if let Some(state) = &app.monitor.logs.state {
            return Presenter::render_logs_fullscreen(&mut out, state);
        }
    }

    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    let time = chrono::Local::now().format("%H:%M:%S").to_string();
    let title = match app.view {
        AppView::Summary => "Dashboard",
        AppView::Detail => "Container Details",
    };
    let header = HeaderData {
        title,
        container_count: app.monitor.containers.len(),
        auto_refresh_minutes: app
            .scheduler
            .is_enabled()
            .then(|| app.scheduler.minutes()),
        refreshing: app.monitor.list_in_flight,
        action_pending: app.monitor.action_in_progress,
        notice: app.monitor.notice.as_ref(),
    };
    Presenter::render_header(&mut out, &header, &time)?;

    match app.view {
        AppView::Summary => {
            let loading = !app.monitor.has_snapshot && app.monitor.list_in_flight;
            Presenter::render_summary(&mut out, &app.monitor.containers, app.monitor.cursor, loading)?;
        }
        AppView::Detail => {
            if let Some(container) = app.monitor.selected_container() {
                let container = container.clone();
                Presenter::render_detail(
                    &mut out,
                    &container,
                    app.monitor.action_in_progress,
                    &app.monitor.logs,
                )?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

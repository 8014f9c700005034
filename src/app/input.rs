use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{AppView, ContainerAction, ContainerStatus, Notice};

use super::App;

/// Result of handling a key: Quit the app, or key was consumed (needs
/// render). None means the key was not handled.
pub enum InputResult {
    Quit,
    Consumed,
}

pub fn handle_key(app: &mut App, key_event: KeyEvent) -> Option<InputResult> {
    let KeyEvent { code, modifiers, .. } = key_event;

    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputResult::Quit);
    }

    match app.view {
        AppView::Summary => handle_summary(app, code),
        AppView::Detail => handle_detail(app, code),
    }
}

fn handle_summary(app: &mut App, code: KeyCode) -> Option<InputResult> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(InputResult::Quit),
        KeyCode::Up => {
            if app.monitor.cursor > 0 {
                app.monitor.cursor -= 1;
                return Some(InputResult::Consumed);
            }
            None
        }
        KeyCode::Down => {
            if app.monitor.cursor + 1 < app.monitor.containers.len() {
                app.monitor.cursor += 1;
                return Some(InputResult::Consumed);
            }
            None
        }
        KeyCode::Enter | KeyCode::Right => {
            let id = app.monitor.highlighted_container()?.id.clone();
            app.monitor.select(&id);
            app.view = AppView::Detail;
            Some(InputResult::Consumed)
        }
        KeyCode::Char('r') => {
            app.monitor.begin_refresh();
            Some(InputResult::Consumed)
        }
        KeyCode::Char('a') => {
            if app.scheduler.is_enabled() {
                app.scheduler.stop();
            } else {
                app.scheduler.start(Instant::now());
            }
            Some(InputResult::Consumed)
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.scheduler.adjust_minutes(1, Instant::now());
            Some(InputResult::Consumed)
        }
        KeyCode::Char('-') => {
            app.scheduler.adjust_minutes(-1, Instant::now());
            Some(InputResult::Consumed)
        }
        KeyCode::Char('x') => {
            app.monitor.dismiss_notice();
            Some(InputResult::Consumed)
        }
        _ => None,
    }
}

fn handle_detail(app: &mut App, code: KeyCode) -> Option<InputResult> {
    if app.monitor.logs.is_open() {
        match code {
            KeyCode::Esc | KeyCode::Left => {
                // fullscreen steps down first, a second press closes
                if app.monitor.logs.is_fullscreen() {
                    app.monitor.logs.toggle_fullscreen();
                } else {
                    app.monitor.logs.close();
                }
                return Some(InputResult::Consumed);
            }
            KeyCode::Up => {
                app.monitor.logs.scroll_up(1);
                return Some(InputResult::Consumed);
            }
            KeyCode::Down => {
                app.monitor.logs.scroll_down(1);
                return Some(InputResult::Consumed);
            }
            KeyCode::Char('w') => {
                app.monitor.logs.toggle_wrap();
                return Some(InputResult::Consumed);
            }
            KeyCode::Char('f') => {
                app.monitor.logs.toggle_fullscreen();
                return Some(InputResult::Consumed);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                app.monitor.logs.adjust_pane(1);
                return Some(InputResult::Consumed);
            }
            KeyCode::Char('-') => {
                app.monitor.logs.adjust_pane(-1);
                return Some(InputResult::Consumed);
            }
            KeyCode::Char('d') => {
                match app.monitor.logs.download() {
                    Ok(Some(path)) => {
                        app.monitor.notice =
                            Some(Notice::success(format!("Saved logs to {}", path.display())));
                    }
                    Ok(None) => {}
                    Err(err) => {
                        app.monitor.notice =
                            Some(Notice::error(format!("Could not save logs: {err}")));
                    }
                }
                return Some(InputResult::Consumed);
            }
            _ => {} // remaining keys share the plain detail bindings
        }
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Left | KeyCode::Char('b') => {
            app.back();
            Some(InputResult::Consumed)
        }
        KeyCode::Char('s') => dispatch_if_allowed(app, ContainerAction::Start),
        KeyCode::Char('t') => dispatch_if_allowed(app, ContainerAction::Stop),
        KeyCode::Char('l') => {
            // all action controls stay off while a command is in flight
            if app.monitor.action_in_progress {
                return None;
            }
            app.monitor.open_logs();
            Some(InputResult::Consumed)
        }
        KeyCode::Char('r') => {
            app.monitor.begin_refresh();
            Some(InputResult::Consumed)
        }
        KeyCode::Char('x') => {
            app.monitor.dismiss_notice();
            Some(InputResult::Consumed)
        }
        _ => None,
    }
}

/// Start is available only for non-running containers, Stop only for
/// running ones; a disabled control swallows the key.
fn dispatch_if_allowed(app: &mut App, action: ContainerAction) -> Option<InputResult> {
    let container = app.monitor.selected_container()?;
    let running = container.status == ContainerStatus::Running;
    let allowed = match action {
        ContainerAction::Start => !running,
        ContainerAction::Stop => running,
    };
    if !allowed {
        return None;
    }
    let id = container.id.clone();
    app.monitor.dispatch(&id, action);
    Some(InputResult::Consumed)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyCode, KeyEvent};

    use crate::model::{AppView, ContainerRecord, ContainerStatus};

    use super::super::{App, Options};
    use super::{InputResult, handle_key};

    const ID_A: &str = "aaaaaaaaaaaa";
    const ID_B: &str = "bbbbbbbbbbbb";

    fn app_with_containers() -> (Arc<tokio::runtime::Runtime>, App) {
        let rt = Arc::new(
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap(),
        );
        let options = Options {
            api_url: "http://127.0.0.1:9".to_string(),
            refresh_minutes: 5,
            auto_refresh: false,
        };
        let mut app = App::new(Arc::clone(&rt), &options).unwrap();
        app.monitor.containers = vec![
            ContainerRecord {
                id: ID_A.to_string(),
                name: "web".to_string(),
                image: "nginx".to_string(),
                status: ContainerStatus::Running,
            },
            ContainerRecord {
                id: ID_B.to_string(),
                name: "db".to_string(),
                image: "postgres".to_string(),
                status: ContainerStatus::Exited,
            },
        ];
        app.monitor.has_snapshot = true;
        (rt, app)
    }

    fn key(app: &mut App, code: KeyCode) -> Option<InputResult> {
        handle_key(app, KeyEvent::from(code))
    }

    #[test]
    fn enter_selects_the_highlighted_container() {
        let (_rt, mut app) = app_with_containers();
        app.monitor.cursor = 1;
        assert!(matches!(key(&mut app, KeyCode::Enter), Some(InputResult::Consumed)));
        assert_eq!(app.view, AppView::Detail);
        assert_eq!(app.monitor.selected_id.as_deref(), Some(ID_B));
    }

    #[test]
    fn back_keeps_the_selection() {
        let (_rt, mut app) = app_with_containers();
        app.monitor.select(ID_A);
        app.view = AppView::Detail;
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.view, AppView::Summary);
        assert_eq!(app.monitor.selected_id.as_deref(), Some(ID_A));
    }

    #[test]
    fn start_is_refused_for_a_running_container() {
        let (_rt, mut app) = app_with_containers();
        app.monitor.select(ID_A); // running
        app.view = AppView::Detail;
        assert!(key(&mut app, KeyCode::Char('s')).is_none());
        assert!(!app.monitor.action_in_progress);
    }

    #[test]
    fn stop_dispatches_for_a_running_container() {
        let (_rt, mut app) = app_with_containers();
        app.monitor.select(ID_A);
        app.view = AppView::Detail;
        assert!(matches!(key(&mut app, KeyCode::Char('t')), Some(InputResult::Consumed)));
        assert!(app.monitor.action_in_progress);
    }

    #[test]
    fn start_dispatches_for_an_exited_container() {
        let (_rt, mut app) = app_with_containers();
        app.monitor.select(ID_B);
        app.view = AppView::Detail;
        assert!(matches!(key(&mut app, KeyCode::Char('s')), Some(InputResult::Consumed)));
        assert!(app.monitor.action_in_progress);
    }

    #[test]
    fn escape_closes_the_log_pane_before_leaving_detail() {
        let (_rt, mut app) = app_with_containers();
        app.monitor.select(ID_A);
        app.view = AppView::Detail;
        app.monitor.open_logs();
        assert!(app.monitor.logs.is_open());

        key(&mut app, KeyCode::Esc);
        assert!(!app.monitor.logs.is_open());
        assert_eq!(app.view, AppView::Detail);

        key(&mut app, KeyCode::Esc);
        assert_eq!(app.view, AppView::Summary);
    }

    #[test]
    fn escape_steps_out_of_fullscreen_first() {
        let (_rt, mut app) = app_with_containers();
        app.monitor.select(ID_A);
        app.view = AppView::Detail;
        app.monitor.open_logs();
        key(&mut app, KeyCode::Char('f'));
        assert!(app.monitor.logs.is_fullscreen());

        key(&mut app, KeyCode::Esc);
        assert!(app.monitor.logs.is_open());
        assert!(!app.monitor.logs.is_fullscreen());
    }

    #[test]
    fn summary_navigation_clamps_at_the_ends() {
        let (_rt, mut app) = app_with_containers();
        assert!(key(&mut app, KeyCode::Up).is_none());
        assert!(matches!(key(&mut app, KeyCode::Down), Some(InputResult::Consumed)));
        assert_eq!(app.monitor.cursor, 1);
        assert!(key(&mut app, KeyCode::Down).is_none());
    }

    #[test]
    fn auto_refresh_toggle_arms_and_disarms() {
        let (_rt, mut app) = app_with_containers();
        assert!(!app.scheduler.is_enabled());
        key(&mut app, KeyCode::Char('a'));
        assert!(app.scheduler.is_enabled());
        key(&mut app, KeyCode::Char('a'));
        assert!(!app.scheduler.is_enabled());
    }
}

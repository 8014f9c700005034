use std::time::Instant;

use crate::fleet::ListPoll;
use crate::model::AppView;

use super::App;

impl App {
    /// Consume a due auto-refresh tick. The timer and the manual refresh
    /// key share the monitor's fetch path, so both inherit its
    /// single-in-flight guarantee.
    pub fn process_tick(&mut self, now: Instant) -> bool {
        if self.scheduler.take_due(now) {
            self.monitor.begin_refresh();
            true
        } else {
            false
        }
    }

    /// Drain completed background work into state.
    pub fn poll_fetches(&mut self) -> bool {
        let mut needs_render = false;

        let outcome = self.monitor.poll_refresh();
        if self.note_list_outcome(outcome) {
            needs_render = true;
        }
        if self.monitor.poll_logs() {
            needs_render = true;
        }
        if self.monitor.action_in_progress && self.monitor.poll_action() {
            needs_render = true;
        }

        needs_render
    }

    /// Fold a list-fetch outcome into the view state. A selection that
    /// vanished from the snapshot forces the detail view back to summary.
    fn note_list_outcome(&mut self, outcome: ListPoll) -> bool {
        match outcome {
            ListPoll::Updated { selection_lost } => {
                if selection_lost && self.view == AppView::Detail {
                    self.view = AppView::Summary;
                    self.monitor.logs.close();
                }
                true
            }
            ListPoll::Failed => true,
            ListPoll::Idle => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use crate::fleet::ListPoll;
    use crate::model::AppView;

    use super::super::{App, Options};

    fn app() -> (Arc<tokio::runtime::Runtime>, App) {
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
        let app = App::new(Arc::clone(&rt), &options).unwrap();
        (rt, app)
    }

    #[test]
    fn lost_selection_forces_summary() {
        let (_rt, mut app) = app();
        app.view = AppView::Detail;
        assert!(app.note_list_outcome(ListPoll::Updated { selection_lost: true }));
        assert_eq!(app.view, AppView::Summary);
    }

    #[test]
    fn surviving_selection_stays_in_detail() {
        let (_rt, mut app) = app();
        app.view = AppView::Detail;
        assert!(app.note_list_outcome(ListPoll::Updated { selection_lost: false }));
        assert_eq!(app.view, AppView::Detail);
    }

    #[test]
    fn failed_fetch_keeps_the_current_view() {
        let (_rt, mut app) = app();
        app.view = AppView::Detail;
        assert!(app.note_list_outcome(ListPoll::Failed));
        assert_eq!(app.view, AppView::Detail);
    }

    #[test]
    fn disabled_scheduler_never_ticks() {
        let (_rt, mut app) = app();
        assert!(!app.process_tick(Instant::now() + Duration::from_secs(3600)));
        assert!(!app.monitor.list_in_flight);
    }

    #[test]
    fn enabled_scheduler_triggers_the_fetch_path() {
        let (_rt, mut app) = app();
        app.scheduler.start(Instant::now());
        assert!(app.process_tick(Instant::now()));
        assert!(app.monitor.list_in_flight);
    }
}

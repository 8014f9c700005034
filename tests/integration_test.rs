//! Integration tests across the public module surface: normalization,
//! scheduling policy, session state, and the pure view helpers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;

use quaywatch::api::ApiClient;
use quaywatch::fleet::FleetMonitor;
use quaywatch::model::{
    AppView, ContainerStatus, LogViewState, NAME_PLACEHOLDER, Notice, NoticeKind, normalize_list,
};
use quaywatch::scheduler::RefreshScheduler;
use quaywatch::view::{Presenter, safe_truncate, truncate_str, wrap_line};

fn runtime() -> Arc<tokio::runtime::Runtime> {
    Arc::new(
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap(),
    )
}

#[test]
fn model_types_construct() {
    let _ = LogViewState::new("abc123abc123".into(), "web".into());
    let _ = Notice::error("x");
    assert!(matches!(AppView::Summary, AppView::Summary));
}

#[test]
fn normalize_scenario_running_entry() {
    let payload = json!([
        {"id": "abc123abc123", "name": "web", "image": "nginx", "status": "RUNNING"}
    ]);
    let records = normalize_list(payload).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "web");
    assert_eq!(records[0].status, ContainerStatus::Running);
}

#[test]
fn normalize_defaults_blank_name() {
    let payload = json!([{"id": "abc123abc123", "name": "  ", "status": "exited"}]);
    let records = normalize_list(payload).unwrap();
    assert_eq!(records[0].name, NAME_PLACEHOLDER);
}

#[test]
fn scheduler_clamps_like_the_bounds() {
    let mut zero = RefreshScheduler::new(0, true);
    let mut one = RefreshScheduler::new(1, true);
    let mut huge = RefreshScheduler::new(500, true);
    let now = Instant::now();

    assert_eq!(zero.minutes(), one.minutes());
    assert_eq!(zero.take_due(now), one.take_due(now));

    assert_eq!(huge.minutes(), 120);
    assert!(huge.take_due(now));
    assert!(!huge.take_due(now + Duration::from_secs(60)));
}

#[test]
fn scheduler_stop_twice_is_one_stop() {
    let mut sched = RefreshScheduler::new(5, true);
    sched.stop();
    let minutes = sched.minutes();
    sched.stop();
    assert_eq!(sched.minutes(), minutes);
    assert!(!sched.is_enabled());
}

#[test]
fn monitor_rejects_bad_action_input_locally() {
    let rt = runtime();
    let client = Arc::new(ApiClient::new("http://127.0.0.1:9").unwrap());
    let mut monitor = FleetMonitor::new(client, rt);
    monitor.dispatch("nope", quaywatch::model::ContainerAction::Start);
    assert!(!monitor.action_in_progress);
    let notice = monitor.notice.as_ref().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
}

#[test]
fn view_helpers_pure() {
    assert_eq!(truncate_str("hello", 5), "hello");
    assert_eq!(truncate_str("hello world", 8), "hello...");
    assert_eq!(safe_truncate("café", 10), "café");
    assert_eq!(wrap_line("abcdef", 3), vec!["abc", "def"]);
}

#[test]
fn presenter_render_size_guard_checks_terminal() {
    // Just verify the function exists and returns a Result.
    // In headless environments (Docker, CI) there is no tty, so
    // terminal::size() may return an error — that's expected and fine.
    let _result = Presenter::render_size_guard();
    // We intentionally don't assert is_ok() because the outcome
    // depends on whether a real terminal is attached.
}

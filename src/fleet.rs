use std::sync::Arc;
use std::sync::mpsc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::logview::{LogPoll, LogSession};
use crate::model::{
    ContainerAction, ContainerRecord, Notice, NoticeKind, is_valid_container_id, normalize_list,
};

/// Receiver for a background list fetch, tagged with its generation.
type ListReceiver = mpsc::Receiver<Result<Vec<ContainerRecord>, ApiError>>;
/// Receiver for background action results: ready-made user-facing messages.
type ActionReceiver = mpsc::Receiver<Result<String, String>>;

pub const LIST_FETCH_FAILED: &str = "Could not load containers. Check server/API connectivity.";

/// Outcome of draining the list fetch channel.
pub enum ListPoll {
    Idle,
    Updated { selection_lost: bool },
    Failed,
}

/// Owns the container snapshot and everything that mutates it: list fetch
/// lifecycle, selection, start/stop actions, notices, and the log viewer
/// session. Mutated only from the main loop; background work reports back
/// through channels drained by the `poll_*` methods.
pub struct FleetMonitor {
    client: Arc<ApiClient>,
    rt: Arc<tokio::runtime::Runtime>,
    pub containers: Vec<ContainerRecord>,
    pub cursor: usize,
    pub selected_id: Option<String>,
    pub notice: Option<Notice>,
    pub logs: LogSession,
    /// False until the first successful fetch; drives the initial placeholder.
    pub has_snapshot: bool,
    pub list_in_flight: bool,
    list_generation: u64,
    list_receiver: Option<(u64, ListReceiver)>,
    list_task: Option<JoinHandle<()>>,
    action_receiver: Option<ActionReceiver>,
    pub action_in_progress: bool,
}

impl FleetMonitor {
    pub fn new(client: Arc<ApiClient>, rt: Arc<tokio::runtime::Runtime>) -> Self {
        let logs = LogSession::new(Arc::clone(&client), rt.handle().clone());
        Self {
            client,
            rt,
            containers: Vec::new(),
            cursor: 0,
            selected_id: None,
            notice: None,
            logs,
            has_snapshot: false,
            list_in_flight: false,
            list_generation: 0,
            list_receiver: None,
            list_task: None,
            action_receiver: None,
            action_in_progress: false,
        }
    }

    /// Issue a list fetch, superseding any in-flight one. Both the refresh
    /// timer and the manual refresh key funnel through here.
    pub fn begin_refresh(&mut self) {
        if let Some(task) = self.list_task.take() {
            task.abort();
        }
        self.list_generation += 1;
        let generation = self.list_generation;

        let (tx, rx) = mpsc::channel();
        self.list_receiver = Some((generation, rx));
        self.list_in_flight = true;

        let client = Arc::clone(&self.client);
        self.list_task = Some(self.rt.spawn(async move {
            let result = match client.list_containers().await {
                Ok(payload) => normalize_list(payload),
                Err(err) => Err(err),
            };
            let _ = tx.send(result);
        }));
        debug!(generation, "container list fetch issued");
    }

    /// Drain a completed list fetch. A failed fetch leaves the prior
    /// snapshot untouched apart from an error notice; a superseded one is
    /// discarded without touching anything.
    pub fn poll_refresh(&mut self) -> ListPoll {
        let Some((generation, rx)) = &self.list_receiver else {
            return ListPoll::Idle;
        };
        let generation = *generation;
        match rx.try_recv() {
            Ok(result) => {
                self.list_receiver = None;
                self.apply_list(generation, result)
            }
            Err(mpsc::TryRecvError::Empty) => ListPoll::Idle,
            Err(mpsc::TryRecvError::Disconnected) => {
                // sender dropped without a result: aborted, settle silently
                self.list_receiver = None;
                if generation == self.list_generation {
                    self.list_in_flight = false;
                }
                ListPoll::Idle
            }
        }
    }

    fn apply_list(
        &mut self,
        generation: u64,
        result: Result<Vec<ContainerRecord>, ApiError>,
    ) -> ListPoll {
        if generation != self.list_generation {
            return ListPoll::Idle;
        }
        self.list_in_flight = false;
        self.list_task = None;
        match result {
            Ok(containers) => {
                debug!(count = containers.len(), "container snapshot replaced");
                self.containers = containers;
                self.has_snapshot = true;

                let total = self.containers.len();
                if self.cursor >= total && total > 0 {
                    self.cursor = total - 1;
                }

                let mut selection_lost = false;
                if let Some(id) = &self.selected_id {
                    if !self.containers.iter().any(|c| &c.id == id) {
                        self.selected_id = None;
                        selection_lost = true;
                    }
                }

                // stale error notices clear on a good fetch; success notices
                // from a just-completed action stay visible
                if matches!(&self.notice, Some(n) if n.kind == NoticeKind::Error) {
                    self.notice = None;
                }
                ListPoll::Updated { selection_lost }
            }
            Err(err) => {
                warn!(error = %err, "container list fetch failed");
                self.notice = Some(Notice::error(LIST_FETCH_FAILED));
                ListPoll::Failed
            }
        }
    }

    pub fn selected_container(&self) -> Option<&ContainerRecord> {
        let id = self.selected_id.as_deref()?;
        self.containers.iter().find(|c| c.id == id)
    }

    pub fn highlighted_container(&self) -> Option<&ContainerRecord> {
        self.containers.get(self.cursor)
    }

    /// Select a container for the detail view. Clears any notice and
    /// collapses the log panel, like a fresh detail render.
    pub fn select(&mut self, id: &str) {
        self.selected_id = Some(id.to_string());
        self.notice = None;
        self.logs.close();
    }

    /// Issue a start/stop command. Input is validated locally first; while a
    /// command is in flight further ones are refused.
    pub fn dispatch(&mut self, container_id: &str, action: ContainerAction) {
        if !is_valid_container_id(container_id) {
            self.notice = Some(Notice::error("Invalid container ID."));
            return;
        }
        if self.action_in_progress {
            self.notice = Some(Notice::error("An action is already in progress..."));
            return;
        }

        let (tx, rx) = mpsc::channel();
        self.action_receiver = Some(rx);
        self.action_in_progress = true;
        self.notice = None;

        let client = Arc::clone(&self.client);
        let id = container_id.to_string();
        let verb = action.verb();
        self.rt.spawn(async move {
            let result = match action {
                ContainerAction::Start => client.start_container(&id).await,
                ContainerAction::Stop => client.stop_container(&id).await,
            };
            let message = result
                .map(|_| format!("Container {verb} command sent."))
                .map_err(|e| format!("Failed to {verb} container: {e}"));
            let _ = tx.send(message);
        });
        debug!(container = container_id, action = verb, "container action issued");
    }

    /// Drain a completed action. The in-progress guard clears on every
    /// completion path; success re-triggers the list fetch so the detail
    /// view re-synchronizes with fresh status.
    pub fn poll_action(&mut self) -> bool {
        let Some(rx) = &self.action_receiver else {
            return false;
        };
        match rx.try_recv() {
            Ok(Ok(message)) => {
                self.notice = Some(Notice::success(message));
                self.action_in_progress = false;
                self.action_receiver = None;
                self.logs.close();
                self.begin_refresh();
                true
            }
            Ok(Err(message)) => {
                warn!(error = %message, "container action failed");
                self.notice = Some(Notice::error(message));
                self.action_in_progress = false;
                self.action_receiver = None;
                true
            }
            Err(mpsc::TryRecvError::Empty) => false,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.notice = Some(Notice::error("Action failed unexpectedly"));
                self.action_in_progress = false;
                self.action_receiver = None;
                true
            }
        }
    }

    /// Open the log viewer for the selected container.
    pub fn open_logs(&mut self) {
        let Some(container) = self.selected_container() else {
            return;
        };
        let (id, name) = (container.id.clone(), container.name.clone());
        if self.logs.open(&id, &name) {
            self.notice = None;
        } else {
            self.notice = Some(Notice::error("Invalid container ID."));
        }
    }

    /// Drain a completed log fetch; failures also surface as a notice.
    pub fn poll_logs(&mut self) -> bool {
        match self.logs.poll() {
            LogPoll::Idle => false,
            LogPoll::Ready => true,
            LogPoll::Failed(err) => {
                self.notice = Some(Notice::error(format!("Could not load logs: {err}")));
                true
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::model::ContainerStatus;

    use super::*;

    const ID_A: &str = "aaaaaaaaaaaa";
    const ID_B: &str = "bbbbbbbbbbbb";

    fn record(id: &str, status: ContainerStatus) -> ContainerRecord {
        ContainerRecord {
            id: id.to_string(),
            name: format!("c-{id}"),
            image: "img:latest".to_string(),
            status,
        }
    }

    fn monitor() -> (Arc<tokio::runtime::Runtime>, FleetMonitor) {
        let rt = Arc::new(
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap(),
        );
        let client = Arc::new(ApiClient::new("http://127.0.0.1:9").unwrap());
        let monitor = FleetMonitor::new(client, Arc::clone(&rt));
        (rt, monitor)
    }

    #[test]
    fn snapshot_replaces_wholesale_and_clamps_cursor() {
        let (_rt, mut m) = monitor();
        m.containers = vec![
            record(ID_A, ContainerStatus::Running),
            record(ID_B, ContainerStatus::Exited),
        ];
        m.cursor = 1;
        m.begin_refresh();
        let outcome = m.apply_list(m.list_generation, Ok(vec![record(ID_A, ContainerStatus::Running)]));
        assert!(matches!(outcome, ListPoll::Updated { selection_lost: false }));
        assert_eq!(m.containers.len(), 1);
        assert_eq!(m.cursor, 0);
        assert!(m.has_snapshot);
        assert!(!m.list_in_flight);
    }

    #[test]
    fn failed_fetch_leaves_prior_snapshot_with_error_notice() {
        let (_rt, mut m) = monitor();
        m.containers = vec![record(ID_A, ContainerStatus::Running)];
        m.has_snapshot = true;
        m.begin_refresh();
        let outcome = m.apply_list(m.list_generation, Err(ApiError::InvalidPayload));
        assert!(matches!(outcome, ListPoll::Failed));
        assert_eq!(m.containers.len(), 1);
        let notice = m.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text, LIST_FETCH_FAILED);
    }

    #[test]
    fn superseded_list_results_are_discarded() {
        let (_rt, mut m) = monitor();
        m.begin_refresh();
        let stale_generation = m.list_generation;
        m.begin_refresh();
        let outcome = m.apply_list(stale_generation, Ok(vec![record(ID_A, ContainerStatus::Running)]));
        assert!(matches!(outcome, ListPoll::Idle));
        assert!(m.containers.is_empty());
        assert!(m.list_in_flight);
    }

    #[test]
    fn vanished_selection_is_cleared_and_reported() {
        let (_rt, mut m) = monitor();
        m.containers = vec![record(ID_A, ContainerStatus::Running)];
        m.selected_id = Some(ID_A.to_string());
        m.begin_refresh();
        let outcome = m.apply_list(m.list_generation, Ok(vec![record(ID_B, ContainerStatus::Running)]));
        assert!(matches!(outcome, ListPoll::Updated { selection_lost: true }));
        assert!(m.selected_id.is_none());
    }

    #[test]
    fn surviving_selection_is_kept() {
        let (_rt, mut m) = monitor();
        m.selected_id = Some(ID_A.to_string());
        m.begin_refresh();
        let outcome = m.apply_list(m.list_generation, Ok(vec![record(ID_A, ContainerStatus::Exited)]));
        assert!(matches!(outcome, ListPoll::Updated { selection_lost: false }));
        assert_eq!(m.selected_id.as_deref(), Some(ID_A));
        assert_eq!(m.selected_container().unwrap().status, ContainerStatus::Exited);
    }

    #[test]
    fn good_fetch_clears_error_notice_but_keeps_success() {
        let (_rt, mut m) = monitor();
        m.notice = Some(Notice::error("stale"));
        m.begin_refresh();
        m.apply_list(m.list_generation, Ok(vec![]));
        assert!(m.notice.is_none());

        m.notice = Some(Notice::success("Container start command sent."));
        m.begin_refresh();
        m.apply_list(m.list_generation, Ok(vec![]));
        assert_eq!(m.notice.as_ref().unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn dispatch_rejects_invalid_id_before_any_request() {
        let (_rt, mut m) = monitor();
        m.dispatch("not-hex", ContainerAction::Start);
        assert!(!m.action_in_progress);
        assert_eq!(m.notice.as_ref().unwrap().text, "Invalid container ID.");
    }

    #[test]
    fn dispatch_refuses_while_action_in_flight() {
        let (_rt, mut m) = monitor();
        m.dispatch(ID_A, ContainerAction::Start);
        assert!(m.action_in_progress);
        m.dispatch(ID_A, ContainerAction::Stop);
        assert_eq!(
            m.notice.as_ref().unwrap().text,
            "An action is already in progress..."
        );
    }

    #[test]
    fn action_success_reenables_notifies_and_refetches() {
        let (_rt, mut m) = monitor();
        let (tx, rx) = mpsc::channel();
        m.action_receiver = Some(rx);
        m.action_in_progress = true;
        tx.send(Ok("Container start command sent.".to_string())).unwrap();

        assert!(m.poll_action());
        assert!(!m.action_in_progress);
        let notice = m.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert!(m.list_in_flight); // refresh path re-triggered
    }

    #[test]
    fn action_failure_reenables_with_error_detail() {
        let (_rt, mut m) = monitor();
        let (tx, rx) = mpsc::channel();
        m.action_receiver = Some(rx);
        m.action_in_progress = true;
        tx.send(Err("Failed to stop container: boom".to_string())).unwrap();

        assert!(m.poll_action());
        assert!(!m.action_in_progress);
        let notice = m.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.contains("boom"));
        assert!(!m.list_in_flight); // no refresh on failure
    }

    #[test]
    fn action_channel_death_still_reenables() {
        let (_rt, mut m) = monitor();
        let (tx, rx) = mpsc::channel::<Result<String, String>>();
        m.action_receiver = Some(rx);
        m.action_in_progress = true;
        drop(tx);

        assert!(m.poll_action());
        assert!(!m.action_in_progress);
        assert_eq!(m.notice.as_ref().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn open_logs_requires_a_selected_container() {
        let (_rt, mut m) = monitor();
        m.open_logs();
        assert!(!m.logs.is_open());

        m.containers = vec![record(ID_A, ContainerStatus::Running)];
        m.selected_id = Some(ID_A.to_string());
        m.open_logs();
        assert!(m.logs.is_open());
    }

    #[test]
    fn select_clears_notice_and_collapses_logs() {
        let (_rt, mut m) = monitor();
        m.containers = vec![record(ID_A, ContainerStatus::Running)];
        m.selected_id = Some(ID_A.to_string());
        m.open_logs();
        m.notice = Some(Notice::error("old"));

        m.select(ID_A);
        assert!(m.notice.is_none());
        assert!(!m.logs.is_open());
        assert_eq!(m.selected_id.as_deref(), Some(ID_A));
    }
}

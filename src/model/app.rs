use std::fmt;

/// App-level view state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Summary,
    Detail,
}

/// Kind of user-facing notice shown in the message line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// Dismissible one-line notification. Replaced wholesale, never stacked.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: NoticeKind::Error }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: NoticeKind::Success }
    }
}

/// Mutating command accepted by the fleet API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerAction {
    Start,
    Stop,
}

impl ContainerAction {
    /// Verb used both in the request path and in user-facing messages.
    pub fn verb(&self) -> &'static str {
        match self {
            ContainerAction::Start => "start",
            ContainerAction::Stop => "stop",
        }
    }
}

impl fmt::Display for ContainerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_constructors_set_kind() {
        assert_eq!(Notice::error("x").kind, NoticeKind::Error);
        assert_eq!(Notice::success("x").kind, NoticeKind::Success);
    }

    #[test]
    fn action_verbs_match_api_paths() {
        assert_eq!(ContainerAction::Start.verb(), "start");
        assert_eq!(ContainerAction::Stop.verb(), "stop");
    }
}

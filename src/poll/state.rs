//! Polling state machine.
//!
//! Each monitored subject owns an explicit IDLE → POLLING → STOPPED
//! lifecycle. The "stop once terminal" rule is a first-class transition
//! here rather than an incidental check buried in the tick loop, so it can
//! be exercised without timers.

use crate::status::StatusKind;

/// What a poller tracks: the whole execution list, or one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// The dashboard list. Any execution in it could still be active, so
    /// this subject polls for as long as it is subscribed.
    AllExecutions,
    /// A single execution id. Polling stops once a terminal status is
    /// observed or the backend reports the id unknown.
    Execution(i64),
}

impl Subject {
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::AllExecutions => None,
            Self::Execution(id) => Some(*id),
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllExecutions => f.write_str("all executions"),
            Self::Execution(id) => write!(f, "execution {}", id),
        }
    }
}

/// Lifecycle of one subject's polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollState {
    /// Created but not yet subscribed.
    #[default]
    Idle,
    /// Ticking on an interval.
    Polling,
    /// Finished: unsubscribed, terminal status observed, or subject gone.
    Stopped,
}

impl PollState {
    /// A view subscribed; start ticking.
    pub fn on_subscribe(self) -> Self {
        match self {
            Self::Idle => Self::Polling,
            other => other,
        }
    }

    /// A fetched status was observed for the subject.
    ///
    /// Only a detail subject stops on a terminal status; the list keeps
    /// polling regardless of what it contains.
    pub fn on_observation(self, subject: Subject, status: StatusKind) -> Self {
        match (self, subject) {
            (Self::Polling, Subject::Execution(_)) if status.is_terminal() => Self::Stopped,
            (state, _) => state,
        }
    }

    /// The backend reported the subject permanently missing.
    pub fn on_gone(self) -> Self {
        Self::Stopped
    }

    /// The view unsubscribed.
    pub fn on_unsubscribe(self) -> Self {
        Self::Stopped
    }

    pub fn is_polling(&self) -> bool {
        matches!(self, Self::Polling)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_moves_idle_to_polling() {
        assert_eq!(PollState::Idle.on_subscribe(), PollState::Polling);
    }

    #[test]
    fn subscribe_does_not_resurrect_a_stopped_poller() {
        assert_eq!(PollState::Stopped.on_subscribe(), PollState::Stopped);
    }

    #[test]
    fn terminal_observation_stops_a_detail_subject() {
        let state = PollState::Polling;
        assert_eq!(
            state.on_observation(Subject::Execution(1), StatusKind::Success),
            PollState::Stopped
        );
        assert_eq!(
            state.on_observation(Subject::Execution(1), StatusKind::Failed),
            PollState::Stopped
        );
    }

    #[test]
    fn active_observation_keeps_a_detail_subject_polling() {
        let state = PollState::Polling;
        assert_eq!(
            state.on_observation(Subject::Execution(1), StatusKind::Running),
            PollState::Polling
        );
        assert_eq!(
            state.on_observation(Subject::Execution(1), StatusKind::Pending),
            PollState::Polling
        );
        assert_eq!(
            state.on_observation(Subject::Execution(1), StatusKind::Unknown),
            PollState::Polling
        );
    }

    #[test]
    fn list_subject_never_stops_on_observation() {
        let state = PollState::Polling;
        assert_eq!(
            state.on_observation(Subject::AllExecutions, StatusKind::Success),
            PollState::Polling
        );
        assert_eq!(
            state.on_observation(Subject::AllExecutions, StatusKind::Failed),
            PollState::Polling
        );
    }

    #[test]
    fn gone_and_unsubscribe_always_stop() {
        assert_eq!(PollState::Polling.on_gone(), PollState::Stopped);
        assert_eq!(PollState::Polling.on_unsubscribe(), PollState::Stopped);
        assert_eq!(PollState::Idle.on_unsubscribe(), PollState::Stopped);
    }

    #[test]
    fn subject_display_and_id() {
        assert_eq!(Subject::AllExecutions.id(), None);
        assert_eq!(Subject::Execution(7).id(), Some(7));
        assert_eq!(Subject::Execution(7).to_string(), "execution 7");
    }
}

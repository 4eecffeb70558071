//! Per-subject polling loops.
//!
//! Each subscription owns one tokio task and one timer, created on
//! subscribe and torn down on unsubscribe — nothing outlives the view that
//! asked for it. Within a subscription there is exactly one in-flight
//! fetch at any moment: the fetch is awaited inline and the interval is
//! configured to skip (not queue) ticks missed while waiting, so a slow
//! backend lowers the effective cadence instead of stacking requests.
//! Responses are therefore also applied strictly in request order.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::{ExecutionRecord, ExecutionSource};
use crate::errors::ClientError;
use crate::poll::state::{PollState, Subject};

/// What a subscription delivers to its view.
#[derive(Debug)]
pub enum PollEvent {
    /// Fresh list snapshot (list subject). Replaces the previous one wholesale.
    Snapshot(Vec<ExecutionRecord>),
    /// Fresh record for the watched execution (detail subject).
    Update(ExecutionRecord),
    /// This tick's fetch failed; previously delivered data is now stale.
    /// Polling continues on the next tick.
    Stale(ClientError),
    /// The backend does not know the watched id. Terminal: no further
    /// fetches are attempted for this subject.
    Gone(i64),
}

/// Creates polling subscriptions over a shared [`ExecutionSource`].
pub struct PollingController {
    source: Arc<dyn ExecutionSource>,
}

impl PollingController {
    pub fn new(source: Arc<dyn ExecutionSource>) -> Self {
        Self { source }
    }

    /// Start polling `subject` every `every`, beginning with an immediate
    /// first fetch. The returned [`Subscription`] is the only handle to the
    /// timer; dropping or unsubscribing it ends the loop.
    pub fn subscribe(&self, subject: Subject, every: Duration) -> Subscription {
        let (event_tx, event_rx) = mpsc::channel(16);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let source = Arc::clone(&self.source);
        let task = tokio::spawn(poll_loop(source, subject, every, event_tx, cancel_rx));
        tracing::debug!(%subject, interval_secs = every.as_secs(), "subscribed");
        Subscription {
            subject,
            events: event_rx,
            cancel: cancel_tx,
            task: Some(task),
        }
    }
}

/// A live polling loop for one subject.
///
/// Events arrive through [`Subscription::next_event`]; the channel closes
/// once the loop stops (terminal status, missing id, or unsubscribe).
pub struct Subscription {
    subject: Subject,
    events: mpsc::Receiver<PollEvent>,
    cancel: watch::Sender<bool>,
    task: Option<JoinHandle<PollState>>,
}

impl Subscription {
    pub fn subject(&self) -> Subject {
        self.subject
    }

    /// Next event, or `None` once the loop has stopped and the channel is
    /// drained.
    pub async fn next_event(&mut self) -> Option<PollEvent> {
        self.events.recv().await
    }

    /// Non-blocking drain helper, mostly for tests and shutdown paths.
    pub fn try_next(&mut self) -> Option<PollEvent> {
        self.events.try_recv().ok()
    }

    /// Stop the loop and wait for it to wind down.
    ///
    /// Guarantees that after this returns, no event from a fetch issued
    /// before the call will ever be delivered: the loop re-checks the
    /// cancellation flag between completing a fetch and applying its
    /// result, and an in-flight request is abandoned rather than applied.
    pub async fn unsubscribe(&mut self) -> PollState {
        let _ = self.cancel.send(true);
        match self.task.take() {
            Some(task) => task.await.unwrap_or(PollState::Stopped),
            None => PollState::Stopped,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // A dropped view must not leave a timer behind.
        let _ = self.cancel.send(true);
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

/// Result of one fetch, before it is turned into an event.
enum Fetched {
    All(Vec<ExecutionRecord>),
    One(ExecutionRecord),
}

async fn fetch_subject(
    source: &dyn ExecutionSource,
    subject: Subject,
) -> Result<Fetched, ClientError> {
    match subject {
        Subject::AllExecutions => source.fetch_all().await.map(Fetched::All),
        Subject::Execution(id) => source.fetch_one(id).await.map(Fetched::One),
    }
}

async fn poll_loop(
    source: Arc<dyn ExecutionSource>,
    subject: Subject,
    every: Duration,
    events: mpsc::Sender<PollEvent>,
    mut cancel: watch::Receiver<bool>,
) -> PollState {
    let mut state = PollState::Idle.on_subscribe();
    let mut interval = tokio::time::interval(every);
    // One in-flight fetch per subject: ticks that elapse while a fetch is
    // outstanding are skipped, never queued.
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while state.is_polling() {
        tokio::select! {
            _ = cancel.changed() => {
                state = state.on_unsubscribe();
                break;
            }
            _ = interval.tick() => {}
        }

        let outcome = tokio::select! {
            _ = cancel.changed() => {
                // Unsubscribed mid-fetch: abandon the request, apply nothing.
                state = state.on_unsubscribe();
                break;
            }
            outcome = fetch_subject(source.as_ref(), subject) => outcome,
        };
        if *cancel.borrow() {
            state = state.on_unsubscribe();
            break;
        }

        let event = match outcome {
            Ok(Fetched::All(records)) => PollEvent::Snapshot(records),
            Ok(Fetched::One(record)) => {
                state = state.on_observation(subject, record.status_kind());
                PollEvent::Update(record)
            }
            Err(ClientError::NotFound { id }) => {
                state = state.on_gone();
                PollEvent::Gone(id)
            }
            Err(err) => {
                tracing::warn!(%subject, error = %err, "poll tick failed");
                PollEvent::Stale(err)
            }
        };

        tokio::select! {
            _ = cancel.changed() => {
                state = state.on_unsubscribe();
                break;
            }
            sent = events.send(event) => {
                if sent.is_err() {
                    // Receiver gone without an explicit unsubscribe.
                    state = state.on_unsubscribe();
                    break;
                }
            }
        }
    }

    tracing::debug!(%subject, "polling stopped");
    state
}

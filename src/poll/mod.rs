//! Execution-state polling: explicit per-subject schedulers with an
//! IDLE/POLLING/STOPPED lifecycle.

mod controller;
mod state;

pub use controller::{PollEvent, PollingController, Subscription};
pub use state::{PollState, Subject};

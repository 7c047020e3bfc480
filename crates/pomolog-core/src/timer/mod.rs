//! The countdown state machine.
//!
//! ```text
//! Idle -> Running -> (Paused | Completed) -> Idle
//! ```
//!
//! The clock has no internal thread and never samples the wall clock; the
//! host passes `now` into every time-dependent operation and polls
//! [`TimerClock::tick`] roughly once per second while a countdown runs.

mod clock;

pub use clock::{StartRequest, TickOutcome, TimerClock, TimerState};

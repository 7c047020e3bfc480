//! # Pomolog Core Library
//!
//! Business logic for the Pomolog time tracker: a countdown timer for a
//! named activity, a durable append-and-edit session log, and read-side
//! summaries over that log.
//!
//! ## Architecture
//!
//! - **Timer clock**: a wall-clock-based state machine; the host passes
//!   `now` into every time-dependent operation and calls `tick()`
//!   periodically; there are no internal threads or interrupts
//! - **Storage**: CSV session log, newline-delimited category list, and
//!   TOML configuration under one data directory
//! - **Stats**: pure aggregation over a log snapshot
//! - **Tracker**: the host-facing surface guaranteeing each finished
//!   session is persisted exactly once
//!
//! Hosts (the CLI, tests) own the tick loop and every side effect beyond
//! the log itself: rendering, notifications, category editing.

pub mod error;
pub mod record;
pub mod stats;
pub mod storage;
pub mod timer;
pub mod tracker;

pub use error::{ConfigError, CoreError, Result, StorageError, TransitionError, ValidationError};
pub use record::{ManualEntry, SessionRecord, BREAK_SUBJECT};
pub use storage::{CategoryRegistry, Config, LoadOutcome, SessionLog};
pub use timer::{StartRequest, TickOutcome, TimerClock, TimerState};
pub use tracker::{NotificationSink, Tracker};

//! Data-dir paths and the persisted clock snapshot.
//!
//! The active timer must survive between CLI invocations, so the clock is
//! stored as JSON next to the log, the on-disk stand-in for what would be
//! process memory in a long-running host.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime, Timelike};
use pomolog_core::storage::data_dir;
use pomolog_core::{SessionLog, TimerClock, Tracker};

const LOG_FILE: &str = "sessions.csv";
const CLOCK_FILE: &str = "timer.json";
const CONFIG_FILE: &str = "config.toml";
const CATEGORIES_FILE: &str = "categories.txt";

type Error = Box<dyn std::error::Error>;

pub fn log_path() -> Result<PathBuf, Error> {
    Ok(data_dir()?.join(LOG_FILE))
}

pub fn config_path() -> Result<PathBuf, Error> {
    Ok(data_dir()?.join(CONFIG_FILE))
}

pub fn categories_path() -> Result<PathBuf, Error> {
    Ok(data_dir()?.join(CATEGORIES_FILE))
}

fn clock_path() -> Result<PathBuf, Error> {
    Ok(data_dir()?.join(CLOCK_FILE))
}

/// Wall-clock "now", truncated to the second precision of the log format.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Load the persisted clock, or a fresh idle one when absent or stale.
pub fn load_clock() -> TimerClock {
    let Ok(path) = clock_path() else {
        return TimerClock::new();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|_| TimerClock::new()),
        Err(_) => TimerClock::new(),
    }
}

pub fn save_clock(clock: &TimerClock) -> Result<(), Error> {
    let json = serde_json::to_string(clock)?;
    std::fs::write(clock_path()?, json)?;
    Ok(())
}

/// Tracker over the shared log, resuming any persisted clock.
pub fn open_tracker() -> Result<Tracker, Error> {
    Ok(Tracker::with_clock(
        SessionLog::new(log_path()?),
        load_clock(),
    ))
}

//! Durable storage: the session log, the category list, and configuration.

mod categories;
mod config;
mod log;

pub use categories::CategoryRegistry;
pub use config::{Config, BREAK_MINUTES_MAX, MANUAL_MINUTES_MAX, WORK_MINUTES_MAX};
pub use log::{LoadOutcome, SessionLog};

use std::path::PathBuf;

/// Returns `~/.config/pomolog/`, honoring the `POMOLOG_DATA_DIR` override
/// (tests and development setups point this at a scratch directory).
///
/// The directory is created on first use.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("POMOLOG_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pomolog"),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

//! Error types for pomolog-core.
//!
//! Failures are reported upward for the host to present; the core never
//! retries on its own.

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::TimerState;

/// Top-level error type for pomolog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected input on a record-creating operation
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Session log read/write failure
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration load/save failure
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// User action that is not legal in the clock's current state
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected input on a record-creating operation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A session needs at least one of subject or category to be named
    #[error("subject and category are both empty")]
    EmptyLabel,

    /// Manual entries always name a subject
    #[error("subject is empty")]
    EmptySubject,

    /// Countdowns and credited durations are whole positive minutes
    #[error("{field} must be at least one minute")]
    ZeroDuration { field: &'static str },
}

/// Session log and category list storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Log file present but unreadable
    #[error("failed to read session log at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Append or rewrite of the log failed; nothing was recorded
    #[error("failed to write session log at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Category list present but unreadable
    #[error("failed to read category list at {path}: {source}")]
    ReadCategories {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Category list rewrite failed
    #[error("failed to write category list at {path}: {source}")]
    WriteCategories {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },
}

/// A user action rejected because the clock is in the wrong state.
///
/// Rejections leave the state machine untouched; they are reported, not
/// panicked on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot {action} while the timer is {state}")]
pub struct TransitionError {
    pub action: &'static str,
    pub state: TimerState,
}

/// Result type alias for CoreError.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

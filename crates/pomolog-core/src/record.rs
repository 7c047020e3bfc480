//! Session records and their persisted encoding.
//!
//! A [`SessionRecord`] is one completed or manually entered block of time.
//! Records are created by the timer clock (on completion or early stop) or
//! by the manual-entry path, and are immutable once written except through
//! the bulk-edit path, which rewrites the log verbatim.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Subject of the synthetic session started from a finished work session.
pub const BREAK_SUBJECT: &str = "Break";

/// One recorded block of time.
///
/// The serde field names are the persisted column names; their order here is
/// the column order written to new log files. `Category`, `Notes`, `Summary`
/// and `Action` default to empty so files from the four-column era load
/// cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Start", with = "timestamp")]
    pub start: NaiveDateTime,
    #[serde(rename = "End", with = "timestamp")]
    pub end: NaiveDateTime,
    /// Minutes credited. Independent of `end - start` for manual entries;
    /// never recomputed from the timestamp span.
    #[serde(rename = "Minutes")]
    pub minutes: u32,
    /// Empty string means "uncategorized".
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Notes", default)]
    pub notes: String,
    #[serde(rename = "Summary", default)]
    pub summary: String,
    #[serde(rename = "Action", default)]
    pub action: String,
}

impl SessionRecord {
    /// Grouping key for summaries: the category, or the subject when the
    /// record is uncategorized.
    pub fn group_key(&self) -> &str {
        if self.category.is_empty() {
            &self.subject
        } else {
            &self.category
        }
    }
}

/// Input for a session that was not timed.
#[derive(Debug, Clone)]
pub struct ManualEntry {
    pub subject: String,
    pub category: String,
    pub start: NaiveDateTime,
    pub minutes: u32,
    pub notes: String,
    pub summary: String,
    pub action: String,
}

impl ManualEntry {
    /// Build the record, deriving `end = start + minutes`.
    ///
    /// The stored `minutes` stays exactly as supplied.
    pub fn into_record(self) -> Result<SessionRecord, ValidationError> {
        let subject = self.subject.trim().to_string();
        if subject.is_empty() {
            return Err(ValidationError::EmptySubject);
        }
        if self.minutes == 0 {
            return Err(ValidationError::ZeroDuration { field: "minutes" });
        }
        let end = self.start + chrono::Duration::minutes(i64::from(self.minutes));
        Ok(SessionRecord {
            subject,
            category: self.category.trim().to_string(),
            start: self.start,
            end,
            minutes: self.minutes,
            notes: self.notes,
            summary: self.summary,
            action: self.action,
        })
    }
}

/// Timestamps are persisted as `2024-01-10 14:30:00`, second precision.
/// Fractional seconds from older files are accepted and dropped on load.
pub(crate) mod timestamp {
    use chrono::{NaiveDateTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    const PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&dt.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        let dt = NaiveDateTime::parse_from_str(s.trim(), PARSE_FORMAT)
            .map_err(serde::de::Error::custom)?;
        Ok(dt.with_nanosecond(0).unwrap_or(dt))
    }
}

//! Host-facing surface tying the clock to the log.
//!
//! A [`Tracker`] owns the process's single [`TimerClock`] and the
//! [`SessionLog`], and guarantees that every emitted record is appended
//! before control returns to the host: a completion or an early stop is
//! persisted exactly once. Hosts drive it with discrete user actions and a
//! periodic [`Tracker::tick`]; actions are always processed to completion
//! before the next tick, so a stop landing at the same moment as the
//! deadline wins and no duplicate record is written.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::error::Result;
use crate::record::{ManualEntry, SessionRecord};
use crate::stats::{self, WeekKey};
use crate::storage::SessionLog;
use crate::timer::{StartRequest, TickOutcome, TimerClock};

/// Fired once per completed countdown, after the record is persisted.
///
/// Hosts plug in their own notification (terminal bell, desktop toast);
/// the core only defines the seam.
pub trait NotificationSink {
    fn session_complete(&mut self, record: &SessionRecord);
}

/// Owns the clock and the log.
pub struct Tracker {
    clock: TimerClock,
    log: SessionLog,
    sink: Option<Box<dyn NotificationSink>>,
}

impl Tracker {
    pub fn new(log: SessionLog) -> Self {
        Self::with_clock(log, TimerClock::new())
    }

    /// Resume from a clock snapshot the host persisted earlier.
    pub fn with_clock(log: SessionLog, clock: TimerClock) -> Self {
        Self {
            clock,
            log,
            sink: None,
        }
    }

    pub fn set_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sink = Some(sink);
    }

    pub fn clock(&self) -> &TimerClock {
        &self.clock
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    // ── Timer actions ────────────────────────────────────────────────

    pub fn start(&mut self, req: StartRequest, now: NaiveDateTime) -> Result<()> {
        self.clock.start(req, now)
    }

    pub fn pause(&mut self, now: NaiveDateTime) -> Result<i64> {
        Ok(self.clock.pause(now)?)
    }

    pub fn resume(&mut self, now: NaiveDateTime) -> Result<()> {
        Ok(self.clock.resume(now)?)
    }

    /// Stop early; the elapsed-minutes record is appended before returning.
    pub fn stop(&mut self, now: NaiveDateTime) -> Result<SessionRecord> {
        let record = self.clock.stop(now)?;
        self.log.append(&record)?;
        Ok(record)
    }

    pub fn cancel(&mut self) -> Result<()> {
        Ok(self.clock.cancel()?)
    }

    pub fn dismiss(&mut self) -> Result<()> {
        Ok(self.clock.dismiss()?)
    }

    pub fn start_break(&mut self, now: NaiveDateTime) -> Result<()> {
        Ok(self.clock.start_break(now)?)
    }

    /// Poll the countdown. On the completing tick the emitted record is
    /// appended and the notification sink fires before this returns.
    pub fn tick(&mut self, now: NaiveDateTime) -> Result<TickOutcome> {
        let outcome = self.clock.tick(now);
        if let TickOutcome::Completed(record) = &outcome {
            self.log.append(record)?;
            debug!(subject = %record.subject, minutes = record.minutes, "session completed");
            if let Some(sink) = &mut self.sink {
                sink.session_complete(record);
            }
        }
        Ok(outcome)
    }

    // ── Log operations ───────────────────────────────────────────────

    /// Record a session that was not timed.
    pub fn add_manual_entry(&mut self, entry: ManualEntry) -> Result<SessionRecord> {
        let record = entry.into_record()?;
        self.log.append(&record)?;
        Ok(record)
    }

    /// Overwrite the log wholesale. Rows are stored verbatim, including
    /// rows the creation paths would reject.
    pub fn edit_log(&mut self, records: &[SessionRecord]) -> Result<()> {
        Ok(self.log.replace_all(records)?)
    }

    /// Materialized snapshot of the whole log.
    pub fn records(&self) -> Result<Vec<SessionRecord>> {
        let outcome = self.log.load_all()?;
        if outcome.skipped > 0 {
            warn!(
                skipped = outcome.skipped,
                "session log rows could not be parsed"
            );
        }
        Ok(outcome.records)
    }

    // ── Summaries ────────────────────────────────────────────────────

    pub fn today(&self, now: NaiveDateTime) -> Result<Vec<SessionRecord>> {
        let records = self.records()?;
        Ok(stats::today(&records, now).into_iter().cloned().collect())
    }

    pub fn daily_totals(&self, now: NaiveDateTime) -> Result<BTreeMap<NaiveDate, u64>> {
        Ok(stats::daily_totals(&self.records()?, now))
    }

    pub fn weekly_by_category(&self) -> Result<BTreeMap<(WeekKey, String), u64>> {
        Ok(stats::weekly_by_category(&self.records()?))
    }

    pub fn all_time_totals(&self) -> Result<Vec<(String, u64)>> {
        Ok(stats::all_time_totals(&self.records()?))
    }
}

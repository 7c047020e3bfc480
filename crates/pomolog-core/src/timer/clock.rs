//! Timer clock implementation.
//!
//! The clock is a wall-clock-based state machine owning zero or one
//! in-flight session. Completion is detected by polling: the transition to
//! `Completed` fires on the first tick at or past the deadline and emits the
//! finished record exactly once. Correctness depends only on the deadline,
//! not on the tick cadence.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, TransitionError, ValidationError};
use crate::record::{SessionRecord, BREAK_SUBJECT};

/// Coarse clock state, exposed for hosts and status displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TimerState::Idle => "idle",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
            TimerState::Completed => "completed",
        })
    }
}

/// Parameters for starting a work session.
#[derive(Debug, Clone)]
pub struct StartRequest {
    pub subject: String,
    pub category: String,
    pub work_minutes: u32,
    /// Break offered once the work session completes.
    pub break_minutes: u32,
}

/// The in-flight session while the clock is not idle.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActiveSession {
    subject: String,
    category: String,
    work_minutes: u32,
    break_minutes: u32,
    started_at: NaiveDateTime,
    /// Always derived from the start (or resume) instant; never set
    /// directly.
    deadline: NaiveDateTime,
}

impl ActiveSession {
    fn record(&self, end: NaiveDateTime, minutes: u32) -> SessionRecord {
        SessionRecord {
            subject: self.subject.clone(),
            category: self.category.clone(),
            start: self.started_at,
            end,
            minutes,
            notes: String::new(),
            summary: String::new(),
            action: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
enum ClockState {
    #[default]
    Idle,
    Running {
        session: ActiveSession,
    },
    Paused {
        session: ActiveSession,
        remaining_secs: i64,
    },
    Completed {
        session: ActiveSession,
    },
}

/// Result of one poll of the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing is running.
    Idle,
    Running {
        remaining_secs: i64,
        total_secs: i64,
    },
    Paused {
        remaining_secs: i64,
    },
    /// The countdown just reached zero. Returned for exactly one tick; the
    /// caller must persist the record.
    Completed(SessionRecord),
    /// The countdown already finished; waiting for dismiss or a break.
    AwaitingDismiss,
}

/// Countdown state machine driven by a polling host.
///
/// At most one clock exists per process. The whole clock serializes, so a
/// short-lived host can persist it between invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerClock {
    state: ClockState,
}

impl TimerClock {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        match self.state {
            ClockState::Idle => TimerState::Idle,
            ClockState::Running { .. } => TimerState::Running,
            ClockState::Paused { .. } => TimerState::Paused,
            ClockState::Completed { .. } => TimerState::Completed,
        }
    }

    fn session(&self) -> Option<&ActiveSession> {
        match &self.state {
            ClockState::Idle => None,
            ClockState::Running { session }
            | ClockState::Paused { session, .. }
            | ClockState::Completed { session } => Some(session),
        }
    }

    /// Subject of the in-flight session, if any.
    pub fn subject(&self) -> Option<&str> {
        self.session().map(|s| s.subject.as_str())
    }

    pub fn category(&self) -> Option<&str> {
        self.session().map(|s| s.category.as_str())
    }

    pub fn work_minutes(&self) -> Option<u32> {
        self.session().map(|s| s.work_minutes)
    }

    /// Seconds left on the countdown, without advancing the state machine.
    pub fn remaining_secs(&self, now: NaiveDateTime) -> Option<i64> {
        match &self.state {
            ClockState::Running { session } => Some((session.deadline - now).num_seconds().max(0)),
            ClockState::Paused { remaining_secs, .. } => Some(*remaining_secs),
            _ => None,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a work session. Legal only from `Idle`.
    ///
    /// Subject and category are trimmed; at least one must be non-empty.
    /// Durations must be positive; range limits are the caller's concern.
    pub fn start(&mut self, req: StartRequest, now: NaiveDateTime) -> Result<(), CoreError> {
        if !matches!(self.state, ClockState::Idle) {
            return Err(self.rejected("start").into());
        }
        let subject = req.subject.trim().to_string();
        let category = req.category.trim().to_string();
        if subject.is_empty() && category.is_empty() {
            return Err(ValidationError::EmptyLabel.into());
        }
        if req.work_minutes == 0 {
            return Err(ValidationError::ZeroDuration {
                field: "work duration",
            }
            .into());
        }
        if req.break_minutes == 0 {
            return Err(ValidationError::ZeroDuration {
                field: "break duration",
            }
            .into());
        }
        self.state = ClockState::Running {
            session: ActiveSession {
                subject,
                category,
                work_minutes: req.work_minutes,
                break_minutes: req.break_minutes,
                started_at: now,
                deadline: now + Duration::minutes(i64::from(req.work_minutes)),
            },
        };
        Ok(())
    }

    /// Freeze the countdown, snapshotting the remaining seconds.
    pub fn pause(&mut self, now: NaiveDateTime) -> Result<i64, TransitionError> {
        match &self.state {
            ClockState::Running { session } => {
                let remaining_secs = (session.deadline - now).num_seconds().max(0);
                let session = session.clone();
                self.state = ClockState::Paused {
                    session,
                    remaining_secs,
                };
                Ok(remaining_secs)
            }
            _ => Err(self.rejected("pause")),
        }
    }

    /// Continue a paused countdown.
    ///
    /// Re-anchors both the start and the deadline from the paused snapshot
    /// instead of keeping the pre-pause deadline; a frozen deadline would
    /// let the countdown jump straight to zero on the first tick after a
    /// long pause.
    pub fn resume(&mut self, now: NaiveDateTime) -> Result<(), TransitionError> {
        match &self.state {
            ClockState::Paused {
                session,
                remaining_secs,
            } => {
                let mut session = session.clone();
                session.started_at = now;
                session.deadline = now + Duration::seconds(*remaining_secs);
                self.state = ClockState::Running { session };
                Ok(())
            }
            _ => Err(self.rejected("resume")),
        }
    }

    /// Poll the countdown. Nominally once per second while running.
    pub fn tick(&mut self, now: NaiveDateTime) -> TickOutcome {
        match &self.state {
            ClockState::Idle => TickOutcome::Idle,
            ClockState::Paused { remaining_secs, .. } => TickOutcome::Paused {
                remaining_secs: *remaining_secs,
            },
            ClockState::Completed { .. } => TickOutcome::AwaitingDismiss,
            ClockState::Running { session } => {
                let remaining = (session.deadline - now).num_seconds().max(0);
                if remaining > 0 {
                    TickOutcome::Running {
                        remaining_secs: remaining,
                        total_secs: i64::from(session.work_minutes) * 60,
                    }
                } else {
                    let session = session.clone();
                    let record = session.record(now, session.work_minutes);
                    self.state = ClockState::Completed { session };
                    TickOutcome::Completed(record)
                }
            }
        }
    }

    /// Stop early and credit the elapsed whole minutes, at least one.
    pub fn stop(&mut self, now: NaiveDateTime) -> Result<SessionRecord, TransitionError> {
        match &self.state {
            ClockState::Running { session } => {
                let minutes = (now - session.started_at)
                    .num_minutes()
                    .clamp(1, i64::from(u32::MAX)) as u32;
                let record = session.record(now, minutes);
                self.state = ClockState::Idle;
                Ok(record)
            }
            _ => Err(self.rejected("stop")),
        }
    }

    /// Discard the in-flight session without recording anything.
    /// A no-op when already idle.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        match self.state {
            ClockState::Running { .. } | ClockState::Paused { .. } => {
                self.state = ClockState::Idle;
                Ok(())
            }
            ClockState::Idle => Ok(()),
            ClockState::Completed { .. } => Err(self.rejected("cancel")),
        }
    }

    /// Acknowledge a finished session. A no-op when already idle.
    pub fn dismiss(&mut self) -> Result<(), TransitionError> {
        match self.state {
            ClockState::Completed { .. } => {
                self.state = ClockState::Idle;
                Ok(())
            }
            ClockState::Idle => Ok(()),
            _ => Err(self.rejected("dismiss")),
        }
    }

    /// Roll straight from a finished work session into its configured break.
    pub fn start_break(&mut self, now: NaiveDateTime) -> Result<(), TransitionError> {
        match &self.state {
            ClockState::Completed { session } => {
                let minutes = session.break_minutes;
                self.state = ClockState::Running {
                    session: ActiveSession {
                        subject: BREAK_SUBJECT.to_string(),
                        category: String::new(),
                        work_minutes: minutes,
                        break_minutes: minutes,
                        started_at: now,
                        deadline: now + Duration::minutes(i64::from(minutes)),
                    },
                };
                Ok(())
            }
            _ => Err(self.rejected("start a break")),
        }
    }

    fn rejected(&self, action: &'static str) -> TransitionError {
        TransitionError {
            action,
            state: self.state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn start_math(clock: &mut TimerClock, at: NaiveDateTime) {
        clock
            .start(
                StartRequest {
                    subject: "Math".into(),
                    category: String::new(),
                    work_minutes: 25,
                    break_minutes: 5,
                },
                at,
            )
            .unwrap();
    }

    #[test]
    fn start_requires_subject_or_category() {
        let mut clock = TimerClock::new();
        let err = clock
            .start(
                StartRequest {
                    subject: "   ".into(),
                    category: "".into(),
                    work_minutes: 25,
                    break_minutes: 5,
                },
                t("2024-01-10 09:00:00"),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::EmptyLabel)
        ));
        assert_eq!(clock.state(), TimerState::Idle);
    }

    #[test]
    fn start_with_category_only_is_allowed() {
        let mut clock = TimerClock::new();
        clock
            .start(
                StartRequest {
                    subject: String::new(),
                    category: "Study".into(),
                    work_minutes: 25,
                    break_minutes: 5,
                },
                t("2024-01-10 09:00:00"),
            )
            .unwrap();
        assert_eq!(clock.state(), TimerState::Running);
    }

    #[test]
    fn start_rejects_zero_durations() {
        let mut clock = TimerClock::new();
        let err = clock
            .start(
                StartRequest {
                    subject: "Math".into(),
                    category: String::new(),
                    work_minutes: 0,
                    break_minutes: 5,
                },
                t("2024-01-10 09:00:00"),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::ZeroDuration { .. })
        ));
    }

    #[test]
    fn completion_fires_on_first_zero_tick_and_only_once() {
        let mut clock = TimerClock::new();
        let t0 = t("2024-01-10 09:00:00");
        start_math(&mut clock, t0);

        match clock.tick(t0 + Duration::seconds(1)) {
            TickOutcome::Running {
                remaining_secs,
                total_secs,
            } => {
                assert_eq!(remaining_secs, 25 * 60 - 1);
                assert_eq!(total_secs, 25 * 60);
            }
            other => panic!("expected running, got {other:?}"),
        }

        let done_at = t0 + Duration::minutes(25);
        match clock.tick(done_at) {
            TickOutcome::Completed(record) => {
                assert_eq!(record.subject, "Math");
                assert_eq!(record.minutes, 25);
                assert_eq!(record.start, t0);
                assert_eq!(record.end, done_at);
            }
            other => panic!("expected completion, got {other:?}"),
        }

        assert_eq!(
            clock.tick(done_at + Duration::seconds(1)),
            TickOutcome::AwaitingDismiss
        );
    }

    #[test]
    fn one_tick_per_second_completes_exactly_once() {
        let mut clock = TimerClock::new();
        let t0 = t("2024-01-10 09:00:00");
        clock
            .start(
                StartRequest {
                    subject: "Math".into(),
                    category: String::new(),
                    work_minutes: 2,
                    break_minutes: 5,
                },
                t0,
            )
            .unwrap();

        let mut completions = 0;
        for i in 1..=130 {
            if let TickOutcome::Completed(record) = clock.tick(t0 + Duration::seconds(i)) {
                completions += 1;
                assert_eq!(i, 120);
                assert_eq!(record.minutes, 2);
            }
        }
        assert_eq!(completions, 1);
    }

    #[test]
    fn late_tick_still_completes_with_configured_minutes() {
        let mut clock = TimerClock::new();
        let t0 = t("2024-01-10 09:00:00");
        start_math(&mut clock, t0);

        // The host slept through the deadline; the credited minutes stay at
        // the configured duration.
        let late = t0 + Duration::minutes(40);
        match clock.tick(late) {
            TickOutcome::Completed(record) => {
                assert_eq!(record.minutes, 25);
                assert_eq!(record.end, late);
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn pause_resume_is_drift_free() {
        let mut clock = TimerClock::new();
        let t0 = t("2024-01-10 09:00:00");
        start_math(&mut clock, t0);

        let paused_at = t0 + Duration::seconds(100);
        assert_eq!(clock.pause(paused_at).unwrap(), 25 * 60 - 100);

        // Any amount of wall time may pass while paused.
        let resumed_at = paused_at + Duration::hours(3);
        clock.resume(resumed_at).unwrap();
        assert_eq!(clock.remaining_secs(resumed_at), Some(25 * 60 - 100));

        let deadline = resumed_at + Duration::seconds(25 * 60 - 100);
        match clock.tick(deadline - Duration::seconds(1)) {
            TickOutcome::Running { remaining_secs, .. } => assert_eq!(remaining_secs, 1),
            other => panic!("expected running, got {other:?}"),
        }
        match clock.tick(deadline) {
            TickOutcome::Completed(record) => {
                assert_eq!(record.minutes, 25);
                assert_eq!(record.start, resumed_at);
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn stop_credits_elapsed_minutes_with_floor_of_one() {
        let mut clock = TimerClock::new();
        let t0 = t("2024-01-10 09:00:00");
        start_math(&mut clock, t0);
        let record = clock.stop(t0 + Duration::seconds(5 * 60 + 30)).unwrap();
        assert_eq!(record.minutes, 5);
        assert_eq!(clock.state(), TimerState::Idle);

        start_math(&mut clock, t0);
        let record = clock.stop(t0 + Duration::seconds(10)).unwrap();
        assert_eq!(record.minutes, 1);
    }

    #[test]
    fn cancel_and_dismiss_are_idempotent_in_idle() {
        let mut clock = TimerClock::new();
        assert!(clock.cancel().is_ok());
        assert!(clock.dismiss().is_ok());
        assert!(clock.dismiss().is_ok());
        assert_eq!(clock.state(), TimerState::Idle);
    }

    #[test]
    fn cancel_discards_without_a_record() {
        let mut clock = TimerClock::new();
        let t0 = t("2024-01-10 09:00:00");
        start_math(&mut clock, t0);
        clock.pause(t0 + Duration::seconds(30)).unwrap();
        clock.cancel().unwrap();
        assert_eq!(clock.state(), TimerState::Idle);
        assert_eq!(clock.tick(t0 + Duration::hours(1)), TickOutcome::Idle);
    }

    #[test]
    fn out_of_state_actions_are_rejected_without_side_effects() {
        let mut clock = TimerClock::new();
        assert!(clock.pause(t("2024-01-10 09:00:00")).is_err());
        assert!(clock.resume(t("2024-01-10 09:00:00")).is_err());
        assert!(clock.stop(t("2024-01-10 09:00:00")).is_err());
        assert!(clock.start_break(t("2024-01-10 09:00:00")).is_err());
        assert_eq!(clock.state(), TimerState::Idle);

        let t0 = t("2024-01-10 09:00:00");
        start_math(&mut clock, t0);
        let err = clock
            .start(
                StartRequest {
                    subject: "Other".into(),
                    category: String::new(),
                    work_minutes: 10,
                    break_minutes: 5,
                },
                t0,
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Transition(_)));
        assert_eq!(clock.subject(), Some("Math"));
    }

    #[test]
    fn break_runs_with_the_configured_break_duration() {
        let mut clock = TimerClock::new();
        let t0 = t("2024-01-10 09:00:00");
        start_math(&mut clock, t0);
        let done_at = t0 + Duration::minutes(25);
        assert!(matches!(clock.tick(done_at), TickOutcome::Completed(_)));

        clock.start_break(done_at).unwrap();
        assert_eq!(clock.subject(), Some(BREAK_SUBJECT));

        match clock.tick(done_at + Duration::minutes(5)) {
            TickOutcome::Completed(record) => {
                assert_eq!(record.subject, BREAK_SUBJECT);
                assert_eq!(record.minutes, 5);
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn clock_snapshot_roundtrips_through_json() {
        let mut clock = TimerClock::new();
        let t0 = t("2024-01-10 09:00:00");
        start_math(&mut clock, t0);
        clock.pause(t0 + Duration::seconds(60)).unwrap();

        let json = serde_json::to_string(&clock).unwrap();
        let restored: TimerClock = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.state(), TimerState::Paused);
        assert_eq!(
            restored.remaining_secs(t0 + Duration::hours(5)),
            Some(24 * 60)
        );
    }
}

//! End-to-end flow through the host surface: timed session, break, and the
//! resulting log contents.

use chrono::{Duration, NaiveDateTime};
use pomolog_core::{SessionLog, StartRequest, TickOutcome, Tracker};
use tempfile::TempDir;

fn t(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

#[test]
fn work_session_then_break_records_two_sessions() {
    let dir = TempDir::new().unwrap();
    let log = SessionLog::new(dir.path().join("sessions.csv"));
    let mut tracker = Tracker::new(log.clone());

    let t0 = t("2024-01-10 09:00:00");
    tracker
        .start(
            StartRequest {
                subject: "Math".into(),
                category: String::new(),
                work_minutes: 25,
                break_minutes: 5,
            },
            t0,
        )
        .unwrap();

    // Mid-run poll: still counting down.
    match tracker.tick(t0 + Duration::seconds(60)).unwrap() {
        TickOutcome::Running {
            remaining_secs,
            total_secs,
        } => {
            assert_eq!(remaining_secs, 24 * 60);
            assert_eq!(total_secs, 25 * 60);
        }
        other => panic!("expected running, got {other:?}"),
    }

    let work_done = t0 + Duration::minutes(25);
    match tracker.tick(work_done).unwrap() {
        TickOutcome::Completed(record) => {
            assert_eq!(record.subject, "Math");
            assert_eq!(record.minutes, 25);
        }
        other => panic!("expected completion, got {other:?}"),
    }

    tracker.start_break(work_done).unwrap();
    let break_done = work_done + Duration::minutes(5);
    match tracker.tick(break_done).unwrap() {
        TickOutcome::Completed(record) => {
            assert_eq!(record.subject, "Break");
            assert_eq!(record.minutes, 5);
        }
        other => panic!("expected completion, got {other:?}"),
    }

    let snapshot = log.load_all().unwrap();
    assert_eq!(snapshot.skipped, 0);
    assert_eq!(snapshot.records.len(), 2);
    assert_eq!(snapshot.records[0].subject, "Math");
    assert_eq!(snapshot.records[0].minutes, 25);
    assert_eq!(snapshot.records[1].subject, "Break");
    assert_eq!(snapshot.records[1].minutes, 5);
}

#[test]
fn pause_survives_a_long_gap_without_shortening_the_session() {
    let dir = TempDir::new().unwrap();
    let mut tracker = Tracker::new(SessionLog::new(dir.path().join("sessions.csv")));

    let t0 = t("2024-01-10 09:00:00");
    tracker
        .start(
            StartRequest {
                subject: "Essay".into(),
                category: "Writing".into(),
                work_minutes: 30,
                break_minutes: 5,
            },
            t0,
        )
        .unwrap();

    let paused_at = t0 + Duration::minutes(10);
    let remaining = tracker.pause(paused_at).unwrap();
    assert_eq!(remaining, 20 * 60);

    // Lunch happens.
    let resumed_at = paused_at + Duration::hours(1);
    tracker.resume(resumed_at).unwrap();

    // One second before the re-anchored deadline: still running.
    let deadline = resumed_at + Duration::seconds(remaining);
    assert!(matches!(
        tracker.tick(deadline - Duration::seconds(1)).unwrap(),
        TickOutcome::Running { remaining_secs: 1, .. }
    ));
    match tracker.tick(deadline).unwrap() {
        TickOutcome::Completed(record) => assert_eq!(record.minutes, 30),
        other => panic!("expected completion, got {other:?}"),
    }
}

#[test]
fn user_stop_wins_over_a_same_moment_completion() {
    let dir = TempDir::new().unwrap();
    let log = SessionLog::new(dir.path().join("sessions.csv"));
    let mut tracker = Tracker::new(log.clone());

    let t0 = t("2024-01-10 09:00:00");
    tracker
        .start(
            StartRequest {
                subject: "Math".into(),
                category: String::new(),
                work_minutes: 25,
                break_minutes: 5,
            },
            t0,
        )
        .unwrap();

    // Stop pressed right as the countdown hits zero: the stop record is
    // written and the tick that follows sees an idle clock.
    let deadline = t0 + Duration::minutes(25);
    let record = tracker.stop(deadline).unwrap();
    assert_eq!(record.minutes, 25);
    assert!(matches!(tracker.tick(deadline).unwrap(), TickOutcome::Idle));

    assert_eq!(log.load_all().unwrap().records.len(), 1);
}

#[test]
fn cancelled_sessions_leave_no_trace() {
    let dir = TempDir::new().unwrap();
    let log = SessionLog::new(dir.path().join("sessions.csv"));
    let mut tracker = Tracker::new(log.clone());

    let t0 = t("2024-01-10 09:00:00");
    tracker
        .start(
            StartRequest {
                subject: "Math".into(),
                category: String::new(),
                work_minutes: 25,
                break_minutes: 5,
            },
            t0,
        )
        .unwrap();
    tracker.cancel().unwrap();

    assert!(log.load_all().unwrap().records.is_empty());
    assert!(matches!(
        tracker.tick(t0 + Duration::minutes(25)).unwrap(),
        TickOutcome::Idle
    ));
}

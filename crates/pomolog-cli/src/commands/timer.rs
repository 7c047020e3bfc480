use clap::Subcommand;
use pomolog_core::storage::{BREAK_MINUTES_MAX, WORK_MINUTES_MAX};
use pomolog_core::{
    Config, NotificationSink, SessionRecord, StartRequest, TickOutcome, Tracker,
};

use crate::state;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a work countdown
    Start {
        /// Activity label
        subject: String,
        /// Grouping key for summaries
        #[arg(long, default_value = "")]
        category: String,
        /// Work duration in minutes (defaults to the configured value)
        #[arg(long = "work", value_parser = clap::value_parser!(u32).range(1..=WORK_MINUTES_MAX as i64))]
        work_minutes: Option<u32>,
        /// Break duration in minutes (defaults to the configured value)
        #[arg(long = "break", value_parser = clap::value_parser!(u32).range(1..=BREAK_MINUTES_MAX as i64))]
        break_minutes: Option<u32>,
    },
    /// Poll the countdown once and print the current state
    Status,
    /// Freeze the countdown
    Pause,
    /// Continue a paused countdown
    Resume,
    /// Stop early and save the elapsed minutes
    Stop,
    /// Discard the in-flight session without saving
    Cancel,
    /// Acknowledge a finished session
    Dismiss,
    /// Start the configured break after a finished session
    Break,
}

/// BEL plus a line on stdout; enough for a terminal host to chime without
/// an audio stack.
struct TerminalBell;

impl NotificationSink for TerminalBell {
    fn session_complete(&mut self, record: &SessionRecord) {
        println!(
            "\x07Session complete: {} ({} min) saved.",
            record.subject, record.minutes
        );
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = state::open_tracker()?;
    tracker.set_sink(Box::new(TerminalBell));
    let now = state::now();

    let result = dispatch(&mut tracker, action, now);
    // Persist the clock even when the command failed: a completion that hit
    // a storage error must not be replayed by the next invocation.
    state::save_clock(tracker.clock())?;
    result
}

fn dispatch(
    tracker: &mut Tracker,
    action: TimerAction,
    now: chrono::NaiveDateTime,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Start {
            subject,
            category,
            work_minutes,
            break_minutes,
        } => {
            let config = Config::load_or_default(&state::config_path()?);
            let work = work_minutes.unwrap_or(config.work_minutes);
            tracker.start(
                StartRequest {
                    subject,
                    category,
                    work_minutes: work,
                    break_minutes: break_minutes.unwrap_or(config.break_minutes),
                },
                now,
            )?;
            println!(
                "Working on {} for {} minutes.",
                tracker.clock().subject().unwrap_or_default(),
                work
            );
        }
        TimerAction::Status => {
            let outcome = tracker.tick(now)?;
            print_outcome(tracker, &outcome);
        }
        TimerAction::Pause => {
            let remaining = tracker.pause(now)?;
            println!("Paused with {} remaining.", format_remaining(remaining));
        }
        TimerAction::Resume => {
            tracker.resume(now)?;
            let remaining = tracker.clock().remaining_secs(now).unwrap_or(0);
            println!("Resumed; {} remaining.", format_remaining(remaining));
        }
        TimerAction::Stop => {
            let record = tracker.stop(now)?;
            println!("Saved {} minutes of {}.", record.minutes, record.subject);
        }
        TimerAction::Cancel => {
            tracker.cancel()?;
            println!("Cancelled; nothing saved.");
        }
        TimerAction::Dismiss => {
            tracker.dismiss()?;
        }
        TimerAction::Break => {
            tracker.start_break(now)?;
            let remaining = tracker.clock().remaining_secs(now).unwrap_or(0);
            println!("Break started: {}.", format_remaining(remaining));
        }
    }
    Ok(())
}

fn format_remaining(secs: i64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn print_outcome(tracker: &Tracker, outcome: &TickOutcome) {
    match outcome {
        TickOutcome::Idle => println!("idle"),
        TickOutcome::Running {
            remaining_secs,
            total_secs,
        } => {
            let done = (total_secs - remaining_secs) * 100 / (*total_secs).max(1);
            println!(
                "running {}: {} remaining ({done}%)",
                tracker.clock().subject().unwrap_or_default(),
                format_remaining(*remaining_secs),
            );
        }
        TickOutcome::Paused { remaining_secs } => {
            println!(
                "paused {}: {} remaining",
                tracker.clock().subject().unwrap_or_default(),
                format_remaining(*remaining_secs)
            );
        }
        // The sink already announced the save.
        TickOutcome::Completed(_) => {}
        TickOutcome::AwaitingDismiss => {
            println!("finished; dismiss it or start a break");
        }
    }
}

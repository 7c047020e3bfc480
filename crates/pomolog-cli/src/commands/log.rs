use std::path::PathBuf;

use clap::Subcommand;
use chrono::NaiveDateTime;
use pomolog_core::storage::MANUAL_MINUTES_MAX;
use pomolog_core::{ManualEntry, SessionLog};

use crate::state;

#[derive(Subcommand)]
pub enum LogAction {
    /// Add a session that was not timed
    Add {
        /// Activity label
        subject: String,
        /// Grouping key for summaries
        #[arg(long, default_value = "")]
        category: String,
        /// Start timestamp, `YYYY-MM-DD HH:MM[:SS]` (defaults to now)
        #[arg(long)]
        start: Option<String>,
        /// Duration in minutes, credited as given
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MANUAL_MINUTES_MAX as i64))]
        minutes: u32,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long, default_value = "")]
        summary: String,
        #[arg(long, default_value = "")]
        action: String,
    },
    /// Print the log as JSON
    Show {
        /// Only sessions started today
        #[arg(long)]
        today: bool,
    },
    /// Replace the whole log with the rows of another CSV file
    Edit {
        /// File in the session log format
        file: PathBuf,
    },
    /// Print the log file path
    Path,
}

pub fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = state::open_tracker()?;

    match action {
        LogAction::Add {
            subject,
            category,
            start,
            minutes,
            notes,
            summary,
            action,
        } => {
            let start = match start {
                Some(s) => parse_start(&s)?,
                None => state::now(),
            };
            let record = tracker.add_manual_entry(ManualEntry {
                subject,
                category,
                start,
                minutes,
                notes,
                summary,
                action,
            })?;
            println!("Added {} minutes of {}.", record.minutes, record.subject);
        }
        LogAction::Show { today } => {
            let records = if today {
                tracker.today(state::now())?
            } else {
                tracker.records()?
            };
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        LogAction::Edit { file } => {
            // The replacement goes through the same parser as the log
            // itself, so the skipped count surfaces rows the edit dropped.
            let replacement = SessionLog::new(&file).load_all()?;
            tracker.edit_log(&replacement.records)?;
            if replacement.skipped > 0 {
                eprintln!(
                    "warning: {} unparsable row(s) in {} were dropped",
                    replacement.skipped,
                    file.display()
                );
            }
            println!("Log rewritten: {} rows.", replacement.records.len());
        }
        LogAction::Path => println!("{}", state::log_path()?.display()),
    }
    Ok(())
}

fn parse_start(s: &str) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .map_err(|_| format!("invalid start timestamp '{s}', expected YYYY-MM-DD HH:MM[:SS]").into())
}

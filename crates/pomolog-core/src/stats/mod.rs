//! Read-side summaries over a session log snapshot.
//!
//! All functions here are pure and total: they never touch storage, never
//! fail, and yield empty output for empty input. Sessions are grouped by
//! category, falling back to the subject for uncategorized records; one
//! grouping key everywhere.

mod totals;
mod windows;

pub use totals::{all_time_totals, weekly_by_category, WeekKey};
pub use windows::{daily_totals, today};

//! Aggregate totals by ISO week and across all time.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::record::SessionRecord;

/// ISO year and week number, ordered chronologically.
///
/// Late-December and early-January dates can land in a week of the
/// neighboring ISO year; the key follows the ISO calendar, not the civil
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

/// Minutes per (ISO week, group) pair. Weeks or groups without sessions are
/// simply absent.
pub fn weekly_by_category(records: &[SessionRecord]) -> BTreeMap<(WeekKey, String), u64> {
    let mut totals = BTreeMap::new();
    for record in records {
        let key = (
            WeekKey::of(record.start.date()),
            record.group_key().to_string(),
        );
        *totals.entry(key).or_insert(0) += u64::from(record.minutes);
    }
    totals
}

/// Minutes per group across the whole log, largest first (ties broken by
/// name so the order is deterministic).
pub fn all_time_totals(records: &[SessionRecord]) -> Vec<(String, u64)> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.group_key()).or_insert(0) += u64::from(record.minutes);
    }
    let mut out: Vec<(String, u64)> = totals
        .into_iter()
        .map(|(group, minutes)| (group.to_string(), minutes))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

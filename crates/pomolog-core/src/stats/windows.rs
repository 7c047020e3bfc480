//! Date-windowed views: today's sessions and the trailing week.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::record::SessionRecord;

/// Records whose `start` falls within the calendar day of `now`.
pub fn today<'a>(records: &'a [SessionRecord], now: NaiveDateTime) -> Vec<&'a SessionRecord> {
    let day = now.date();
    records.iter().filter(|r| r.start.date() == day).collect()
}

/// Total minutes per day over the trailing 7 days, today inclusive, keyed
/// by the date of `start`.
///
/// Days without sessions are absent from the map, not zero-filled.
pub fn daily_totals(records: &[SessionRecord], now: NaiveDateTime) -> BTreeMap<NaiveDate, u64> {
    let last = now.date();
    let first = last - Duration::days(6);
    let mut totals = BTreeMap::new();
    for record in records {
        let day = record.start.date();
        if day >= first && day <= last {
            *totals.entry(day).or_insert(0) += u64::from(record.minutes);
        }
    }
    totals
}

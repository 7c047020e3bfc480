use std::collections::BTreeMap;

use clap::Subcommand;

use crate::state;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's sessions
    Today,
    /// Minutes per day over the trailing week
    Daily,
    /// Minutes per category per ISO week
    Weekly,
    /// All-time minutes per category, largest first
    All,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = state::open_tracker()?;

    match action {
        StatsAction::Today => {
            let records = tracker.today(state::now())?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        StatsAction::Daily => {
            let totals = tracker.daily_totals(state::now())?;
            println!("{}", serde_json::to_string_pretty(&totals)?);
        }
        StatsAction::Weekly => {
            // Tuple keys don't map to JSON objects; nest by week instead.
            let mut by_week: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
            for ((week, group), minutes) in tracker.weekly_by_category()? {
                by_week
                    .entry(week.to_string())
                    .or_default()
                    .insert(group, minutes);
            }
            println!("{}", serde_json::to_string_pretty(&by_week)?);
        }
        StatsAction::All => {
            let totals = tracker.all_time_totals()?;
            println!("{}", serde_json::to_string_pretty(&totals)?);
        }
    }
    Ok(())
}

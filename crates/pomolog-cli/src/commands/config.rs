use clap::Subcommand;
use pomolog_core::storage::{BREAK_MINUTES_MAX, WORK_MINUTES_MAX};
use pomolog_core::Config;

use crate::state;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Set a configuration value
    Set {
        /// `work_minutes` or `break_minutes`
        key: String,
        value: u32,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let path = state::config_path()?;

    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default(&path);
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_or_default(&path);
            match key.as_str() {
                "work_minutes" => {
                    if !(1..=WORK_MINUTES_MAX).contains(&value) {
                        return Err(format!("work_minutes must be 1..={WORK_MINUTES_MAX}").into());
                    }
                    config.work_minutes = value;
                }
                "break_minutes" => {
                    if !(1..=BREAK_MINUTES_MAX).contains(&value) {
                        return Err(format!("break_minutes must be 1..={BREAK_MINUTES_MAX}").into());
                    }
                    config.break_minutes = value;
                }
                _ => return Err(format!("unknown config key: {key}").into()),
            }
            config.save(&path)?;
            println!("{key} = {value}");
        }
    }
    Ok(())
}

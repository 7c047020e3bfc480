use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod state;

#[derive(Parser)]
#[command(name = "pomolog", version, about = "Pomodoro timer with a durable session log")]
struct Cli {
    /// Debug-level logging on stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Session log management
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Summaries over the session log
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Category list management
    Category {
        #[command(subcommand)]
        action: commands::category::CategoryAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Logs go to stderr; stdout is reserved for command output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Log { action } => commands::log::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Category { action } => commands::category::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

mod commands;
mod datetime;
mod desktop;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use timetable_core::constants::MAX_WINDOW_DAYS;
use timetable_core::timetable::Timetable;

#[derive(Parser)]
#[command(name = "timetable")]
#[command(about = "Keep track of your classes and get reminded before they start")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's classes
    Today,
    /// Show tomorrow's classes
    Tomorrow,
    /// Show the classes on a given day
    Day {
        /// Day to show (e.g. "2025-03-20", "friday", "next monday")
        date: String,
    },
    /// List every class
    List,
    /// Show class counts for today, tomorrow and the days after
    Week {
        /// Number of days to include (defaults to window_days from config)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WINDOW_DAYS)))]
        days: Option<u32>,
    },
    /// Add a class
    Add {
        /// Class name
        name: Option<String>,

        /// Tutor name
        #[arg(short, long)]
        tutor: Option<String>,

        /// Start date/time (e.g. "2025-03-20 15:00", "tomorrow 9am")
        #[arg(short, long)]
        start: Option<String>,

        /// End date/time
        #[arg(short, long, conflicts_with = "duration")]
        end: Option<String>,

        /// Duration (e.g. "45m", "1h", "1h30m")
        #[arg(short, long, conflicts_with = "end")]
        duration: Option<String>,
    },
    /// Delete a class
    Delete {
        /// Class id, or the first characters of it
        id: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Set a reminder for a class
    Remind {
        /// Class id, or the first characters of it
        id: String,

        /// When to be reminded (e.g. "tomorrow 8am")
        #[arg(short, long)]
        at: String,

        /// Note shown in the reminder
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// Ask for permission to show desktop notifications
    Permission,
    /// Show reminders that are due
    Notify {
        /// Keep running and check for due reminders periodically
        #[arg(short, long)]
        watch: bool,

        /// Seconds between checks when watching
        #[arg(short, long, default_value_t = 30)]
        interval: u64,
    },
    /// Show configuration paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let timetable = Timetable::load().context("Could not load timetable configuration")?;

    match cli.command {
        Commands::Today => commands::agenda::today(&timetable),
        Commands::Tomorrow => commands::agenda::tomorrow(&timetable),
        Commands::Day { date } => commands::agenda::day(&timetable, &date),
        Commands::List => commands::list::run(&timetable),
        Commands::Week { days } => commands::week::run(&timetable, days),
        Commands::Add {
            name,
            tutor,
            start,
            end,
            duration,
        } => commands::add::run(&timetable, name, tutor, start, end, duration),
        Commands::Delete { id, force } => commands::delete::run(&timetable, &id, force),
        Commands::Remind { id, at, note } => commands::remind::run(&timetable, &id, &at, note),
        Commands::Permission => commands::permission::run(&timetable),
        Commands::Notify { watch, interval } => commands::notify::run(&timetable, watch, interval),
        Commands::Config => commands::config::run(&timetable),
    }
}

mod commands;
mod render;
mod snapshot;

use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use meetgrid_core::config::MeetgridConfig;
use meetgrid_core::Category;
use tracing_subscriber::EnvFilter;

use commands::{Context, SnapshotArgs};

#[derive(Parser)]
#[command(name = "meetgrid")]
#[command(about = "Meeting tabs and calendar layout for an event dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show tab counts and the meetings under each tab
    Tabs {
        #[command(flatten)]
        snapshot: SnapshotArgs,

        /// Only list this tab (pending, upcoming, ongoing, completed, cancelled)
        #[arg(short, long)]
        tab: Option<Category>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Lay out upcoming meetings on the calendar grid
    Day {
        #[command(flatten)]
        snapshot: SnapshotArgs,

        /// Only this day (YYYY-MM-DD); defaults to every day with upcoming meetings
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Keep tab counts current until interrupted
    Watch {
        #[command(flatten)]
        snapshot: SnapshotArgs,

        /// Refresh period (e.g. "30s", "2m"); defaults to refresh_interval from config
        #[arg(short, long, value_parser = humantime::parse_duration)]
        interval: Option<Duration>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = MeetgridConfig::load()?;

    match cli.command {
        Commands::Tabs {
            snapshot,
            tab,
            json,
        } => commands::tabs::run(Context::resolve(snapshot, config)?, tab, json),
        Commands::Day {
            snapshot,
            date,
            json,
        } => commands::day::run(Context::resolve(snapshot, config)?, date, json),
        Commands::Watch { snapshot, interval } => {
            commands::watch::run(Context::resolve(snapshot, config)?, interval).await
        }
    }
}

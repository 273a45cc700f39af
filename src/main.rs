mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use artwalk_core::Region;
use artwalk_core::calendar::CalendarKind;
use artwalk_core::config::ArtwalkConfig;
use artwalk_core::data::{DataLoader, DataSource};
use artwalk_core::filter::{EventFilter, PhaseFilter};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "artwalk")]
#[command(about = "Browse current, upcoming and past exhibitions at Bay Area and LA venues")]
struct Cli {
    /// Directory or URL holding the venue/event JSON files (overrides config)
    #[arg(long, global = true)]
    data: Option<String>,

    /// Region to show (sf or la)
    #[arg(short, long, global = true)]
    region: Option<Region>,

    /// Pick the region from a site page path instead (e.g. "/artwalk/la/")
    #[arg(long, global = true, conflicts_with = "region")]
    page: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, current first
    List {
        /// Only show one phase (all, current, future, past)
        #[arg(short, long, default_value = "all")]
        phase: PhaseFilter,

        /// Case-insensitive search over title, dates, venue and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Print the sorted events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an event's opening day, closing day or full run to a calendar
    Notify {
        /// Event id, as shown by `artwalk list` (or the exact event name)
        event: String,

        /// Calendar event type (opening, closing, full)
        #[arg(short, long)]
        kind: CalendarKind,

        /// Also write an .ics file here
        #[arg(long)]
        ics: Option<PathBuf>,
    },
    /// Move events that have closed to "past" and save the events file
    Refresh,
    /// List venues with map links
    Venues,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let loader = resolve_loader(&cli)?;

    match cli.command {
        Commands::List {
            phase,
            search,
            json,
        } => {
            let filter = EventFilter::new(search.as_deref().unwrap_or_default(), phase);
            commands::list::run(loader, filter, json).await
        }
        Commands::Notify { event, kind, ics } => {
            commands::notify::run(loader, &event, kind, ics.as_deref()).await
        }
        Commands::Refresh => commands::refresh::run(loader).await,
        Commands::Venues => commands::venues::run(loader).await,
    }
}

/// Flags win over the config file; `--page` picks the region like the site does.
fn resolve_loader(cli: &Cli) -> Result<DataLoader> {
    let config = ArtwalkConfig::load()?;

    let source: DataSource = match &cli.data {
        Some(data) => data.parse()?,
        None => config.data_source()?,
    };

    let region = cli
        .region
        .or_else(|| cli.page.as_deref().map(Region::from_path))
        .unwrap_or(config.default_region);

    tracing::debug!(%source, %region, "Resolved data source");

    Ok(DataLoader::new(source, region)?)
}

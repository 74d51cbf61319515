mod commands;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use matchcal_core::{DateRange, MatchCalConfig, MatchStatus};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "matchcal")]
#[command(about = "Turn a team's fixtures into a subscribable iCalendar file")]
struct Cli {
    /// Use this config file instead of ~/.config/matchcal/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch fixtures and write them as an .ics file
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include matches from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Include matches until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Only fetch these statuses (e.g. SCHEDULED,TIMED); overrides source.statuses
        #[arg(long = "status", value_delimiter = ',')]
        statuses: Vec<MatchStatus>,
    },
    /// Build an .ics file from matches saved as JSON
    Render {
        /// JSON file: an array of matches or a full API response
        input: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip matches before this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Skip matches after this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show fixtures in the terminal
    List {
        /// Show matches from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Show matches until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Only show these statuses (e.g. FINISHED); overrides source.statuses
        #[arg(long = "status", value_delimiter = ',')]
        statuses: Vec<MatchStatus>,
    },
    /// Show config path and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            output,
            from,
            to,
            statuses,
        } => {
            let config = with_statuses(load_config(cli.config.as_ref())?, statuses);
            let range = resolve_range(&config, from.as_deref(), to.as_deref())?;
            commands::export::run(&config, range, output.as_deref()).await
        }
        Commands::Render {
            input,
            output,
            from,
            to,
        } => {
            let config = load_config(cli.config.as_ref())?;
            let range = DateRange::from_args(from.as_deref(), to.as_deref(), DateRange::UNBOUNDED)?;
            commands::render::run(&config, &input, output.as_deref(), &range)
        }
        Commands::List { from, to, statuses } => {
            let config = with_statuses(load_config(cli.config.as_ref())?, statuses);
            let range = resolve_range(&config, from.as_deref(), to.as_deref())?;
            commands::list::run(&config, range).await
        }
        Commands::Config => commands::config::run(cli.config.as_deref()),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<MatchCalConfig> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            MatchCalConfig::load_from(path)?
        }
        None => MatchCalConfig::load()?,
    };
    Ok(config)
}

/// Apply `--status` flags; none given keeps the configured filter.
fn with_statuses(mut config: MatchCalConfig, statuses: Vec<MatchStatus>) -> MatchCalConfig {
    if !statuses.is_empty() {
        config.source.statuses = statuses;
    }
    config
}

fn resolve_range(config: &MatchCalConfig, from: Option<&str>, to: Option<&str>) -> Result<DateRange> {
    let default = DateRange::from_source(&config.source);
    Ok(DateRange::from_args(from, to, default)?)
}

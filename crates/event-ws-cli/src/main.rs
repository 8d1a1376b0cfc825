//! event-ws: query the earthquake event web service from the command line.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use event_ws::{EventQuery, EventWebService, Format};
use event_ws_cli::commands;
use event_ws_cli::QueryArgs;

#[derive(Parser)]
#[command(
    name = "event-ws",
    about = "Query the earthquake event web service",
    version
)]
struct Cli {
    /// Base URL of the service. Also reads EVENT_WS_URL.
    #[arg(long, global = true)]
    service_url: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the query URL without fetching it.
    Url {
        #[command(flatten)]
        query: QueryArgs,

        /// Output format requested from the service (geojson, csv, kml, quakeml, text, xml).
        #[arg(long)]
        format: Option<Format>,
    },

    /// Fetch matching events and print them.
    Events {
        #[command(flatten)]
        query: QueryArgs,

        /// Print the raw GeoJSON features instead of one line per event.
        #[arg(long)]
        json: bool,
    },

    /// Parse a saved GeoJSON response (gzip if it ends in .gz).
    Parse {
        file: PathBuf,

        /// Print the raw GeoJSON features instead of one line per event.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   event-ws completions bash > ~/.local/share/bash-completion/completions/event-ws
    ///   event-ws completions zsh > ~/.zfunc/_event-ws
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Url { query, format } => {
            let service = EventWebService::from_config(cli.service_url.as_deref())?;
            commands::url(&service, &EventQuery::from(query), format, &mut stdout)?;
        }

        Commands::Events { query, json } => {
            let service = EventWebService::from_config(cli.service_url.as_deref())?;
            tracing::debug!("Service: {}", service.service_url());
            commands::events(&service, &EventQuery::from(query), json, &mut stdout)?;
        }

        Commands::Parse { file, json } => {
            commands::parse_file(&file, json, &mut stdout)?;
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "event-ws", &mut stdout);
        }
    }

    Ok(())
}

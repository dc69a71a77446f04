mod commands;
mod render;
mod utils;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meetings_core::{ClientConfig, HttpStore, MeetingId, MeetingManager, TypeFilter};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::FieldArgs;

#[derive(Parser)]
#[command(name = "meetings")]
#[command(about = "Create, edit, filter and delete meetings on a meetings server")]
struct Cli {
    /// Server URL (overrides config.toml and MEETINGS_SERVER_URL)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Log requests and state changes to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show meetings as cards
    List {
        /// Only show meetings of this type ("All" for everything)
        #[arg(short = 't', long = "type", default_value = "All")]
        filter: TypeFilter,
    },
    /// Add a meeting (title, date, time and type are required)
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Change fields of an existing meeting
    Edit {
        id: MeetingId,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a meeting
    Delete { id: MeetingId },
    /// Interactive meeting page (the default)
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let view = MeetingManager::new(connect(cli.server.as_deref())?);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::List { filter } => commands::list::run(view, filter).await,
        Commands::Add { fields } => commands::add::run(view, fields).await,
        Commands::Edit { id, fields } => commands::edit::run(view, id, fields).await,
        Commands::Delete { id } => commands::delete::run(view, id).await,
        Commands::Shell => commands::shell::run(view).await,
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn connect(server: Option<&str>) -> Result<HttpStore> {
    let mut config = ClientConfig::load().context("Failed to load configuration")?;

    if let Some(url) = server {
        config.server_url = url.to_string();
    }

    debug!(server_url = %config.server_url, timeout_secs = config.timeout_secs, "using meetings server");
    HttpStore::new(&config).context("Failed to set up the meetings client")
}

//! # StockDesk Application
//!
//! Command-line host for the StockDesk order tools.
//!
//! ## Module Organization
//! ```text
//! stockdesk_app/
//! ├── lib.rs          ◄─── You are here (argument parsing & run)
//! └── commands/
//!     ├── mod.rs      ◄─── Shared input/output helpers
//!     ├── price.rs    ◄─── price, submit-preview
//!     └── draft.rs    ◄─── draft save/show/list/discard
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr, so stdout stays valid JSON)
//! 2. Parse arguments
//! 3. Load DeskConfig (file + env, defaults if the platform file is broken)
//! 4. Dispatch the command

pub mod commands;

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use stockdesk_draft::DeskConfig;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "stockdesk",
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to config.toml (defaults to the platform config dir)")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print subtotal, discount and total for an order form JSON file ('-' for stdin).
    Price { file: PathBuf },

    /// Validate an order form and print the payload for the order API.
    SubmitPreview { file: PathBuf },

    /// Manage locally cached drafts.
    #[command(subcommand)]
    Draft(DraftCommand),
}

#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    /// Save an order form as a draft.
    Save {
        file: PathBuf,
        #[arg(long, help = "Draft id (letters, digits, '-' or '_'); generated when omitted")]
        id: Option<String>,
    },
    /// Print a draft with its live totals.
    Show { id: String },
    /// List drafts, newest first.
    List,
    /// Delete a draft.
    Discard { id: String },
}

/// Runs the CLI with process arguments.
pub fn run() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.clone())?;
    info!(store = %config.store.name, "StockDesk starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(cli.command, &config, &mut out)
}

/// Loads the desk configuration.
///
/// A file named with `--config` must load and validate. Without one, a
/// broken platform config file falls back to the defaults with a warning.
pub fn load_config(path: Option<PathBuf>) -> anyhow::Result<DeskConfig> {
    match path {
        Some(path) => Ok(DeskConfig::load(Some(path))?),
        None => Ok(DeskConfig::load_or_default(None)),
    }
}

/// Dispatches one command, writing its output to `out`.
pub fn execute<W: Write>(command: Command, config: &DeskConfig, out: &mut W) -> anyhow::Result<()> {
    debug!(?command, "Executing command");
    match command {
        Command::Price { file } => commands::price::price(&file, config, out),
        Command::SubmitPreview { file } => commands::price::submit_preview(&file, out),
        Command::Draft(cmd) => commands::draft::execute(cmd, config, out),
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: `info,stockdesk=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockdesk=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

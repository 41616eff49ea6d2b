mod cmd;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use rangecal::calc::YearMonth;
use rangecal::data::AppSettings;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "rangecal.log";

#[derive(Parser)]
#[command(name = "rangecal", about = "pick a date range around reserved days")]
struct Cli {
    /// Path to the data directory containing config and reserved days (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    /// Month to open on, as YYYY-MM (default: the current month)
    #[arg(long, global = true)]
    month: Option<YearMonth>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data files with defaults
    Init,
    /// List reserved days
    Reserved {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print a month grid with reserved days marked
    Show {
        /// Print the rendered cells as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve data_dir to an absolute path so file I/O works regardless of
    // future directory changes within the process.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    rangecal::data::persistence::set_data_dir(data_dir.clone());

    // Auto-init when the data directory is missing or empty and the user did not
    // explicitly invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command && dir_needs_init(&data_dir) {
        eprintln!(
            "Data directory '{}' is missing or empty, running init...",
            data_dir.display()
        );
        cmd::init::run()?;
    }

    let settings = AppSettings::load()?;
    init_logging(&data_dir, &settings)?;
    tracing::info!(data_dir = %data_dir.display(), "rangecal starting");

    match cli.command {
        None => cmd::root::run(cli.month),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Reserved { json }) => cmd::reserved::run(json),
        Some(Commands::Show { json }) => cmd::show::run(cli.month, json),
    }
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

/// Sends `tracing` output to a log file in the data directory; the terminal
/// belongs to the UI. `RUST_LOG` overrides the configured level.
fn init_logging(data_dir: &Path, settings: &AppSettings) -> anyhow::Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create dir {}", data_dir.display()))?;
    let path = data_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

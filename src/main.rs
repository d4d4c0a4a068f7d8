use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hotel::cli::{
    handle_audit_command, handle_backup_command, handle_backups_command, handle_config_command,
    handle_show_command, run_menu, Prompter,
};
use hotel::config::{paths::DATA_DIR_ENV, HotelPaths, Settings};
use hotel::services::HotelService;

/// Environment variable holding the log filter
const LOG_ENV: &str = "HOTEL_LOG";

#[derive(Parser)]
#[command(
    name = "hotel",
    version,
    about = "Console room management for a single hotel",
    long_about = "Manages a hotel's rooms and the customers allocated to them. \
                  Allocations can be saved to a plain-text file in your Documents \
                  folder and rotated into timestamped backups."
)]
struct Cli {
    /// Directory holding the allocation file, backups and settings
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (default)
    Menu,

    /// Print the saved allocation file
    Show,

    /// Move the allocation file into a timestamped backup
    Backup,

    /// List existing backups, newest first
    Backups,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config {
        /// Write the settings file with the values in effect
        #[arg(long)]
        write: bool,
    },
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "hotel=debug" } else { "hotel=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = HotelPaths::resolve(cli.data_dir)?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(data_dir = %paths.base_dir().display(), "paths resolved");

    let mut service = HotelService::new(&paths, &settings)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), &mut out);
            run_menu(&mut service, &settings, &mut prompter)?;
        }
        Commands::Show => handle_show_command(&service, &mut out)?,
        Commands::Backup => handle_backup_command(&service, &mut out)?,
        Commands::Backups => handle_backups_command(&service, &mut out)?,
        Commands::Audit { limit } => handle_audit_command(&service, limit, &mut out)?,
        Commands::Config { write } => handle_config_command(&paths, &settings, write, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

//! Recent Files Menu entry point
//!
//! Small CLI over the recent files list, usable from host application hooks.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use recent_files_menu::menu::{build_display_table, build_recent_files_menu};
use recent_files_menu::{RecentFileManager, RecentFileStore, Result, Settings};

#[derive(Parser)]
#[command(name = "recent-files", version, about = "Recently opened documents list")]
struct Cli {
    /// Data file location (overrides RECENT_FILES_MENU_FILE)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty data file if none exists
    Init,
    /// Record a file as opened now
    Add {
        /// Path of the opened or saved document
        path: PathBuf,
        /// Application version the document was saved with
        #[arg(long)]
        save_version: Option<String>,
    },
    /// Print the display table
    List,
    /// Print menu tokens and labels, one per line
    Menu,
    /// Print the data file location
    Path,
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::from_env()?;
    if let Some(file) = cli.file {
        settings = settings.with_source_file(file);
    }

    match cli.command {
        Commands::Init => {
            let store = RecentFileStore::from_settings(&settings)?;
            if store.initialize()? {
                println!("Created {}", store.path().display());
            } else {
                println!("{} already exists", store.path().display());
            }
        }
        Commands::Add { path, save_version } => {
            let mut manager = RecentFileManager::from_settings(settings)?;
            manager.add_current_file(&path, save_version.as_deref())?;
        }
        Commands::List => {
            let manager = RecentFileManager::from_settings(settings)?;
            let rows = build_display_table(manager.files(), &manager.settings().timestamp_format)?;
            for row in rows {
                println!("{row}");
            }
        }
        Commands::Menu => {
            let mut manager = RecentFileManager::from_settings(settings)?;
            for item in build_recent_files_menu(&mut manager)? {
                println!("{item}");
            }
        }
        Commands::Path => {
            let store = RecentFileStore::from_settings(&settings)?;
            println!("{}", store.path().display());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::debug!("Recent Files Menu starting...");

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

//! SHELF CLI
//!
//! Command-line interface for SHELF - a personal book catalog.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use shelf_core::{Config, LibraryError, StorageError, Store};

mod commands;
mod logging;
mod menu;
mod output;
mod prompt;

use menu::Menu;
use output::{Output, OutputFormat};
use prompt::Prompter;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "SHELF - Personal library catalog")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file to use instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Library file to use for this run
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu
    Menu {
        /// Run a single menu cycle and exit
        #[arg(long)]
        once: bool,
    },
    /// Add a book
    Add {
        /// Book title
        title: String,
        /// Author name
        #[arg(short, long, default_value = "")]
        author: String,
        /// Publication year (free text)
        #[arg(short, long, default_value = "")]
        year: String,
        /// Genre
        #[arg(short, long, default_value = "")]
        genre: String,
        /// Mark the book as read
        #[arg(short, long)]
        read: bool,
    },
    /// Remove every book with this title
    #[command(alias = "rm")]
    Remove {
        /// Title (case-insensitive)
        title: String,
    },
    /// Search books by title or author
    Search {
        /// Field to search: title or author
        field: String,
        /// Text to look for (case-insensitive)
        term: String,
    },
    /// List all books
    #[command(alias = "ls")]
    List,
    /// Show reading statistics
    Stats,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, library_file, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    match run(cli, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, &output);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, output: &Output) -> Result<()> {
    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), output);
    }

    let mut config =
        Config::load_with_cli_override(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(path) = &cli.library {
        // Relative to the working directory, not data_dir
        let path = if path.is_absolute() {
            path.clone()
        } else {
            std::env::current_dir()?.join(path)
        };
        config.library_file = Some(path);
    }

    logging::init_logging(&config, cli.verbose);
    debug!("Using library file {:?}", config.library_path());

    // A corrupt library stops here, before any operation runs
    let mut store = Store::open_with_config(config)?;

    match cli.command {
        None => run_menu(&mut store, false, output),
        Some(Commands::Menu { once }) => run_menu(&mut store, once, output),
        Some(Commands::Add {
            title,
            author,
            year,
            genre,
            read,
        }) => commands::book::add(&mut store, title, author, year, genre, read, output),
        Some(Commands::Remove { title }) => commands::book::remove(&mut store, title, output),
        Some(Commands::Search { field, term }) => {
            commands::book::search(&mut store, field, term, output)
        }
        Some(Commands::List) => commands::book::list(&mut store, output),
        Some(Commands::Stats) => commands::book::stats(&mut store, output),
        Some(Commands::Config { .. }) => Ok(()), // Handled above
    }
}

fn run_menu(store: &mut Store, once: bool, output: &Output) -> Result<()> {
    let mut menu = Menu::new(store, Prompter::stdio(), output);
    menu.run(once)
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Print an error chain plus any recovery hint
fn report_error(err: &anyhow::Error, output: &Output) {
    let hint = err
        .downcast_ref::<StorageError>()
        .or_else(|| match err.downcast_ref::<LibraryError>() {
            Some(LibraryError::Storage(e)) => Some(e),
            _ => None,
        })
        .and_then(StorageError::recovery_suggestion);

    if output.is_json() {
        eprintln!(
            "{}",
            serde_json::json!({
                "status": "error",
                "message": format!("{:#}", err),
                "hint": hint
            })
        );
        return;
    }

    eprintln!("✗ {:#}", err);
    if let Some(hint) = hint {
        if !output.is_quiet() {
            eprintln!("  {}", hint);
        }
    }
}

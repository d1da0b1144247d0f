//! Helium CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Pick what to work on
//! helium projects
//! helium select project proj-1
//! helium locales
//! helium select locale fr
//!
//! # List records, optionally filtered by a fuzzy query
//! helium
//! helium search "btn sav" --ranked
//!
//! # Change a value
//! helium edit button.save "Enregistrer"
//!
//! # Check interpolation variables across locales
//! helium validate
//! ```
//!
//! # Configuration
//!
//! On first run, helium prompts for the translation service URL. Configuration
//! is stored in the user's config directory (`~/.config/helium/config.toml` on
//! Linux). Log verbosity follows `RUST_LOG`, falling back to `log_filter`.

use colored::Colorize;
use helium::{
    HeliumError, HttpSyncClient, SelectionStore, Workspace,
    cli::{Cli, Commands, ConfigCommands},
    commands,
    config::HeliumConfig,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, HeliumError>;

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_config_command(mut config: HeliumConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let store_path = config.resolved_store_path()?;
            println!("api_url    = {}", config.api_url);
            println!("store_path = {}", store_path.display());
            println!("log_filter = {}", config.log_filter);
            println!("quiet      = {}", config.quiet);
        }
        ConfigCommands::SetUrl { url } => {
            HttpSyncClient::new(url)?;
            config.set_api_url(url.clone())?;
            if !quiet {
                println!("{} Service URL set to {url}", "✓".green());
            }
        }
    }
    Ok(())
}

async fn run(cli: Cli, config: HeliumConfig) -> Result<()> {
    let quiet = cli.quiet || config.quiet;
    let command = cli.get_command();

    if let Commands::Config { command } = &command {
        return handle_config_command(config, command, quiet);
    }

    let api_url = cli.api_url.clone().unwrap_or_else(|| config.api_url.clone());
    let store_path = config.resolved_store_path()?;
    debug!(api_url = %api_url, store = %store_path.display(), "starting");

    let client = HttpSyncClient::new(&api_url)?;
    let store = SelectionStore::open(&store_path)?;
    let mut workspace = Workspace::new(client, store);

    match &command {
        Commands::Projects => commands::projects(&mut workspace, quiet).await,
        Commands::Locales => commands::locales(&mut workspace, quiet).await,
        Commands::Select { target } => commands::select(&mut workspace, target, quiet).await,
        Commands::Search { query, ranked } => {
            let query = query.as_deref().unwrap_or("");
            commands::list(&mut workspace, Some(query), *ranked, quiet).await
        }
        Commands::List { ranked } => commands::list(&mut workspace, None, *ranked, quiet).await,
        Commands::Edit { key, value } => commands::edit(&mut workspace, key, value, quiet).await,
        Commands::Validate => commands::validate(&workspace, quiet).await,
        Commands::Status => {
            commands::status(&workspace, &api_url, quiet);
            Ok(())
        }
        Commands::Config { .. } => unreachable!(),
    }
}

/// Main entry point for the helium application
///
/// Loads configuration, sets up logging, parses command-line arguments, and
/// dispatches to the appropriate command handler.
#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let config = match HeliumConfig::load_or_setup() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            std::process::exit(1);
        }
    };
    init_tracing(&config.log_filter);

    if let Err(e) = run(cli, config).await {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}

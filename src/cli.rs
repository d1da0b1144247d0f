//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **projects** / **locales**: list what the service offers
//! - **select**: persist the active project or locale
//! - **search**: persist a search query and list matching records
//! - **list**: list records with the persisted query (default)
//! - **edit**: change one value and commit it
//! - **validate**: show interpolation problems of the selected project
//! - **status**: show the persisted selection
//! - **config**: show or change configuration

use clap::{Parser, Subcommand};

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "helium")]
#[command(about = "Translation record editor", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Translation service URL (overrides config)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List available projects
    #[command(visible_alias = "p")]
    Projects,

    /// List available locales
    #[command(visible_alias = "l")]
    Locales,

    /// Select the active project or locale
    #[command(visible_alias = "s")]
    Select {
        #[command(subcommand)]
        target: SelectCommands,
    },

    /// Set the search query and list matching records
    #[command(visible_alias = "f")]
    Search {
        /// Query; omit to clear
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Order by match score instead of server order
        #[arg(short = 'r', long = "ranked")]
        ranked: bool,
    },

    /// List records of the selected project and locale (default)
    #[command(visible_alias = "ls")]
    List {
        /// Order by match score instead of server order
        #[arg(short = 'r', long = "ranked")]
        ranked: bool,
    },

    /// Change the value of one translation key
    #[command(visible_alias = "e")]
    Edit {
        /// Translation key, e.g. `button.save`
        #[arg(value_name = "KEY")]
        key: String,

        /// New value
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Show interpolation problems of the selected project
    #[command(visible_alias = "v")]
    Validate,

    /// Show the persisted selection
    Status,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Selection targets
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SelectCommands {
    /// Select a project by id
    Project {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Select a locale by code
    Locale {
        #[arg(value_name = "CODE")]
        code: String,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the current configuration
    Show,
    /// Change the translation service URL
    #[command(name = "set-url")]
    SetUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to List if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::List { ranked: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list() {
        let cli = Cli::parse_from(["helium"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.get_command(), Commands::List { ranked: false });
    }

    #[test]
    fn test_parse_select() {
        let cli = Cli::parse_from(["helium", "select", "project", "proj-1"]);
        assert_eq!(
            cli.command,
            Some(Commands::Select { target: SelectCommands::Project { id: "proj-1".into() } })
        );

        let cli = Cli::parse_from(["helium", "s", "locale", "fr"]);
        assert_eq!(
            cli.command,
            Some(Commands::Select { target: SelectCommands::Locale { code: "fr".into() } })
        );
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["helium", "search", "sav", "--ranked"]);
        assert_eq!(cli.command, Some(Commands::Search { query: Some("sav".into()), ranked: true }));

        let cli = Cli::parse_from(["helium", "search"]);
        assert_eq!(cli.command, Some(Commands::Search { query: None, ranked: false }));
    }

    #[test]
    fn test_parse_edit() {
        let cli = Cli::parse_from(["helium", "edit", "button.save", "Enregistrer"]);
        assert_eq!(
            cli.command,
            Some(Commands::Edit { key: "button.save".into(), value: "Enregistrer".into() })
        );
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["helium", "projects", "-q", "--api-url", "http://example.com"]);
        assert!(cli.quiet);
        assert_eq!(cli.api_url.as_deref(), Some("http://example.com"));
        assert_eq!(cli.command, Some(Commands::Projects));
    }

    #[test]
    fn test_parse_config_set_url() {
        let cli = Cli::parse_from(["helium", "config", "set-url", "http://example.com"]);
        assert_eq!(
            cli.command,
            Some(Commands::Config { command: ConfigCommands::SetUrl { url: "http://example.com".into() } })
        );
    }
}

//! Interactive setup wizard for first-time configuration
//!
//! Prompts for the translation service URL and the selection store location
//! when helium is run for the first time.

use super::{DEFAULT_API_URL, HeliumConfig};
use crate::selection::SelectionStore;
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::PathBuf;

/// Interactive first-time setup - prompts for service URL and store location
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The system data directory cannot be determined
/// - User input cannot be read
/// - The configuration cannot be saved
pub fn first_time_setup() -> Result<HeliumConfig, ConfigError> {
    println!("Welcome to helium! Let's point it at your translation service.\n");

    let api_url: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Translation service URL")
        .default(DEFAULT_API_URL.to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let default_store =
        SelectionStore::default_path().map_err(|e| ConfigError::Message(e.to_string()))?;
    let store_path_str: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Selection store location")
        .default(default_store.to_string_lossy().to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let store_path = PathBuf::from(store_path_str);
    let config = HeliumConfig {
        api_url,
        store_path: (store_path != default_store).then_some(store_path),
        ..HeliumConfig::default()
    };

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}

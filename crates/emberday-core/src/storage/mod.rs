mod config;
pub mod database;

pub use config::{Config, NotificationsConfig, UiConfig};
pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/emberday[-dev]/` based on EMBERDAY_ENV.
///
/// Set EMBERDAY_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("EMBERDAY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("emberday-dev")
    } else {
        base_dir.join("emberday")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

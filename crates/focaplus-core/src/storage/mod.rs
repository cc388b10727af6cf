mod config;
pub mod database;

pub use config::Config;
pub use database::{Database, LoggedSession, StudyStats};

use std::path::PathBuf;

/// Returns `~/.config/focaplus[-dev]/` based on FOCAPLUS_ENV.
///
/// Set FOCAPLUS_ENV=dev to use a separate development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCAPLUS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focaplus-dev")
    } else {
        base_dir.join("focaplus")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

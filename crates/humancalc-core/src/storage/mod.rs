mod config;
pub mod database;

pub use config::{AccessConfig, Config, DisplayConfig, GameConfig};
pub use database::{RoundRecord, SessionDb, SessionSummary};

use std::path::PathBuf;

/// Returns `~/.config/humancalc[-dev]/` based on HUMANCALC_ENV.
///
/// Set HUMANCALC_ENV=dev to use the development directory, or
/// HUMANCALC_CONFIG_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("HUMANCALC_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("HUMANCALC_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("humancalc-dev")
            } else {
                base_dir.join("humancalc")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

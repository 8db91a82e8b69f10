mod config;
pub mod database;
pub mod store;

pub use config::{CoachConfig, Config, LogConfig, PanicConfig, UiConfig};
pub use database::Database;
pub use store::{StatsStore, SHIELD_KEY, STATS_KEY, USER_KEY};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the data directory, creating it if needed.
///
/// `PUREPATH_DATA_DIR` wins when set. Otherwise `~/.config/purepath[-dev]/`
/// based on `PUREPATH_ENV` (set `PUREPATH_ENV=dev` for a development copy).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("PUREPATH_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("PUREPATH_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("purepath-dev")
            } else {
                base_dir.join("purepath")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

//! Centralized path resolution for Ziptos
//!
//! Base directory follows platform standards:
//! - **macOS**: `~/Library/Application Support/Ziptos/`
//! - **Windows**: `%LOCALAPPDATA%\Ziptos\`
//! - **Linux**: `$XDG_DATA_HOME/Ziptos/` (fallback `~/.local/share/Ziptos/`)
//!
//! ```text
//! Ziptos/
//! ├── data/
//! │ └── config.toml
//! └── logs/
//!   └── ziptos_<date>.log
//! ```

use once_cell::sync::Lazy;
use std::path::PathBuf;

const APP_DIR: &str = "Ziptos";

static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

fn resolve_base_directory() -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(dir) = dirs::data_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(APP_DIR);
    }

    PathBuf::from(APP_DIR)
}

/// Returns the data directory path
pub fn get_data_directory() -> PathBuf {
    BASE_DIRECTORY.join("data")
}

/// Returns the logs directory path
pub fn get_logs_directory() -> PathBuf {
    BASE_DIRECTORY.join("logs")
}

/// Returns the main configuration file path
pub fn get_config_path() -> PathBuf {
    get_data_directory().join("config.toml")
}

/// Creates every directory Ziptos writes into
///
/// Runs before the logger is initialized, so failures are returned rather
/// than logged.
pub fn ensure_all_directories() -> Result<(), String> {
    for dir in [get_data_directory(), get_logs_directory()] {
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_base() {
        let base = BASE_DIRECTORY.clone();
        assert!(base.ends_with(APP_DIR));
        assert_eq!(get_config_path(), base.join("data").join("config.toml"));
        assert!(get_logs_directory().starts_with(&base));
    }
}

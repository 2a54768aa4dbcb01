//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/bandmod/`
//! - macOS: `~/Library/Application Support/bandmod/`
//! - Windows: `%APPDATA%\bandmod\`

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "bandmod";

/// File name of the default engine config.
pub const DEFAULT_CONFIG_FILE: &str = "engine.toml";

/// Returns the user-specific configuration directory.
///
/// Falls back to the current directory if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the engine config used when none is given explicitly.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(DEFAULT_CONFIG_FILE)
}

/// The default config path, if a file exists there.
pub fn find_default_config() -> Option<PathBuf> {
    let path = default_config_path();
    path.is_file().then_some(path)
}

/// Create `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<(), ConfigError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::create_dir(dir, e))?;
    }
    Ok(())
}

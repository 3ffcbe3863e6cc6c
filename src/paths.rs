//! Centralized path definitions
//!
//! ## Storage Layout
//!
//! The tracker keeps no data on disk. The only file it reads is the
//! optional user-level configuration:
//!
//! ```text
//! $XDG_CONFIG_HOME/habit-tracker/
//! └── config.toml               # Listen address, workers, CORS
//! ```

use std::path::PathBuf;

/// Config directory name under the platform config dir
const CONFIG_DIR: &str = "habit-tracker";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Get the user-level config directory.
///
/// Returns `None` when the platform has no notion of a config dir.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR))
}

/// Get the user-level config file path.
#[must_use]
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

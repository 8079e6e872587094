//! Path resolution for shuls configuration files.
//!
//! ```text
//! ~/.config/shuls/        # Config directory (platform config dir)
//! └── config.toml         # Client configuration
//! ```

use shuls_core::{Result, ShulsError};
use std::path::PathBuf;

const APP_DIR: &str = "shuls";
const CONFIG_FILE: &str = "config.toml";

pub struct ShulsPaths;

impl ShulsPaths {
    /// The platform configuration directory for shuls.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ShulsError::config("Cannot find the configuration directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}

//! Unified path management for dojo configuration files.
//!
//! ```text
//! ~/.config/dojo/              # Config directory (platform dependent)
//! └── config.toml              # Client configuration
//! ```

use dojo_core::{DojoError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "dojo";
const CONFIG_FILE: &str = "config.toml";

pub struct DojoPaths;

impl DojoPaths {
    /// Returns the dojo configuration directory.
    ///
    /// # Errors
    ///
    /// `Config` if the platform config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| DojoError::config("Cannot find config directory"))
    }

    /// Returns the path of `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}

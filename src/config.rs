//! Compiled-in application configuration.
//!
//! The interpreter takes no flags and reads no environment; everything here
//! is a default resolved once at startup.

use anyhow::{Result, anyhow};
use std::path::PathBuf;

use crate::logging::LogConfig;
use crate::shell::ShellConfig;

/// Name of the per-user data directory under the home directory.
const DATA_DIR_NAME: &str = ".interp";

/// Name of the log file inside the data directory.
const LOG_FILE_NAME: &str = "interp.log";

/// Top-level configuration for the binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the log file.
    pub data_dir: PathBuf,
    /// Logging configuration.
    pub log: LogConfig,
    /// Shell configuration.
    pub shell: ShellConfig,
}

impl AppConfig {
    /// Resolves the configuration rooted at `~/.interp`.
    pub fn new() -> Result<Self> {
        let data_dir = data_dir()?;
        Ok(Self::with_data_dir(data_dir))
    }

    /// Builds the configuration rooted at the given data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            log: LogConfig::new(data_dir.join(LOG_FILE_NAME)),
            shell: ShellConfig::default(),
            data_dir,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_data_dir(PathBuf::from("."))
    }
}

/// Returns `~/.interp`. The directory itself is created lazily by the logger.
pub fn data_dir() -> Result<PathBuf> {
    dirs_next::home_dir()
        .map(|home| home.join(DATA_DIR_NAME))
        .ok_or_else(|| anyhow!("Could not determine home directory"))
}

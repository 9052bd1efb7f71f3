//! Logging infrastructure for the interpreter.
//!
//! Log records go to a file with timestamps; warnings and errors are also
//! echoed to the terminal when one is attached.

use anyhow::{Result, anyhow};
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Path to the log file.
    pub path: PathBuf,
    /// Minimum log level to record.
    pub level: LevelFilter,
    /// Maximum log file size in bytes before rotation (0 = no limit).
    pub max_size: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("interp.log"),
            level: LevelFilter::Info,
            max_size: 10 * 1024 * 1024, // 10 MB
        }
    }
}

impl LogConfig {
    /// Creates a new LogConfig with the specified path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    /// Sets the log level.
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Sets the maximum log file size.
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Returns true if the existing log file is over the size limit.
    fn needs_rotation(&self) -> bool {
        if self.max_size == 0 {
            return false;
        }
        std::fs::metadata(&self.path)
            .map(|m| m.len() > self.max_size)
            .unwrap_or(false)
    }
}

/// Initializes the global logger.
///
/// Sets up a combined logger that writes to:
/// - the log file, at the configured level, with RFC 3339 timestamps
/// - the terminal, at Warn and above, when `TERM` is set
///
/// Can only succeed once per process.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    if config.needs_rotation() {
        rotate_log(&config.path)?;
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.path)
        .map_err(|e| anyhow!("Failed to open log file: {}", e))?;

    let file_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Debug)
        .build();

    let term_config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> =
        vec![WriteLogger::new(config.level, file_config, log_file)];

    if std::env::var("TERM").is_ok() {
        loggers.push(TermLogger::new(
            LevelFilter::Warn,
            term_config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    CombinedLogger::init(loggers).map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    log::info!("Logging initialized at level {:?}", config.level);
    log::debug!("Log file: {}", config.path.display());

    Ok(())
}

/// Builds the name a log file is rotated to.
fn rotated_path(path: &Path, timestamp: &str) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("interp.log");
    path.with_file_name(format!("{}.{}", file_name, timestamp))
}

/// Rotates the log file by renaming it with a timestamp suffix.
fn rotate_log(path: &Path) -> Result<()> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let rotated = rotated_path(path, &timestamp);
    std::fs::rename(path, &rotated)?;
    log::info!("Rotated log file to: {}", rotated.display());
    Ok(())
}

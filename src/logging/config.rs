//! Logging configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level (trace, debug, info, warn, error)
    pub global_level: String,

    /// Extra verbosity steps on top of `global_level` (the CLI `-v` count)
    #[serde(skip)]
    pub verbosity: u8,

    /// Enable console output on stderr
    pub console_output: bool,

    /// Directory for log files (None = no file logging)
    pub log_directory: Option<PathBuf>,

    /// Include file location in logs
    pub include_file_location: bool,

    /// Write the log file as JSON lines
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            global_level: "info".to_string(),
            verbosity: 0,
            console_output: true,
            log_directory: None,
            include_file_location: false,
            json_format: true,
        }
    }
}

impl LoggingConfig {
    /// Verbose console logging with source locations
    pub fn development() -> Self {
        Self {
            global_level: "debug".to_string(),
            include_file_location: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !VALID_LEVELS.contains(&self.global_level.as_str()) {
            return Err(format!(
                "Invalid global_level: {}. Must be one of: {:?}",
                self.global_level, VALID_LEVELS
            ));
        }

        if let Some(ref log_dir) = self.log_directory {
            if let Some(parent) = log_dir.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(format!("Log directory parent does not exist: {:?}", parent));
                }
            }
        }

        Ok(())
    }

    /// `global_level` raised by `verbosity` steps, saturating at trace.
    pub fn effective_level(&self) -> &'static str {
        let base = VALID_LEVELS
            .iter()
            .position(|level| *level == self.global_level)
            .unwrap_or(2);
        let index = base.saturating_sub(self.verbosity as usize);
        VALID_LEVELS[index]
    }
}

//! Optional RON configuration for the terminal front end.
//!
//! Precedence is defaults, then the config file, then command-line flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use decksmith_engine::GenerateSettings;
use decksmith_logging::LogDestination;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Args;

pub const DEFAULT_CONFIG_FILE: &str = "decksmith.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogTarget {
    File,
    #[default]
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub destination: LogTarget,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogTarget::Terminal,
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Unknown level names fall back to `warn`.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.level).unwrap_or(LevelFilter::Warn)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub output_dir: PathBuf,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub max_response_bytes: Option<u64>,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let engine = GenerateSettings::default();
        Self {
            endpoint: engine.endpoint,
            output_dir: PathBuf::from("."),
            connect_timeout_secs: engine.connect_timeout.map(|d| d.as_secs()),
            request_timeout_secs: engine.request_timeout.map(|d| d.as_secs()),
            max_retries: engine.max_retries,
            retry_backoff_ms: engine.retry_backoff.as_millis() as u64,
            max_response_bytes: engine.max_response_bytes,
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn with_overrides(mut self, args: &Args) -> Self {
        if let Some(endpoint) = &args.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(output_dir) = &args.output_dir {
            self.output_dir = output_dir.clone();
        }
        if let Some(timeout) = args.timeout {
            self.request_timeout_secs = Some(timeout);
        }
        if let Some(retries) = args.retries {
            self.max_retries = retries;
        }
        if let Some(log_file) = &args.log_file {
            self.log.file = Some(log_file.clone());
            if self.log.destination == LogTarget::Terminal {
                self.log.destination = LogTarget::Both;
            }
        }
        self
    }

    pub fn generate_settings(&self) -> GenerateSettings {
        GenerateSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_retries: self.max_retries,
            retry_backoff: Duration::from_millis(self.retry_backoff_ms),
            max_response_bytes: self.max_response_bytes,
        }
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
    }
}

/// Loads `explicit`, or `./decksmith.ron` when no path is given.
///
/// A missing default file means defaults; a missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if explicit.is_none() && err.kind() == io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path,
        message: err.to_string(),
    })
}

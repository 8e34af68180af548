use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use contacts_engine::ApiSettings;
use contacts_logging::contacts_info;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cli::Args;
use super::logging::LogDestination;

const DEFAULT_CONFIG_FILENAME: &str = "contacts.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

/// Settings read from `contacts.ron`; every field may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    /// No limit when absent.
    pub request_timeout_secs: Option<u64>,
    pub log_level: String,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: api.base_url,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.map(|timeout| timeout.as_secs()),
            log_level: "info".to_string(),
            log_destination: LogDestination::default(),
            log_file: PathBuf::from("./contacts.log"),
        }
    }
}

impl AppConfig {
    /// Loads `explicit`, or `./contacts.ron` when no path is given.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILENAME);
                if path.exists() {
                    Self::read(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        contacts_info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Command-line flags win over the file.
    pub fn with_overrides(mut self, args: &Args) -> Self {
        if let Some(base_url) = &args.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        if let Some(destination) = args.log_destination {
            self.log_destination = destination;
        }
        self
    }

    pub fn level(&self) -> Result<LevelFilter, ConfigError> {
        contacts_logging::parse_level(&self.log_level)
            .ok_or_else(|| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

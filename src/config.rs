//! Environment-sourced service configuration.
//!
//! Every knob has a documented default so the service starts with no
//! environment at all, pointing at a local Rasa instance.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::EngineMode;
use crate::fallback::FallbackMode;

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// `BIND_ADDR` is not a valid socket address.
    InvalidBindAddr { value: String, source: std::net::AddrParseError },
    /// `CHAT_ENGINE` is not `rules` or `remote`.
    InvalidEngineMode(String),
    /// `FALLBACK_MODE` is not `keyword` or `random`.
    InvalidFallbackMode(String),
    /// `RASA_TIMEOUT_SECS` is not a positive integer.
    InvalidTimeout { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBindAddr { value, source } => {
                write!(f, "invalid BIND_ADDR '{}': {}", value, source)
            }
            Self::InvalidEngineMode(value) => {
                write!(f, "invalid CHAT_ENGINE '{}' (expected 'rules' or 'remote')", value)
            }
            Self::InvalidFallbackMode(value) => {
                write!(f, "invalid FALLBACK_MODE '{}' (expected 'keyword' or 'random')", value)
            }
            Self::InvalidTimeout { value } => {
                write!(f, "invalid RASA_TIMEOUT_SECS '{}' (expected a positive integer)", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBindAddr { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Config {
    /// Base URL of the Rasa NLU server. Default `http://localhost:5005`.
    pub rasa_url: String,
    /// Address the HTTP server binds. Default `0.0.0.0:5000`.
    pub bind_addr: SocketAddr,
    /// SQLite database file. Default `emd_chatbot.db`.
    pub database_path: PathBuf,
    /// Directory holding the reference JSON files and logs. Default `data`.
    pub data_dir: PathBuf,
    /// Which classification path answers /chat. Default rules.
    pub engine_mode: EngineMode,
    /// How the fallback selector picks a reply. Default keyword.
    pub fallback_mode: FallbackMode,
    /// Bound on the remote NLU call. Default 5 s.
    pub rasa_timeout: Duration,
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let rasa_url = lookup("RASA_URL").unwrap_or_else(|| "http://localhost:5005".to_string());

        let bind_value = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:5000".to_string());
        let bind_addr = bind_value
            .parse()
            .map_err(|e| ConfigError::InvalidBindAddr { value: bind_value, source: e })?;

        let database_path = lookup("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("emd_chatbot.db"));

        let data_dir = lookup("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));

        let engine_mode = match lookup("CHAT_ENGINE").as_deref() {
            None | Some("rules") => EngineMode::Rules,
            Some("remote") => EngineMode::Remote,
            Some(other) => return Err(ConfigError::InvalidEngineMode(other.to_string())),
        };

        let fallback_mode = match lookup("FALLBACK_MODE").as_deref() {
            None | Some("keyword") => FallbackMode::Keyword,
            Some("random") => FallbackMode::Random,
            Some(other) => return Err(ConfigError::InvalidFallbackMode(other.to_string())),
        };

        let rasa_timeout = match lookup("RASA_TIMEOUT_SECS") {
            None => Duration::from_secs(5),
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout { value }),
            },
        };

        Ok(Self {
            rasa_url,
            bind_addr,
            database_path,
            data_dir,
            engine_mode,
            fallback_mode,
            rasa_timeout,
        })
    }
}

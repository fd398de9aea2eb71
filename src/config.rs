//! Runtime configuration from `CARDIOWISE_*` environment variables.

use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CARDIOWISE_DB_PATH";
pub const LOG_MODE_ENV: &str = "CARDIOWISE_LOG_MODE";
pub const LOG_FILE_ENV: &str = "CARDIOWISE_LOG_FILE";
pub const HISTORY_LIMIT_ENV: &str = "CARDIOWISE_HISTORY_LIMIT";
pub const PREDICTION_SEED_ENV: &str = "CARDIOWISE_PREDICTION_SEED";

const DEFAULT_DB_PATH: &str = "cardiowise.db";
const DEFAULT_LOG_FILE: &str = "cardiowise.log";
const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise.
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "file" => Some(Self::File),
            "stdout" => Some(Self::Stdout),
            _ => None,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::Auto => interactive,
            Self::File => true,
            Self::Stdout => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    /// Rows per history page.
    pub history_limit: usize,
    /// Fixed seed for the headline predictor.
    pub prediction_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            history_limit: DEFAULT_HISTORY_LIMIT,
            prediction_seed: None,
        }
    }
}

impl Config {
    /// Read the process environment, logging any ignored values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the process environment, returning ignored-value warnings
    /// instead of logging them. For callers that install logging from the
    /// config itself.
    #[must_use]
    pub fn from_env_with_warnings() -> (Self, Vec<String>) {
        Self::load(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (config, warnings) = Self::load(lookup);
        for warning in &warnings {
            tracing::warn!("{warning}");
        }
        config
    }

    /// Build from a key lookup, collecting a message per ignored value.
    pub fn load<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut warnings = Vec::new();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path.trim());
        }
        if let Some(path) = get(LOG_FILE_ENV) {
            config.log_file = PathBuf::from(path.trim());
        }

        if let Some(raw) = get(LOG_MODE_ENV) {
            match LogMode::parse(&raw) {
                Some(mode) => config.log_mode = mode,
                None => warnings.push(format!(
                    "Ignoring {LOG_MODE_ENV}={raw:?}, expected auto|file|stdout"
                )),
            }
        }

        if let Some(raw) = get(HISTORY_LIMIT_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.history_limit = n,
                _ => warnings.push(format!(
                    "Ignoring {HISTORY_LIMIT_ENV}={raw:?}, using {DEFAULT_HISTORY_LIMIT}"
                )),
            }
        }

        if let Some(raw) = get(PREDICTION_SEED_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => config.prediction_seed = Some(seed),
                Err(_) => warnings.push(format!(
                    "Ignoring {PREDICTION_SEED_ENV}={raw:?}, not a u64"
                )),
            }
        }

        (config, warnings)
    }
}

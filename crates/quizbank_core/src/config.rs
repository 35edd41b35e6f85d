//! Application configuration.
//!
//! Values are read from an optional TOML file; unset keys fall back to
//! defaults. The file is looked up at `<config_dir>/quizbank/config.toml`
//! unless an explicit path is given.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_DIR_NAME: &str = "quizbank";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_DB_FILE_NAME: &str = "quizbank.sqlite3";
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 60;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

/// File shape; every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAppConfig {
    data_dir: Option<PathBuf>,
    db_file_name: Option<String>,
    log_level: Option<String>,
    autosave_interval_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_file_name: String,
    pub log_level: String,
    pub autosave_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
            log_level: default_log_level().to_string(),
            autosave_interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
        }
    }
}

impl AppConfig {
    /// Loads `explicit`, or the default location when `None`.
    ///
    /// A missing default file yields defaults; a missing explicit file is an
    /// error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse { path, source },
            other => other,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawAppConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        Self::finalize(raw)
    }

    fn finalize(raw: RawAppConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let autosave_secs = raw
            .autosave_interval_secs
            .unwrap_or(DEFAULT_AUTOSAVE_INTERVAL_SECS);
        if autosave_secs == 0 {
            return Err(ConfigError::Invalid(
                "autosave_interval_secs must be greater than zero".to_string(),
            ));
        }
        let db_file_name = raw
            .db_file_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(defaults.db_file_name);

        let data_dir = match raw.data_dir {
            Some(dir) => resolve_data_dir(dir)?,
            None => defaults.data_dir,
        };

        Ok(Self {
            data_dir,
            db_file_name,
            log_level: raw.log_level.unwrap_or(defaults.log_level),
            autosave_interval: Duration::from_secs(autosave_secs),
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file_name)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// `<data_dir>/quizbank`, or `quizbank` under the working directory when the
/// platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Anchors a relative `data_dir` to the working directory at load time.
///
/// The log directory is derived from it and must be absolute.
fn resolve_data_dir(dir: PathBuf) -> Result<PathBuf, ConfigError> {
    if dir.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("data_dir must not be empty".to_string()));
    }
    if dir.is_absolute() {
        return Ok(dir);
    }
    let cwd = std::env::current_dir().map_err(|err| {
        ConfigError::Invalid(format!(
            "data_dir `{}` is relative and the working directory is unavailable: {err}",
            dir.display()
        ))
    })?;
    Ok(cwd.join(dir))
}

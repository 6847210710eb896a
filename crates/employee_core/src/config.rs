//! Store configuration.
//!
//! # Responsibility
//! - Resolve the project/namespace identifier and local store settings from
//!   the environment or a JSON document.
//! - Open the configured datastore client.
//!
//! # Invariants
//! - `project` is never empty after loading.
//! - Blank optional values normalize to `None`.
//! - `log_level` is one of `trace|debug|info|warn|error`.

use crate::logging::{default_log_level, normalize_level};
use crate::store::{SqliteDatastore, StoreError};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_PROJECT: &str = "EMPLOYEE_STORE_PROJECT";
pub const ENV_NAMESPACE: &str = "EMPLOYEE_STORE_NAMESPACE";
pub const ENV_DB_PATH: &str = "EMPLOYEE_STORE_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "EMPLOYEE_STORE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "EMPLOYEE_STORE_LOG_DIR";

#[derive(Debug)]
pub enum ConfigError {
    MissingProject,
    InvalidLogLevel(String),
    InvalidJson(serde_json::Error),
    Store(StoreError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingProject => write!(f, "store project id is required ({ENV_PROJECT})"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::InvalidJson(err) => write!(f, "invalid store config: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::MissingProject | Self::InvalidLogLevel(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value)
    }
}

impl From<StoreError> for ConfigError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Datastore connection and logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Project identifier; also the default namespace.
    pub project: String,
    #[serde(default)]
    pub namespace: Option<String>,
    /// Store file; `None` selects an in-memory store.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default = "default_log_level_string")]
    pub log_level: String,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Loads settings from `EMPLOYEE_STORE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self {
            project: lookup(ENV_PROJECT).unwrap_or_default(),
            namespace: lookup(ENV_NAMESPACE),
            db_path: lookup(ENV_DB_PATH).map(PathBuf::from),
            log_level: lookup(ENV_LOG_LEVEL).unwrap_or_else(default_log_level_string),
            log_dir: lookup(ENV_LOG_DIR).map(PathBuf::from),
        }
        .normalized()
    }

    /// Parses settings from a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.normalized()
    }

    /// Namespace applied to store keys: explicit namespace, else project.
    pub fn effective_namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(&self.project)
    }

    /// Opens the configured datastore with migrations applied.
    pub fn open_datastore(&self) -> Result<SqliteDatastore, ConfigError> {
        let namespace = Some(self.effective_namespace());
        let store = match &self.db_path {
            Some(path) => SqliteDatastore::open(path, namespace)?,
            None => SqliteDatastore::open_in_memory(namespace)?,
        };
        Ok(store)
    }

    fn normalized(self) -> Result<Self, ConfigError> {
        let project = self.project.trim().to_string();
        if project.is_empty() {
            return Err(ConfigError::MissingProject);
        }
        let log_level = normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;

        Ok(Self {
            project,
            namespace: non_blank(self.namespace),
            db_path: self.db_path.filter(|path| !path.as_os_str().is_empty()),
            log_level: log_level.to_string(),
            log_dir: self.log_dir.filter(|path| !path.as_os_str().is_empty()),
        })
    }
}

fn default_log_level_string() -> String {
    default_log_level().to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

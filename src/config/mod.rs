// src/config/mod.rs
//
// Runtime settings
//
// Read once at startup and handed to constructors. Precedence, lowest first:
// built-in defaults, TOML file, environment variables, command-line flags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::db::default_database_path;
use crate::error::{AppError, AppResult};

pub const DEFAULT_LIMIT: u32 = 7;
pub const DEFAULT_POOL_SIZE: u32 = 8;

pub const ENV_DEFAULT_LIMIT: &str = "DEFAULT_LIMIT";
pub const ENV_DATABASE: &str = "POKEDEX_DATABASE";
pub const ENV_POOL_SIZE: &str = "POKEDEX_POOL_SIZE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Page size used when a list request omits `limit`
    pub default_limit: u32,
    /// Database file; falls back to the platform data directory
    pub database_path: Option<PathBuf>,
    pub pool_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            database_path: None,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl Settings {
    /// Defaults, overlaid with `path` when given, then with the process
    /// environment.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.with_env(|key| std::env::var(key).ok())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read config {}: {}", path.display(), e))
        })?;
        log::debug!("Loaded settings from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply environment overrides through `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_DEFAULT_LIMIT) {
            self.default_limit = parse_env(ENV_DEFAULT_LIMIT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_DATABASE) {
            self.database_path = Some(PathBuf::from(raw));
        }
        if let Some(raw) = lookup(ENV_POOL_SIZE) {
            self.pool_size = parse_env(ENV_POOL_SIZE, &raw)?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.default_limit == 0 {
            return Err(AppError::Config("default_limit must be at least 1".to_string()));
        }
        if self.pool_size == 0 {
            return Err(AppError::Config("pool_size must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn resolved_database_path(&self) -> AppResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => default_database_path(),
        }
    }
}

fn parse_env(key: &str, raw: &str) -> AppResult<u32> {
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{} must be a positive integer ({}): {}", key, raw, e)))
}

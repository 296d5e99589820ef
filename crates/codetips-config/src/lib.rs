use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-local config file, looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "codetips.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid exclude pattern `{pattern}`: {source}")]
    InvalidExclude {
        pattern: String,
        source: glob::PatternError,
    },
}

/// A phrase in page prose that always gets the same tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GlobalTriggerConfig {
    pub phrase: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `light` or `dark`
    #[serde(default)]
    pub theme: Option<String>,
}

/// Project vocabulary added to the definition registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TermConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub documentation: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub docs_path: Option<PathBuf>,
    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,
    /// Glob patterns, relative to `docs_path`.
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,
    #[serde(default)]
    pub global_triggers: Vec<GlobalTriggerConfig>,
    #[serde(default)]
    pub terms: Vec<TermConfig>,
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_progress_interval_ms() -> u64 {
    333
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_path: None,
            logs_dir: default_logs_dir(),
            exclude: Vec::new(),
            progress_interval_ms: default_progress_interval_ms(),
            global_triggers: Vec::new(),
            terms: Vec::new(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.docs_path = config
            .docs_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));
        config.logs_dir = Self::expand_path(&config.logs_dir).unwrap_or(config.logs_dir);

        Ok(Some(config))
    }

    /// Loads the first config found: `explicit` (which must exist), then
    /// `./codetips.toml`, then the user config file.
    pub fn locate(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path)?
                .map(Some)
                .ok_or_else(|| ConfigError::NotFound(path.to_path_buf()));
        }
        if let Some(config) = Self::load_from_path(LOCAL_CONFIG_FILE)? {
            return Ok(Some(config));
        }
        Self::load()
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/codetips");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Compiled `exclude` patterns.
    pub fn exclude_patterns(&self) -> Result<Vec<glob::Pattern>, ConfigError> {
        self.exclude
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|source| ConfigError::InvalidExclude {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

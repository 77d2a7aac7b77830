//! Configuration for the taskdeck binary.
//!
//! A TOML file at the platform config path, merged over built-in defaults
//! and `TASKDECK_`-prefixed environment variables, then translated to
//! `taskdeck_core::CoreConfig`. The core crate never reads any of this
//! itself.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use taskdeck_core::{CoreConfig, ResponseOrdering};
use taskdeck_core::config::{DEFAULT_PAGE_SIZE, DEFAULT_TASKS_KEY};
use taskdeck_core::store::validate_key;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub api: ApiSection,

    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub view: ViewSection,
}

/// Presentation defaults for the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// Remote collection endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    CoreConfig::default().base_url
}
fn default_timeout() -> u64 {
    30
}

/// Where tasks are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageSection {
    /// Directory for task files. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_tasks_key")]
    pub tasks_key: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_dir: None,
            tasks_key: default_tasks_key(),
        }
    }
}

fn default_tasks_key() -> String {
    DEFAULT_TASKS_KEY.into()
}

/// List view settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewSection {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub response_ordering: ResponseOrdering,
}

impl Default for ViewSection {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            response_ordering: ResponseOrdering::default(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE.get()
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "taskdeck", "taskdeck")
}

fn home_fallback() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()))
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback().join(".config").join("taskdeck").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Platform data directory used when `storage.data_dir` is unset.
pub fn default_data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || {
            home_fallback()
                .join(".local")
                .join("share")
                .join("taskdeck")
        },
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Defaults, then the TOML file at `path`, then the environment.
///
/// Environment keys use `__` between section and field, e.g.
/// `TASKDECK_API__BASE_URL` or `TASKDECK_VIEW__PAGE_SIZE`.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TASKDECK_").split("__"))
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment. A missing file is not
/// an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Directory tasks are stored in.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(default_data_dir)
    }

    /// Validate and convert to the core's runtime configuration.
    pub fn to_core_config(&self) -> Result<CoreConfig, ConfigError> {
        url::Url::parse(&self.api.base_url).map_err(|e| ConfigError::Validation {
            field: "api.base_url".into(),
            reason: format!("{e}: {}", self.api.base_url),
        })?;

        if self.api.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "api.timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let page_size =
            NonZeroUsize::new(self.view.page_size).ok_or_else(|| ConfigError::Validation {
                field: "view.page_size".into(),
                reason: "must be at least 1".into(),
            })?;

        if self.storage.tasks_key.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "storage.tasks_key".into(),
                reason: "must not be empty".into(),
            });
        }
        validate_key(&self.storage.tasks_key).map_err(|e| ConfigError::Validation {
            field: "storage.tasks_key".into(),
            reason: e.to_string(),
        })?;

        Ok(CoreConfig {
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_secs(self.api.timeout),
            tasks_key: self.storage.tasks_key.clone(),
            page_size,
            response_ordering: self.view.response_ordering,
        })
    }
}

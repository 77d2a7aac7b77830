//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use taskdeck_config::ConfigError;
use taskdeck_core::{CollectionKind, CoreError, FetchError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Remote ───────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(taskdeck::fetch_failed),
        help("Run `taskdeck {kind}` again to retry.")
    )]
    FetchFailed {
        kind: CollectionKind,
        message: String,
        status: Option<u16>,
        transient: bool,
    },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(taskdeck::not_found),
        help("Run: taskdeck {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(taskdeck::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(taskdeck::config),
        help("Check the config file shown by `taskdeck config path`.")
    )]
    Config(Box<figment::Error>),

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(taskdeck::config_exists),
        help("Pass --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── Persistence ──────────────────────────────────────────────────
    #[error("Could not save tasks: {message}")]
    #[diagnostic(
        code(taskdeck::storage),
        help("Check that the data directory is writable (see --data-dir).")
    )]
    Storage { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render {format} output: {message}")]
    #[diagnostic(code(taskdeck::serialization))]
    Serialization {
        format: &'static str,
        message: String,
    },
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FetchFailed {
                status: None,
                transient: true,
                ..
            } => exit_code::CONNECTION,
            Self::FetchFailed {
                status: Some(404), ..
            }
            | Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Error for a fetch that ended in the `Error` state.
    pub fn fetch_failed(kind: CollectionKind, error: &FetchError) -> Self {
        Self::FetchFailed {
            kind,
            message: error.message.clone(),
            status: error.status,
            transient: error.transient,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Storage(e) => CliError::Storage {
                message: e.to_string(),
            },
            CoreError::Serialization { key, message } => CliError::Storage {
                message: format!("{key}: {message}"),
            },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
            ConfigError::Serialization(e) => CliError::Serialization {
                format: "toml",
                message: e.to_string(),
            },
        }
    }
}

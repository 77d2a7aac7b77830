//! CLI-specific configuration resolution.
//!
//! Loads the shared `taskdeck_config::Config` and layers `GlobalOpts`
//! flag overrides on top before handing a `CoreConfig` to the data layer.

use std::path::PathBuf;

use clap::ValueEnum;

use taskdeck_config::Config;
use taskdeck_core::CoreConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Everything a command needs after config file, env and flags are merged.
#[derive(Debug)]
pub struct Settings {
    pub config: Config,
    pub core: CoreConfig,
    pub data_dir: PathBuf,
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

/// Path of the config file in effect (`--config` wins over the default).
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(taskdeck_config::config_path)
}

/// Load the config file and apply flag overrides.
pub fn resolve(global: &GlobalOpts) -> Result<Settings, CliError> {
    let mut config = taskdeck_config::load_config_from(&config_path(global))?;
    apply_overrides(&mut config, global);

    let core = config.to_core_config()?;
    let data_dir = config.data_dir();

    let output = match global.output {
        Some(format) => format,
        None => parse_setting("defaults.output", &config.defaults.output)?,
    };
    let color_mode = match global.color {
        Some(mode) => mode,
        None => parse_setting("defaults.color", &config.defaults.color)?,
    };

    Ok(Settings {
        config,
        core,
        data_dir,
        output,
        color: crate::output::should_color(color_mode),
        quiet: global.quiet,
    })
}

fn apply_overrides(config: &mut Config, global: &GlobalOpts) {
    if let Some(ref url) = global.base_url {
        config.api.base_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        config.api.timeout = timeout;
    }
    if let Some(page_size) = global.page_size {
        config.view.page_size = page_size;
    }
    if let Some(ref dir) = global.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }
}

fn parse_setting<T: ValueEnum>(field: &str, value: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

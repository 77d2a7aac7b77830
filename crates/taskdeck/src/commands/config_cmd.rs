//! Config subcommand handlers.

use taskdeck_config::Config;
use tracing::debug;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

fn to_toml(cfg: &Config) -> Result<String, CliError> {
    toml::to_string_pretty(cfg).map_err(|e| CliError::Serialization {
        format: "toml",
        message: e.to_string(),
    })
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path(global).display().to_string(), false);
            Ok(())
        }

        // ── Show: the merged result of file, env and flags ──────────
        ConfigCommand::Show => {
            let settings = config::resolve(global)?;
            let out = match settings.output {
                OutputFormat::Table | OutputFormat::Plain => to_toml(&settings.config)?,
                format => output::render_single(
                    format,
                    &settings.config,
                    |_| String::new(),
                    |_| String::new(),
                )?,
            };
            output::print_output(out.trim_end(), settings.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::config_path(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            debug!(path = %path.display(), force, "writing default config");
            taskdeck_config::save_config_to(&Config::default(), &path)?;
            output::print_note(
                &format!("Configuration written to {}", path.display()),
                global.quiet,
            );
            Ok(())
        }
    }
}

//! Handlers for nginsight's own configuration file.

use nginsight_config::{Config, config_path, load_config, save_config};

use crate::cli::{ConfigArgs, ConfigCommand, Ctx};
use crate::error::CliError;
use crate::output;

use super::util;

pub fn handle(args: ConfigArgs, ctx: &Ctx) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => {
            let path = config_path();
            if path.exists()
                && !util::confirm(
                    &format!("Overwrite existing config at {}?", path.display()),
                    ctx.yes,
                )?
            {
                return Ok(());
            }
            let written =
                save_config(&Config::default()).map_err(|e| CliError::Config(e.to_string()))?;
            if !ctx.quiet {
                eprintln!("Wrote {}", written.display());
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = load_config().map_err(|e| CliError::Config(e.to_string()))?;
            let text = toml::to_string_pretty(&cfg).map_err(|e| CliError::Config(e.to_string()))?;
            output::print_output(text.trim_end(), ctx.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config_path().display().to_string(), ctx.quiet);
            Ok(())
        }
    }
}

//! Config subcommand handlers.

use secrecy::SecretString;

use super::prompt_err;
use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            let path = config::active_config_path(global);
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let mut cfg = config::load(global)?;
            for device in &mut cfg.devices {
                if device.password.is_some() {
                    device.password = Some(REDACTED.into());
                }
            }
            let rendered = toml::to_string_pretty(&cfg).map_err(|e| CliError::Config {
                message: format!("failed to serialize config: {e}"),
            })?;
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword { device } => {
            let path = config::active_config_path(global);
            let mut cfg = config::load_config(&path)?;
            if cfg.device(&device).is_none() {
                return Err(CliError::UnknownDevice { device });
            }

            let password = rpassword::prompt_password(format!("Password for {device}: "))
                .map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }

            nxkit_config::store_password(&device, &SecretString::from(password))?;

            cfg.use_keyring(&device)?;
            config::save_config(&cfg, &path)?;

            output::success(
                &format!("Password for '{device}' stored in system keyring"),
                global.quiet,
            );
            Ok(())
        }
    }
}

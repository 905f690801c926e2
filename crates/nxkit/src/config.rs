//! CLI configuration: thin wrapper around `nxkit_config`.
//!
//! Adds `GlobalOpts` flag overrides on top of the file + env config.

use std::path::PathBuf;
use std::time::Duration;

use nxkit_core::{DeviceCredential, InterfaceFilter, TlsMode, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use nxkit_config::{Config, DeviceProfile, config_path, load_config, save_config};

/// Everything a report session needs, with flags applied.
#[derive(Debug)]
pub struct RunSettings {
    pub devices: Vec<DeviceCredential>,
    pub transport: TransportConfig,
    pub filter: InterfaceFilter,
    pub report_dir: PathBuf,
}

/// `--config` (or `NXKIT_CONFIG`), else the platform path.
pub fn active_config_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(load_config(&active_config_path(global))?)
}

/// Load the inventory and resolve credentials; flags beat file values.
pub fn resolve_run_settings(global: &GlobalOpts) -> Result<RunSettings, CliError> {
    let path = active_config_path(global);
    let cfg = load_config(&path)?;

    if cfg.devices.is_empty() {
        return Err(CliError::NoDevices {
            path: path.display().to_string(),
        });
    }

    let mut transport = nxkit_config::transport_config(&cfg.defaults)?;
    if global.insecure {
        transport.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        transport.timeout = Duration::from_secs(secs);
    }

    let filter = global.interface_prefix.as_ref().map_or_else(
        || nxkit_config::interface_filter(&cfg.defaults),
        |prefix| InterfaceFilter::new(prefix.clone()),
    );

    let report_dir = global
        .report_dir
        .clone()
        .unwrap_or_else(|| cfg.defaults.report_dir.clone());

    Ok(RunSettings {
        devices: nxkit_config::device_credentials(&cfg)?,
        transport,
        filter,
        report_dir,
    })
}

/// Where a device's password comes from, for display.
pub fn password_source(profile: &DeviceProfile) -> String {
    if let Some(ref env) = profile.password_env {
        format!("env {env}")
    } else if profile.keyring {
        "keyring".into()
    } else if profile.password.is_some() {
        "config".into()
    } else {
        "missing".into()
    }
}

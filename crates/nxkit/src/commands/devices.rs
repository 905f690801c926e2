//! `devices`: list the inventory without contacting any switch.

use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::config::{self, DeviceProfile};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Password")]
    password: String,
}

impl From<&DeviceProfile> for DeviceRow {
    fn from(d: &DeviceProfile) -> Self {
        Self {
            name: d.name.clone(),
            address: d.address.clone(),
            username: d.username.clone(),
            password: config::password_source(d),
        }
    }
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::active_config_path(global);
    let cfg = config::load_config(&path)?;

    if cfg.devices.is_empty() {
        return Err(CliError::NoDevices {
            path: path.display().to_string(),
        });
    }

    let rows: Vec<DeviceRow> = cfg.devices.iter().map(DeviceRow::from).collect();
    output::print_output(&output::render_table(&rows), global.quiet);
    Ok(())
}

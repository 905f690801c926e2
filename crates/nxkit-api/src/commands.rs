// NX-API show commands
//
// The three read-only commands the toolkit issues, as typed wrappers
// around `NxapiClient::cli`.

use std::fmt;

use tracing::debug;

use crate::client::NxapiClient;
use crate::error::Error;
use crate::models::{ShowCdpNeighborsDetail, ShowInterface, ShowVersion, decode_body};

/// A supported CLI command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CliCommand {
    /// `show version` -- device identity.
    ShowVersion,
    /// `show interface` -- per-interface state and counters.
    ShowInterface,
    /// `show cdp neighbors detail` -- directly connected neighbors.
    ShowCdpNeighborsDetail,
}

impl CliCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShowVersion => "show version",
            Self::ShowInterface => "show interface",
            Self::ShowCdpNeighborsDetail => "show cdp neighbors detail",
        }
    }
}

impl fmt::Display for CliCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NxapiClient {
    /// `show version`
    pub async fn show_version(&self) -> Result<ShowVersion, Error> {
        debug!("fetching device identity");
        let body = self.cli(CliCommand::ShowVersion).await?;
        decode_body(CliCommand::ShowVersion, body)
    }

    /// `show interface`
    pub async fn show_interface(&self) -> Result<ShowInterface, Error> {
        debug!("fetching interface table");
        let body = self.cli(CliCommand::ShowInterface).await?;
        decode_body(CliCommand::ShowInterface, body)
    }

    /// `show cdp neighbors detail`
    pub async fn show_cdp_neighbors_detail(&self) -> Result<ShowCdpNeighborsDetail, Error> {
        debug!("fetching CDP neighbor table");
        let body = self.cli(CliCommand::ShowCdpNeighborsDetail).await?;
        decode_body(CliCommand::ShowCdpNeighborsDetail, body)
    }
}

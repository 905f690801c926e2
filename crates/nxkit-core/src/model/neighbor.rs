// ── CDP neighbor domain type ──

use serde::Serialize;

use super::interface::NamedInterface;

/// One directly connected neighbor, verbatim from `show cdp neighbors detail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborRecord {
    pub local_interface: String,
    pub neighbor_name: String,
    pub neighbor_platform: String,
    pub neighbor_interface: String,
    pub neighbor_management_ip: String,
}

impl NamedInterface for NeighborRecord {
    fn interface_name(&self) -> &str {
        &self.local_interface
    }
}

impl NamedInterface for nxkit_api::CdpNeighborRow {
    fn interface_name(&self) -> &str {
        &self.intf_id
    }
}

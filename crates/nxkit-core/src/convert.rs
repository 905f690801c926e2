// ── API-to-domain conversions ──
//
// Bridges `nxkit_api` response schemas into `crate::model` types. Rows are
// filtered to physical interfaces first, then every field the report needs
// is required: a physical row with a missing field fails the whole query
// rather than rendering placeholders.

use nxkit_api::{
    CdpNeighborRow, CliCommand, InterfaceRow, ShowCdpNeighborsDetail, ShowInterface, ShowVersion,
    counter_value,
};
use serde_json::Value;

use crate::error::CoreError;
use crate::metrics::{derive_health_row, filter_physical_interfaces};
use crate::model::{
    DeviceIdentity, InterfaceFilter, InterfaceHealthRow, InterfaceRawSample, NeighborRecord,
};

// ── Helpers ────────────────────────────────────────────────────────

fn require<T>(
    value: Option<T>,
    command: CliCommand,
    interface: &str,
    field: &str,
) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::MalformedResponse {
        command: command.to_string(),
        message: format!("interface {interface}: missing field `{field}`"),
    })
}

/// Required `eth_*` counter, as a number or numeric string.
fn require_counter(value: Option<Value>, interface: &str, field: &str) -> Result<u64, CoreError> {
    let cmd = CliCommand::ShowInterface;
    let raw = require(value, cmd, interface, field)?;
    counter_value(&raw).ok_or_else(|| CoreError::MalformedResponse {
        command: cmd.to_string(),
        message: format!("interface {interface}: `{field}` is not an unsigned counter: {raw}"),
    })
}

// ── Identity ───────────────────────────────────────────────────────

/// Build a `DeviceIdentity` from `show version`; `address` is the
/// configured device address.
pub fn identity_from_version(version: ShowVersion, address: &str) -> DeviceIdentity {
    DeviceIdentity {
        hostname: version.host_name,
        address: address.to_owned(),
        model: version.chassis_id,
        serial_number: version.proc_board_id,
        software_version: version.kickstart_ver_str,
    }
}

// ── Interfaces ─────────────────────────────────────────────────────

impl TryFrom<InterfaceRow> for InterfaceRawSample {
    type Error = CoreError;

    fn try_from(row: InterfaceRow) -> Result<Self, Self::Error> {
        let cmd = CliCommand::ShowInterface;
        let name = row.interface;
        Ok(Self {
            admin_state: require(row.admin_state, cmd, &name, "admin_state")?,
            oper_state: require(row.state, cmd, &name, "state")?,
            reliability_raw: require_counter(row.eth_reliability, &name, "eth_reliability")?,
            rx_load_raw: require_counter(row.eth_rxload, &name, "eth_rxload")?,
            tx_load_raw: require_counter(row.eth_txload, &name, "eth_txload")?,
            in_errors: require_counter(row.eth_inerr, &name, "eth_inerr")?,
            in_packets: require_counter(row.eth_inpkts, &name, "eth_inpkts")?,
            out_errors: require_counter(row.eth_outerr, &name, "eth_outerr")?,
            out_packets: require_counter(row.eth_outpkts, &name, "eth_outpkts")?,
            name,
        })
    }
}

/// Physical-interface health rows from `show interface`, in switch order.
pub fn health_rows(
    response: ShowInterface,
    filter: &InterfaceFilter,
) -> Result<Vec<InterfaceHealthRow>, CoreError> {
    filter_physical_interfaces(response.table.rows, filter)
        .into_iter()
        .map(|row| derive_health_row(&InterfaceRawSample::try_from(row)?))
        .collect()
}

// ── Neighbors ──────────────────────────────────────────────────────

impl TryFrom<CdpNeighborRow> for NeighborRecord {
    type Error = CoreError;

    fn try_from(row: CdpNeighborRow) -> Result<Self, Self::Error> {
        let cmd = CliCommand::ShowCdpNeighborsDetail;
        let local = row.intf_id;
        Ok(Self {
            neighbor_name: require(row.sysname, cmd, &local, "sysname")?,
            neighbor_platform: require(row.platform_id, cmd, &local, "platform_id")?,
            neighbor_interface: require(row.port_id, cmd, &local, "port_id")?,
            neighbor_management_ip: require(row.v4mgmtaddr, cmd, &local, "v4mgmtaddr")?,
            local_interface: local,
        })
    }
}

/// Neighbors seen on physical interfaces, in switch order.
pub fn neighbor_records(
    response: ShowCdpNeighborsDetail,
    filter: &InterfaceFilter,
) -> Result<Vec<NeighborRecord>, CoreError> {
    filter_physical_interfaces(response.table.rows, filter)
        .into_iter()
        .map(NeighborRecord::try_from)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nxkit_api::decode_body;
    use serde_json::json;

    use super::*;
    use crate::model::InterfaceStatus;

    fn eth_row(name: &str) -> serde_json::Value {
        json!({
            "interface": name,
            "admin_state": "up",
            "state": "up",
            "eth_reliability": "255",
            "eth_rxload": "1",
            "eth_txload": "1",
            "eth_inerr": "0",
            "eth_inpkts": "500",
            "eth_outerr": "5",
            "eth_outpkts": "100"
        })
    }

    #[test]
    fn identity_fields_map_verbatim() {
        let version: ShowVersion = decode_body(
            CliCommand::ShowVersion,
            json!({
                "host_name": "leaf-01",
                "chassis_id": "Nexus9000 C9336C-FX2 Chassis",
                "proc_board_id": "FDO23460MQC",
                "kickstart_ver_str": "10.2(5)"
            }),
        )
        .unwrap();
        let identity = identity_from_version(version, "192.0.2.10");
        assert_eq!(identity.hostname, "leaf-01");
        assert_eq!(identity.address, "192.0.2.10");
        assert_eq!(identity.model, "Nexus9000 C9336C-FX2 Chassis");
        assert_eq!(identity.serial_number, "FDO23460MQC");
        assert_eq!(identity.software_version, "10.2(5)");
    }

    #[test]
    fn health_rows_skip_logical_interfaces_before_validation() {
        let body: ShowInterface = decode_body(
            CliCommand::ShowInterface,
            json!({
                "TABLE_interface": { "ROW_interface": [
                    { "interface": "mgmt0", "state": "up" },
                    eth_row("Ethernet1/1"),
                    { "interface": "Vlan1", "svi_admin_state": "down" }
                ]}
            }),
        )
        .unwrap();

        let rows = health_rows(body, &InterfaceFilter::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Ethernet1/1");
        assert_eq!(rows[0].status, InterfaceStatus::Normal);
        assert_eq!(rows[0].tx_error_pct, "5.00%");
    }

    #[test]
    fn junk_counter_on_logical_interface_is_ignored() {
        let body: ShowInterface = decode_body(
            CliCommand::ShowInterface,
            json!({
                "TABLE_interface": { "ROW_interface": [
                    { "interface": "mgmt0", "eth_inerr": "n/a", "eth_rxload": -1 },
                    eth_row("Ethernet1/1")
                ]}
            }),
        )
        .unwrap();

        let rows = health_rows(body, &InterfaceFilter::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Ethernet1/1");
    }

    #[test]
    fn junk_counter_on_physical_interface_fails_query() {
        let mut row = eth_row("Ethernet1/4");
        row["eth_inerr"] = json!("n/a");
        let body: ShowInterface = decode_body(
            CliCommand::ShowInterface,
            json!({ "TABLE_interface": { "ROW_interface": row } }),
        )
        .unwrap();

        match health_rows(body, &InterfaceFilter::default()) {
            Err(CoreError::MalformedResponse { message, .. }) => {
                assert!(message.contains("Ethernet1/4"), "got: {message}");
                assert!(message.contains("eth_inerr"), "got: {message}");
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn physical_row_missing_field_fails_query() {
        let mut row = eth_row("Ethernet1/9");
        row.as_object_mut().unwrap().remove("eth_outpkts");
        let body: ShowInterface = decode_body(
            CliCommand::ShowInterface,
            json!({ "TABLE_interface": { "ROW_interface": [eth_row("Ethernet1/8"), row] } }),
        )
        .unwrap();

        match health_rows(body, &InterfaceFilter::default()) {
            Err(CoreError::MalformedResponse { command, message }) => {
                assert_eq!(command, "show interface");
                assert!(message.contains("Ethernet1/9"), "got: {message}");
                assert!(message.contains("eth_outpkts"), "got: {message}");
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn neighbors_filtered_and_mapped() {
        let body: ShowCdpNeighborsDetail = decode_body(
            CliCommand::ShowCdpNeighborsDetail,
            json!({
                "TABLE_cdp_neighbor_detail_info": { "ROW_cdp_neighbor_detail_info": [
                    {
                        "intf_id": "mgmt0",
                        "sysname": "oob-sw",
                        "platform_id": "WS-C2960X",
                        "port_id": "GigabitEthernet1/0/5",
                        "v4mgmtaddr": "10.99.0.5"
                    },
                    {
                        "intf_id": "Ethernet1/49",
                        "sysname": "spine-01",
                        "platform_id": "N9K-C9364C",
                        "port_id": "Ethernet1/1",
                        "v4mgmtaddr": "10.0.0.1"
                    }
                ]}
            }),
        )
        .unwrap();

        let records = neighbor_records(body, &InterfaceFilter::default()).unwrap();
        assert_eq!(
            records,
            vec![NeighborRecord {
                local_interface: "Ethernet1/49".into(),
                neighbor_name: "spine-01".into(),
                neighbor_platform: "N9K-C9364C".into(),
                neighbor_interface: "Ethernet1/1".into(),
                neighbor_management_ip: "10.0.0.1".into(),
            }]
        );
    }

    #[test]
    fn neighbor_missing_mgmt_address_fails() {
        let row = CdpNeighborRow {
            intf_id: "Ethernet1/2".into(),
            sysname: Some("phone".into()),
            platform_id: Some("IP Phone".into()),
            port_id: Some("Port 1".into()),
            ..CdpNeighborRow::default()
        };
        let err = NeighborRecord::try_from(row).unwrap_err();
        assert!(err.to_string().contains("v4mgmtaddr"), "got: {err}");
    }
}

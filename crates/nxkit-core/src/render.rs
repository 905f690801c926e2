//! Fixed-width plain-text rendering.
//!
//! Reports are read in terminals and text editors, so alignment comes
//! entirely from column widths. Values wider than their column are not
//! truncated; they push the rest of the line right.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::model::{DeviceIdentity, InterfaceHealthRow, NeighborRecord};

/// Rule width of the interface table: 16 + 9 + 13 + 4 * 11.
pub const INTERFACE_RULE_WIDTH: usize = 84;

/// Rule width of the neighbor table. Narrower than the 92 characters of
/// columns would suggest; kept for compatibility with existing reports.
pub const NEIGHBOR_RULE_WIDTH: usize = 91;

/// "Generated on ..." line plus a dash underline of the same length,
/// preceded by a blank line.
pub fn render_generation_banner(generated_at: &NaiveDateTime) -> String {
    let header = format!(
        "Generated on {}",
        generated_at.format("%Y-%m-%d %H:%M:%S%.6f")
    );
    let underline = "-".repeat(header.chars().count());
    format!("\n{header}\n{underline}\n")
}

/// The five identity lines, in fixed order.
pub fn render_identity_block(identity: &DeviceIdentity) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Device hostname: {}", identity.hostname);
    let _ = writeln!(out, "Device IP address: {}", identity.address);
    let _ = writeln!(out, "Device model: {}", identity.model);
    let _ = writeln!(out, "Device serial number: {}", identity.serial_number);
    let _ = writeln!(out, "Device software version: {}", identity.software_version);
    out
}

/// Interface alert table, rows in input order, followed by a blank line.
pub fn render_interface_table(rows: &[InterfaceHealthRow]) -> String {
    let rule = "-".repeat(INTERFACE_RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "{:<16}{:<9}{:>13}{:>11}{:>11}{:>11}{:>11}",
        "Interface", "Status", "Reliability %", "RX load %", "RX Err %", "TX load %", "TX Err %"
    );
    let _ = writeln!(out, "{rule}");

    for row in rows {
        let _ = writeln!(
            out,
            "{:<16}{:<9}{:>13}{:>11}{:>11}{:>11}{:>11}",
            row.name,
            row.status,
            row.reliability_pct,
            row.rx_load_pct,
            row.rx_error_pct,
            row.tx_load_pct,
            row.tx_error_pct
        );
    }

    out.push('\n');
    out
}

/// CDP neighbor table, rows in input order, followed by a blank line.
pub fn render_neighbor_table(rows: &[NeighborRecord]) -> String {
    let rule = "-".repeat(NEIGHBOR_RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "{:<16}{:<16}{:<20}{:<20}{:<20}",
        "Interface",
        "Neighbor Name",
        "Neighbor Platform",
        "Neighbor Interface",
        "Neighbor IP Address"
    );
    let _ = writeln!(out, "{rule}");

    for row in rows {
        let _ = writeln!(
            out,
            "{:<16}{:<16}{:<20}{:<20}{:<20}",
            row.local_interface,
            row.neighbor_name,
            row.neighbor_platform,
            row.neighbor_interface,
            row.neighbor_management_ip
        );
    }

    out.push('\n');
    out
}

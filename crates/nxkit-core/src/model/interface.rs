// ── Interface domain types ──

use std::fmt;

use serde::Serialize;

/// Anything keyed by a local interface name.
pub trait NamedInterface {
    fn interface_name(&self) -> &str;
}

/// Health verdict for one interface.
///
/// `Down` means the operator enabled the port but the link is down.
/// An administratively shut port is `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InterfaceStatus {
    Normal,
    Down,
}

impl InterfaceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Down => "Down",
        }
    }

    pub fn is_alert(self) -> bool {
        matches!(self, Self::Down)
    }
}

impl fmt::Display for InterfaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so table column widths apply.
        f.pad(self.as_str())
    }
}

/// A percentage, displayed with exactly two decimals and no sign.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Percent(f64);

impl Percent {
    pub const ZERO: Self = Self(0.0);

    pub fn new(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Physical-interface name filter.
///
/// NX-OS names front-panel ports `Ethernet1/1`, so the default prefix is
/// `Eth`. Logical and management interfaces (`mgmt0`, `Vlan10`,
/// `port-channel1`, `loopback0`) never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceFilter {
    prefix: String,
}

impl InterfaceFilter {
    pub const DEFAULT_PREFIX: &'static str = "Eth";

    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn matches(&self, name: &str) -> bool {
        name.starts_with(&self.prefix)
    }
}

impl Default for InterfaceFilter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}

/// Raw per-interface fields from `show interface`.
///
/// Load and reliability are on the protocol's 0-255 scale. Values above
/// 255 are kept as received so the deriver can reject them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRawSample {
    pub name: String,
    pub admin_state: String,
    pub oper_state: String,
    pub reliability_raw: u64,
    pub rx_load_raw: u64,
    pub tx_load_raw: u64,
    pub in_errors: u64,
    pub in_packets: u64,
    pub out_errors: u64,
    pub out_packets: u64,
}

impl NamedInterface for InterfaceRawSample {
    fn interface_name(&self) -> &str {
        &self.name
    }
}

/// One line of the interface alert table.
///
/// Percentages are pre-formatted (`"50.20%"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceHealthRow {
    pub name: String,
    pub status: InterfaceStatus,
    pub reliability_pct: String,
    pub rx_load_pct: String,
    pub rx_error_pct: String,
    pub tx_load_pct: String,
    pub tx_error_pct: String,
}

impl NamedInterface for InterfaceHealthRow {
    fn interface_name(&self) -> &str {
        &self.name
    }
}

impl NamedInterface for nxkit_api::InterfaceRow {
    fn interface_name(&self) -> &str {
        &self.interface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_always_two_decimals() {
        assert_eq!(Percent::new(0.05 * 100.0).to_string(), "5.00");
        assert_eq!(Percent::new(50.196_078).to_string(), "50.20");
        assert_eq!(Percent::ZERO.to_string(), "0.00");
        assert_eq!(Percent::new(100.0).to_string(), "100.00");
    }

    #[test]
    fn status_respects_width() {
        assert_eq!(format!("[{:<9}]", InterfaceStatus::Down), "[Down     ]");
    }

    #[test]
    fn default_filter_is_ethernet() {
        let filter = InterfaceFilter::default();
        assert!(filter.matches("Ethernet1/1"));
        assert!(filter.matches("Eth101/1/1"));
        assert!(!filter.matches("mgmt0"));
        assert!(!filter.matches("Vlan1"));
        assert!(!filter.matches("port-channel10"));
    }
}

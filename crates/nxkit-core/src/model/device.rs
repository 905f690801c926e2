// ── Device domain types ──

use secrecy::SecretString;
use serde::Serialize;

/// How to reach and log in to one switch.
///
/// Built by `nxkit-config` from the device inventory. `Debug` never
/// reveals the password.
#[derive(Debug, Clone)]
pub struct DeviceCredential {
    /// Operator-chosen label from the inventory (not the switch hostname).
    pub name: String,
    /// Host, host:port, or full URL of the NX-API endpoint.
    pub address: String,
    pub username: String,
    pub password: SecretString,
}

impl DeviceCredential {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            username: username.into(),
            password,
        }
    }
}

/// Identity fields from `show version`, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceIdentity {
    pub hostname: String,
    /// The configured address, not anything the switch reports.
    pub address: String,
    pub model: String,
    pub serial_number: String,
    pub software_version: String,
}

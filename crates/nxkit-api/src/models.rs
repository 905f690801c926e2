// NX-API request and response types
//
// The JSON-RPC envelope plus explicit schemas for the three `show` commands
// the toolkit issues. NX-API renders CLI tables as `TABLE_x.ROW_x`, collapses
// single-row tables into a bare object, and is inconsistent about whether
// counters are JSON numbers or numeric strings, so counters are kept raw
// and read through `counter_value` once a row is known to matter.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::commands::CliCommand;
use crate::error::Error;

// ── JSON-RPC envelope ───────────────────────────────────────────────

/// A single `cli` JSON-RPC call.
///
/// ```json
/// {"jsonrpc": "2.0", "method": "cli", "params": {"cmd": "show version", "version": 1}, "id": 1}
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: CliParams<'a>,
    pub id: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CliParams<'a> {
    pub cmd: &'a str,
    pub version: u32,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn cli(cmd: &'a str) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "cli",
            params: CliParams { cmd, version: 1 },
            id: 1,
        }
    }
}

/// JSON-RPC reply. Exactly one of `result` / `error` is normally present;
/// `result` is `null` for commands that produce no output.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<JsonRpcResult>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResult {
    #[serde(default)]
    pub body: Option<Value>,
}

/// Error object, e.g. `{"code": -32602, "message": "Invalid params", "data": {"msg": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<JsonRpcErrorData>,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcErrorData {
    #[serde(default)]
    pub msg: Option<String>,
}

impl JsonRpcError {
    /// The switch's own message (`data.msg`) when present, else the
    /// generic JSON-RPC message.
    pub fn detail(&self) -> String {
        match self.data.as_ref().and_then(|d| d.msg.as_deref()) {
            Some(msg) => format!("{}: {}", self.message, msg.trim()),
            None => self.message.clone(),
        }
    }
}

// ── show version ────────────────────────────────────────────────────

/// Body of `show version`. Only the identity fields are modeled; the
/// rest lands in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowVersion {
    pub host_name: String,
    pub chassis_id: String,
    pub proc_board_id: String,
    pub kickstart_ver_str: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── show interface ──────────────────────────────────────────────────

/// Body of `show interface`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowInterface {
    #[serde(rename = "TABLE_interface")]
    pub table: InterfaceTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceTable {
    #[serde(rename = "ROW_interface", deserialize_with = "one_or_many")]
    pub rows: Vec<InterfaceRow>,
}

/// One row of `show interface`.
///
/// Only `interface` is guaranteed: VLAN, loopback and port-channel rows
/// carry different field sets than Ethernet rows, so the `eth_*` fields
/// are kept as raw JSON here and validated after filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterfaceRow {
    pub interface: String,
    #[serde(default)]
    pub admin_state: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub eth_reliability: Option<Value>,
    #[serde(default)]
    pub eth_rxload: Option<Value>,
    #[serde(default)]
    pub eth_txload: Option<Value>,
    #[serde(default)]
    pub eth_inerr: Option<Value>,
    #[serde(default)]
    pub eth_inpkts: Option<Value>,
    #[serde(default)]
    pub eth_outerr: Option<Value>,
    #[serde(default)]
    pub eth_outpkts: Option<Value>,
    /// Catch-all for the many counters we don't report on.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── show cdp neighbors detail ───────────────────────────────────────

/// Body of `show cdp neighbors detail`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowCdpNeighborsDetail {
    #[serde(rename = "TABLE_cdp_neighbor_detail_info")]
    pub table: CdpNeighborTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdpNeighborTable {
    #[serde(rename = "ROW_cdp_neighbor_detail_info", deserialize_with = "one_or_many")]
    pub rows: Vec<CdpNeighborRow>,
}

/// One CDP neighbor entry. `intf_id` is the local interface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CdpNeighborRow {
    pub intf_id: String,
    #[serde(default)]
    pub sysname: Option<String>,
    #[serde(default)]
    pub platform_id: Option<String>,
    #[serde(default)]
    pub port_id: Option<String>,
    #[serde(default)]
    pub v4mgmtaddr: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── Decoding helpers ────────────────────────────────────────────────

/// Decode a `result.body` value into the schema for `command`.
///
/// Any mismatch (missing key path, wrong type) becomes
/// [`Error::MalformedResponse`] naming the command.
pub fn decode_body<T: DeserializeOwned>(command: CliCommand, body: Value) -> Result<T, Error> {
    serde_json::from_value(body).map_err(|e| Error::MalformedResponse {
        command: command.to_string(),
        message: e.to_string(),
    })
}

/// Accept either a single object or an array of objects.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(de::Error::custom))
            .collect(),
        single => serde_json::from_value(single)
            .map(|row| vec![row])
            .map_err(de::Error::custom),
    }
}

/// Read a counter sent as a JSON number or a numeric string.
///
/// Returns `None` for anything else (negative, fractional, text).
pub fn counter_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

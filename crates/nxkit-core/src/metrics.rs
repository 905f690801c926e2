// ── Metric derivation ──
//
// Pure functions from raw interface fields to health values. Loads and
// reliability arrive on a 0-255 scale; error rates are errors per packet.

use crate::error::CoreError;
use crate::model::{
    InterfaceFilter, InterfaceHealthRow, InterfaceRawSample, InterfaceStatus, NamedInterface,
    Percent,
};

/// Full scale of NX-OS load and reliability counters.
pub const LOAD_SCALE: u64 = 255;

/// Reconcile administrative and operational state.
///
/// Only "enabled but down" is an alert. A port the operator shut down is
/// expected to be down and reports `Normal`.
pub fn classify_status(admin_state: &str, oper_state: &str) -> InterfaceStatus {
    if admin_state == "up" && oper_state == "down" {
        InterfaceStatus::Down
    } else {
        InterfaceStatus::Normal
    }
}

/// Convert a 0-255 load or reliability value to a percentage.
///
/// Values above 255 break the protocol contract and are rejected rather
/// than clamped.
pub fn normalize_load(raw: u64) -> Result<Percent, CoreError> {
    scale_field("load", raw)
}

fn scale_field(field: &str, raw: u64) -> Result<Percent, CoreError> {
    let raw = u8::try_from(raw).map_err(|_| CoreError::ProtocolViolation {
        field: field.to_owned(),
        value: raw,
        max: LOAD_SCALE,
    })?;
    Ok(Percent::new(f64::from(raw) / 255.0 * 100.0))
}

/// Errors as a percentage of packets.
///
/// No traffic means no measurable error rate, so zero packets yields 0%.
/// More errors than packets is passed through as computed.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn error_rate(errors: u64, packets: u64) -> Percent {
    if packets == 0 {
        return Percent::ZERO;
    }
    Percent::new(errors as f64 / packets as f64 * 100.0)
}

/// Keep only rows on physical interfaces, preserving order.
pub fn filter_physical_interfaces<T: NamedInterface>(
    rows: impl IntoIterator<Item = T>,
    filter: &InterfaceFilter,
) -> Vec<T> {
    rows.into_iter()
        .filter(|row| filter.matches(row.interface_name()))
        .collect()
}

/// Derive the alert-table row for one interface.
pub fn derive_health_row(sample: &InterfaceRawSample) -> Result<InterfaceHealthRow, CoreError> {
    let scaled = |field: &str, raw: u64| scale_field(&format!("{} {field}", sample.name), raw);

    let reliability = scaled("reliability", sample.reliability_raw)?;
    let rx_load = scaled("rxload", sample.rx_load_raw)?;
    let tx_load = scaled("txload", sample.tx_load_raw)?;

    Ok(InterfaceHealthRow {
        name: sample.name.clone(),
        status: classify_status(&sample.admin_state, &sample.oper_state),
        reliability_pct: format!("{reliability}%"),
        rx_load_pct: format!("{rx_load}%"),
        rx_error_pct: format!("{}%", error_rate(sample.in_errors, sample.in_packets)),
        tx_load_pct: format!("{tx_load}%"),
        tx_error_pct: format!("{}%", error_rate(sample.out_errors, sample.out_packets)),
    })
}

//! Device identity and health readings.
//!
//! Identity is fetched once per session, right after discovery; every field
//! is best-effort and a failed read simply stays absent. The health metrics
//! are re-read each cycle with a stale-versus-unknown policy: a reading the
//! device answered but that does not parse clears the cached value, a read
//! that never completed leaves it alone.

use switchly_snmp::{Oid, SnmpValue, Transport};
use tracing::debug;

use crate::mib;
use crate::model::DeviceMeta;

/// Read a scalar that some device models expose only at a zero-suffixed
/// identifier. Tries the base first, then `base.0`; empty answers fall
/// through to the next candidate.
async fn get_scalar<T: Transport>(transport: &T, base: &str) -> Option<SnmpValue> {
    let base = Oid::from(base);
    for oid in [base.clone(), base.child(0)] {
        match transport.get(&oid).await {
            Ok(value) if !value.is_empty() => return Some(value),
            Ok(_) => {}
            Err(e) => debug!(oid = %oid, error = %e, "scalar read failed"),
        }
    }
    None
}

fn format_mac(value: &SnmpValue) -> String {
    match value.as_bytes() {
        Some(bytes) if bytes.len() == 6 => bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(":"),
        _ => value.as_text(),
    }
}

/// Populate the fixed identity fields on a fresh [`DeviceMeta`].
pub async fn fetch_identity<T: Transport>(transport: &T, meta: &mut DeviceMeta) {
    if let Some(value) = get_scalar(transport, mib::SYS_NAME).await {
        meta.system_name = Some(value.as_text());
    }
    if let Some(value) = get_scalar(transport, mib::BRIDGE_ADDRESS).await {
        meta.mac_address = Some(format_mac(&value));
    }
    if let Some(value) = get_scalar(transport, mib::HW_MODEL).await {
        meta.hardware_model = Some(value.as_text());
    }
    if let Some(value) = get_scalar(transport, mib::FW_VERSION).await {
        let text = value.as_text();
        let trimmed = text
            .split(mib::FW_TRIM_MARKER)
            .next()
            .unwrap_or(&text)
            .trim();
        meta.firmware_version = Some(trimmed.to_owned());
    }
    if let Some(value) = get_scalar(transport, mib::PETH_MAIN_PSE_POWER).await {
        meta.poe_budget_watts = value.as_i64().and_then(|w| u32::try_from(w).ok());
    }
}

/// Refresh the per-cycle health readings in place.
pub async fn fetch_metrics<T: Transport>(transport: &T, meta: &mut DeviceMeta) {
    refresh_temperature(transport, meta).await;
    refresh_uptime(transport, meta).await;
}

async fn refresh_temperature<T: Transport>(transport: &T, meta: &mut DeviceMeta) {
    let base = Oid::from(mib::TEMPERATURE);
    let mut unparsable = false;
    for oid in [base.clone(), base.child(0)] {
        match transport.get(&oid).await {
            Ok(value) if value.is_empty() => {}
            Ok(value) => match value.as_i64() {
                Some(celsius) => {
                    meta.temperature_c = Some(celsius);
                    return;
                }
                None => unparsable = true,
            },
            // Read never completed: the cached value may still be right.
            Err(e) => debug!(oid = %oid, error = %e, "temperature read failed"),
        }
    }
    if unparsable {
        // The device answered with something that is not a temperature.
        meta.temperature_c = None;
    }
}

async fn refresh_uptime<T: Transport>(transport: &T, meta: &mut DeviceMeta) {
    match transport.get(&Oid::from(mib::SYS_UPTIME)).await {
        Ok(value) => {
            meta.uptime_secs = value.as_i64().map(|ticks| {
                // Ticks are hundredths of a second.
                (ticks as f64) / 100.0
            });
        }
        Err(e) => debug!(error = %e, "uptime read failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mac_renders_six_bytes_as_colon_hex() {
        let value = SnmpValue::OctetString(vec![0xaa, 0xbb, 0xcc, 0x00, 0x11, 0x22]);
        assert_eq!(format_mac(&value), "aa:bb:cc:00:11:22");
    }

    #[test]
    fn mac_falls_back_to_text_for_other_lengths() {
        let value = SnmpValue::OctetString(b"00-80-63".to_vec());
        assert_eq!(format_mac(&value), "00-80-63");
    }
}

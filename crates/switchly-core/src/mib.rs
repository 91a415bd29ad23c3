//! Object identifiers and row-key helpers for the managed-switch MIBs.
//!
//! Standard IF-MIB, BRIDGE-MIB and POWER-ETHERNET-MIB objects plus the
//! vendor subtree for hardware model, firmware, temperature and per-port
//! delivered power.

use crate::error::CoreError;

// ── System group ────────────────────────────────────────────────────
pub const SYS_UPTIME: &str = "1.3.6.1.2.1.1.3.0";
pub const SYS_NAME: &str = "1.3.6.1.2.1.1.5.0";

// ── IF-MIB (tables indexed by ifIndex) ──────────────────────────────
pub const IF_TYPE: &str = "1.3.6.1.2.1.2.2.1.3";
pub const IF_ADMIN_STATUS: &str = "1.3.6.1.2.1.2.2.1.7";
pub const IF_OPER_STATUS: &str = "1.3.6.1.2.1.2.2.1.8";
pub const IF_NAME: &str = "1.3.6.1.2.1.31.1.1.1.1";

// ── BRIDGE-MIB ──────────────────────────────────────────────────────
pub const BRIDGE_ADDRESS: &str = "1.3.6.1.2.1.17.1.1.0";

// ── POWER-ETHERNET-MIB (pethPsePortTable indexed by group.port) ─────
pub const PETH_PSE_PORT_TABLE: &str = "1.3.6.1.2.1.105.1.1.1";
pub const PETH_PSE_PORT_ADMIN_ENABLE: &str = "1.3.6.1.2.1.105.1.1.1.3";
pub const PETH_PSE_PORT_DETECTION_STATUS: &str = "1.3.6.1.2.1.105.1.1.1.6";
pub const PETH_MAIN_PSE_POWER: &str = "1.3.6.1.2.1.105.1.3.1.1.2.1";

// ── Vendor subtree ──────────────────────────────────────────────────
pub const HW_MODEL: &str = "1.3.6.1.4.1.248.14.1.1.9.1.3.1";
pub const FW_VERSION: &str = "1.3.6.1.4.1.248.14.1.1.9.1.5.1";
pub const TEMPERATURE: &str = "1.3.6.1.4.1.248.14.2.5.1";
/// Delivered PoE power per port. Indexed by raw ifIndex, unlike the
/// standard pethPsePortTable columns.
pub const POE_PORT_POWER: &str = "1.3.6.1.4.1.248.14.2.14.2.1.2";

// ── Well-known codes ────────────────────────────────────────────────
/// ifType ethernetCsmacd(6): the only interface class treated as a port.
pub const ETHERNET_CSMACD: i64 = 6;
/// ifOperStatus up(1).
pub const OPER_UP: i64 = 1;
/// ifAdminStatus up(1) / down(2).
pub const ADMIN_UP: i64 = 1;
pub const ADMIN_DOWN: i64 = 2;
/// TruthValue true(1) / false(2), used by pethPsePortAdminEnable.
pub const TRUTH_TRUE: i64 = 1;
pub const TRUTH_FALSE: i64 = 2;

/// Firmware strings append memory bank details after this marker.
pub const FW_TRIM_MARKER: &str = "RAM:";

/// Extract the trailing ifIndex from an IF-MIB row key.
pub fn parse_port_index(key: &str) -> Result<u32, CoreError> {
    key.rsplit('.')
        .next()
        .and_then(|last| last.parse::<u32>().ok())
        .ok_or_else(|| CoreError::MalformedKey {
            key: key.to_owned(),
        })
}

/// Extract the trailing `group.port` pair from a pethPsePortTable row key.
pub fn parse_poe_group_port(key: &str) -> Result<(u32, u32), CoreError> {
    let malformed = || CoreError::MalformedKey {
        key: key.to_owned(),
    };
    let mut tail = key.rsplit('.');
    let port = tail
        .next()
        .and_then(|c| c.parse::<u32>().ok())
        .ok_or_else(malformed)?;
    let group = tail
        .next()
        .and_then(|c| c.parse::<u32>().ok())
        .ok_or_else(malformed)?;
    Ok((group, port))
}

/// Shorten an interface name for display. Names with more than two
/// slash-separated segments drop the leading chassis segment; anything
/// else passes through unchanged.
pub fn display_port_name(raw: &str) -> String {
    let segments: Vec<&str> = raw.split('/').collect();
    if segments.len() > 2 {
        segments[1..].join("/")
    } else {
        raw.to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn port_index_takes_trailing_component() {
        assert_eq!(parse_port_index("1.3.6.1.2.1.2.2.1.8.49").unwrap(), 49);
        assert_eq!(parse_port_index("7").unwrap(), 7);
    }

    #[test]
    fn port_index_rejects_non_numeric_tail() {
        assert!(matches!(
            parse_port_index("1.3.6.1.2.1.2.2.1.8.x"),
            Err(CoreError::MalformedKey { .. })
        ));
        assert!(parse_port_index("").is_err());
    }

    #[test]
    fn poe_key_takes_trailing_pair() {
        let (group, port) = parse_poe_group_port("1.3.6.1.2.1.105.1.1.1.3.1.12").unwrap();
        assert_eq!((group, port), (1, 12));
    }

    #[test]
    fn poe_key_rejects_short_or_textual_keys() {
        assert!(parse_poe_group_port("12").is_err());
        assert!(parse_poe_group_port("1.3.6.1.2.1.105.1.1.1.3.one.2").is_err());
    }

    #[test]
    fn display_name_drops_chassis_segment_only_when_deep() {
        assert_eq!(display_port_name("1/2/14"), "2/14");
        assert_eq!(display_port_name("1/4"), "1/4");
        assert_eq!(display_port_name("eth0"), "eth0");
    }
}

// ── Tagged SNMP value type ──
//
// Reads come back as exactly one of these variants. The protocol layer's
// (errorIndicator, errorStatus, varBinds) triple is converted to
// Result<SnmpValue, SnmpError> once, here at the boundary — the core never
// inspects ambiguous triples.

use serde::{Deserialize, Serialize};

use crate::oid::Oid;

/// A single value read from (or written to) the managed device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnmpValue {
    Integer(i64),
    OctetString(Vec<u8>),
    ObjectId(Oid),
    IpAddress([u8; 4]),
    Counter32(u32),
    Gauge32(u32),
    TimeTicks(u32),
    Counter64(u64),
    Null,
}

impl SnmpValue {
    /// Numeric interpretation.
    ///
    /// Octet strings holding a decimal rendering are accepted; a fractional
    /// part is truncated (some agents expose temperature as `"41.5"`). A
    /// value that carries no number returns `None` — never zero.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SnmpValue::Integer(v) => Some(*v),
            SnmpValue::Counter32(v) | SnmpValue::Gauge32(v) | SnmpValue::TimeTicks(v) => {
                Some(i64::from(*v))
            }
            SnmpValue::Counter64(v) => i64::try_from(*v).ok(),
            SnmpValue::OctetString(bytes) => {
                let text = String::from_utf8_lossy(bytes);
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().map(|f| f.trunc() as i64))
            }
            SnmpValue::ObjectId(_) | SnmpValue::IpAddress(_) | SnmpValue::Null => None,
        }
    }

    /// Best-effort textual rendering. `Null` renders empty.
    pub fn as_text(&self) -> String {
        match self {
            SnmpValue::Integer(v) => v.to_string(),
            SnmpValue::OctetString(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            SnmpValue::ObjectId(oid) => oid.to_string(),
            SnmpValue::IpAddress(octets) => {
                format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
            }
            SnmpValue::Counter32(v) | SnmpValue::Gauge32(v) | SnmpValue::TimeTicks(v) => {
                v.to_string()
            }
            SnmpValue::Counter64(v) => v.to_string(),
            SnmpValue::Null => String::new(),
        }
    }

    /// Raw octets, if this is an octet string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            SnmpValue::OctetString(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// `Null` or a zero-length octet string. Scalars that exist only at a
    /// zero-suffixed identifier on some device models report empty at the
    /// base identifier.
    pub fn is_empty(&self) -> bool {
        match self {
            SnmpValue::Null => true,
            SnmpValue::OctetString(bytes) => bytes.is_empty(),
            _ => false,
        }
    }
}

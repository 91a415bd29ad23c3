use serde::{Deserialize, Serialize};

/// Link state of one ethernet port.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum PortStatus {
    Up,
    Down,
}

/// pethPsePortDetectionStatus, with unknown codes preserved verbatim so a
/// newer firmware revision degrades visibly instead of silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoeDetection {
    Disabled,
    Searching,
    Delivering,
    Fault,
    Test,
    Other,
    Unrecognized(i64),
}

impl PoeDetection {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Disabled,
            2 => Self::Searching,
            3 => Self::Delivering,
            4 => Self::Fault,
            5 => Self::Test,
            6 => Self::Other,
            other => Self::Unrecognized(other),
        }
    }
}

impl std::fmt::Display for PoeDetection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "Disabled"),
            Self::Searching => write!(f, "Searching"),
            Self::Delivering => write!(f, "Delivering"),
            Self::Fault => write!(f, "Fault"),
            Self::Test => write!(f, "Test"),
            Self::Other => write!(f, "Other"),
            Self::Unrecognized(code) => write!(f, "{code}"),
        }
    }
}

/// Power-over-Ethernet readings for one port. Each field degrades to
/// `None` independently when its read fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoeStatus {
    /// pethPsePortAdminEnable, true(1).
    pub enabled: Option<bool>,
    pub detection: Option<PoeDetection>,
    /// Delivered power in whole watts.
    pub power_watts: Option<u32>,
}

/// One ethernet port as published in the state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// ifIndex — the stable key for the coordinator's lifetime.
    pub index: u32,
    /// ifName as reported by the device.
    pub name: String,
    /// Shortened name for presentation.
    pub display_name: String,
    pub status: PortStatus,
    /// ifAdminStatus up(1).
    pub admin_on: bool,
    /// `Some` only for ports present in the discovered PoE mapping.
    pub poe: Option<PoeStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn detection_codes_map_per_mib() {
        assert_eq!(PoeDetection::from_code(3), PoeDetection::Delivering);
        assert_eq!(PoeDetection::from_code(1), PoeDetection::Disabled);
        assert_eq!(PoeDetection::from_code(42), PoeDetection::Unrecognized(42));
    }

    #[test]
    fn unrecognized_detection_renders_its_code() {
        assert_eq!(PoeDetection::Delivering.to_string(), "Delivering");
        assert_eq!(PoeDetection::Unrecognized(42).to_string(), "42");
    }
}

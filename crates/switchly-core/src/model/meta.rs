use serde::{Deserialize, Serialize};

/// Device-level identity and health readings.
///
/// Every field is optional: a field a device does not expose, or whose read
/// failed at bootstrap, stays absent rather than defaulting. Absent and
/// zero are different answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceMeta {
    /// sysName.
    pub system_name: Option<String>,
    /// Bridge base MAC, colon-hex when the device reports 6 raw bytes.
    pub mac_address: Option<String>,
    pub hardware_model: Option<String>,
    /// Firmware version with the memory-bank suffix stripped.
    pub firmware_version: Option<String>,
    /// Chassis PoE power budget in watts.
    pub poe_budget_watts: Option<u32>,
    /// Latest chassis temperature in °C. Cleared when the device answers
    /// with something non-numeric; kept when the read does not complete.
    pub temperature_c: Option<i64>,
    /// Uptime in seconds, from hundredths-of-a-second ticks.
    pub uptime_secs: Option<f64>,
}

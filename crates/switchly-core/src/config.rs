use switchly_snmp::SessionConfig;

/// Default seconds between scheduled poll cycles.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Runtime configuration for one coordinator.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// How to reach the device.
    pub session: SessionConfig,
    /// Seconds between scheduled poll cycles. `0` disables background
    /// polling; cycles then run only on explicit refresh commands.
    pub poll_interval_secs: u64,
}

impl MonitorConfig {
    pub fn new(session: SessionConfig) -> Self {
        Self {
            session,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }

    pub fn with_poll_interval(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs;
        self
    }
}

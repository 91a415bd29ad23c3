use thiserror::Error;

/// Errors surfaced by the coordinator and its helpers.
///
/// The split mirrors the two failure policies: `DiscoveryFailed` and
/// `UpdateFailed` abort a cycle and keep the previous snapshot, while the
/// control-path variants reject a single command without touching state.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A table row key did not carry the expected index components.
    #[error("malformed table row key '{key}'")]
    MalformedKey { key: String },

    /// A discovery walk the topology depends on failed.
    #[error("device discovery failed: {reason}")]
    DiscoveryFailed { reason: String },

    /// A poll cycle could not produce a complete port snapshot.
    #[error("poll cycle failed: {reason}")]
    UpdateFailed { reason: String },

    /// The device refused a control write, or the write never reached it.
    #[error("control operation rejected: {message}")]
    ControlRejected { message: String },

    /// A PoE command targeted a port outside the discovered PoE mapping.
    #[error("port {port} does not support PoE")]
    PoeNotSupported { port: u32 },

    /// A command targeted a port absent from the discovered topology.
    #[error("port {port} not present in discovered topology")]
    PortNotFound { port: u32 },

    /// The coordinator was never started, or has been shut down.
    #[error("coordinator is not running")]
    NotRunning,
}

impl CoreError {
    /// `true` for cycle-level failures where the previous snapshot stays
    /// authoritative and the next scheduled cycle will retry.
    pub fn is_cycle_failure(&self) -> bool {
        matches!(
            self,
            Self::DiscoveryFailed { .. } | Self::UpdateFailed { .. }
        )
    }
}

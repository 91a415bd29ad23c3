use thiserror::Error;

use crate::oid::Oid;

/// Top-level error type for the `switchly-snmp` boundary.
///
/// Two families matter to the core's failure policy: transport-level errors
/// (the request may never have reached the device — worth retrying on the
/// next cycle) and device-reported errors (the device answered and refused,
/// or does not implement the object). `switchly-core` maps these into its
/// own taxonomy per operation.
#[derive(Debug, Clone, Error)]
pub enum SnmpError {
    // ── Transport-level ─────────────────────────────────────────────
    /// The request could not be sent or the response could not be read
    /// (socket error, unreachable host, decode failure).
    #[error("transport error: {reason}")]
    Transport { reason: String },

    /// No response within the session timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Target hostname did not resolve to a usable address.
    #[error("cannot resolve target '{host}': {reason}")]
    Resolve { host: String, reason: String },

    // ── Device-reported ─────────────────────────────────────────────
    /// The device returned a non-zero error-status for the request.
    #[error("device reported error status {status}")]
    Device { status: i64 },

    /// The device does not implement the requested object.
    #[error("no such object: {oid}")]
    NoSuchObject { oid: Oid },
}

impl SnmpError {
    /// `true` for failures where the device may simply not have been
    /// reached — the caller should treat the previous reading as still
    /// pending rather than invalid.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::Resolve { .. }
        )
    }
}

// ── Session establishment types ──
//
// These types describe *how* to reach a device: address, protocol version,
// credentials, timeout. They carry credential data in memory but never touch
// disk — the config crate resolves and hands them in.

use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SnmpError;

/// SNMP protocol version negotiated for the session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum SnmpVersion {
    V1,
    V2c,
    V3,
}

/// v3 authentication protocol.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum AuthProtocol {
    None,
    Md5,
    Sha,
}

/// v3 privacy (encryption) protocol.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum PrivProtocol {
    None,
    Des,
    Aes,
}

/// Credentials for one session.
///
/// Community auth carries an optional separate write community: control
/// operations are issued with elevated authorization when the device is
/// configured that way, while polling stays on the read community.
#[derive(Debug, Clone)]
pub enum SnmpAuth {
    /// v1/v2c community strings.
    Community {
        read: SecretString,
        write: Option<SecretString>,
    },
    /// v3 user-based security.
    Usm {
        username: String,
        auth: AuthProtocol,
        auth_password: Option<SecretString>,
        privacy: PrivProtocol,
        priv_password: Option<SecretString>,
    },
}

/// Everything needed to establish one transport session.
///
/// A session is established once and reused for the coordinator's lifetime;
/// address-family fallback happens here, not per call.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Device hostname or literal address.
    pub host: String,
    /// UDP port (defaults to 161).
    pub port: u16,
    pub version: SnmpVersion,
    pub auth: SnmpAuth,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SessionConfig {
    pub fn new(host: impl Into<String>, version: SnmpVersion, auth: SnmpAuth) -> Self {
        Self {
            host: host.into(),
            port: 161,
            version,
            auth,
            timeout: Duration::from_secs(8),
        }
    }

    /// Resolve the target to a socket address, preferring IPv4 and falling
    /// back to IPv6 exactly once. Adapters call this at session
    /// establishment; a device that only negotiates one family is settled
    /// here rather than on every request.
    pub async fn resolve_target(&self) -> Result<SocketAddr, SnmpError> {
        let addrs: Vec<SocketAddr> = tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| SnmpError::Resolve {
                host: self.host.clone(),
                reason: e.to_string(),
            })?
            .collect();

        let chosen = addrs
            .iter()
            .find(|a| a.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| SnmpError::Resolve {
                host: self.host.clone(),
                reason: "no addresses returned".into(),
            })?;

        debug!(host = %self.host, addr = %chosen, "resolved session target");
        Ok(chosen)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn version_round_trips_through_strum() {
        assert_eq!(SnmpVersion::V2c.to_string(), "v2c");
        assert_eq!(SnmpVersion::from_str("v3").unwrap(), SnmpVersion::V3);
        assert!(SnmpVersion::from_str("v4").is_err());
    }

    #[tokio::test]
    async fn resolve_prefers_ipv4_literal() {
        let cfg = SessionConfig::new(
            "127.0.0.1",
            SnmpVersion::V2c,
            SnmpAuth::Community {
                read: SecretString::from("public".to_owned()),
                write: None,
            },
        );
        let addr = cfg.resolve_target().await.unwrap();
        assert!(addr.is_ipv4());
        assert_eq!(addr.port(), 161);
    }
}

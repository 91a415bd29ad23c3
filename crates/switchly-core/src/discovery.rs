//! Topology discovery.
//!
//! One-time (per session) enumeration of the device's ethernet ports and
//! its PoE-capable subset. The resulting [`Topology`] is the fixed frame
//! that every later poll cycle merges into.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use switchly_snmp::{Oid, Transport};
use tracing::{debug, info};

use crate::error::CoreError;
use crate::mib;

/// Names recorded for one discovered port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortName {
    /// ifName verbatim.
    pub raw: String,
    /// Shortened for presentation.
    pub display: String,
}

/// Row address of one port in the pethPsePortTable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoeAddress {
    pub group: u32,
    pub port: u32,
}

impl PoeAddress {
    /// Column OID for this row.
    pub fn column(&self, base: &Oid) -> Oid {
        base.child(self.group).child(self.port)
    }
}

/// Discovered port layout, keyed by ifIndex.
///
/// Invariant: every key in `poe` is also a key in `ports`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub ports: BTreeMap<u32, PortName>,
    pub poe: BTreeMap<u32, PoeAddress>,
}

impl Topology {
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

/// Walk the interface tables and build the topology.
///
/// The ifType and ifName walks are load-bearing: failure of either aborts
/// discovery. The PoE walk is not — a device without the table (or an agent
/// that refuses the subtree) yields an empty PoE mapping. Rows whose keys
/// do not parse are skipped, never guessed at.
pub async fn discover<T: Transport>(transport: &T) -> Result<Topology, CoreError> {
    let type_rows = transport
        .walk(&Oid::from(mib::IF_TYPE))
        .await
        .map_err(|e| CoreError::DiscoveryFailed {
            reason: format!("ifType walk: {e}"),
        })?;

    let mut ethernet = std::collections::BTreeSet::new();
    for (oid, value) in type_rows {
        let Ok(index) = mib::parse_port_index(oid.as_str()) else {
            debug!(key = %oid, "skipping unparsable ifType row");
            continue;
        };
        if value.as_i64() == Some(mib::ETHERNET_CSMACD) {
            ethernet.insert(index);
        }
    }

    let name_rows = transport
        .walk(&Oid::from(mib::IF_NAME))
        .await
        .map_err(|e| CoreError::DiscoveryFailed {
            reason: format!("ifName walk: {e}"),
        })?;

    let mut ports = BTreeMap::new();
    for (oid, value) in name_rows {
        let Ok(index) = mib::parse_port_index(oid.as_str()) else {
            debug!(key = %oid, "skipping unparsable ifName row");
            continue;
        };
        if !ethernet.contains(&index) {
            continue;
        }
        let raw = value.as_text();
        ports.insert(
            index,
            PortName {
                display: mib::display_port_name(&raw),
                raw,
            },
        );
    }

    let mut poe = BTreeMap::new();
    match transport.walk(&Oid::from(mib::PETH_PSE_PORT_TABLE)).await {
        Ok(rows) => {
            for (oid, _) in rows {
                let Ok((group, port)) = mib::parse_poe_group_port(oid.as_str()) else {
                    debug!(key = %oid, "skipping unparsable PoE row");
                    continue;
                };
                poe.insert(port, PoeAddress { group, port });
            }
        }
        Err(e) => {
            debug!(error = %e, "PoE table unavailable, treating device as non-PoE");
        }
    }
    poe.retain(|index, _| ports.contains_key(index));

    info!(
        ports = ports.len(),
        poe_ports = poe.len(),
        "topology discovered"
    );
    Ok(Topology { ports, poe })
}

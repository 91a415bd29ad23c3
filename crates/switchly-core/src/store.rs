//! Published device state.
//!
//! Snapshots are atomic: a poll cycle assembles a complete map off to the
//! side and swaps it in with one send. Readers either see the previous
//! snapshot or the new one, never a half-merged view.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::model::{DeviceMeta, Port};

/// Port snapshot keyed by ifIndex.
pub type PortMap = BTreeMap<u32, Port>;

/// Watch-backed holder for the coordinator's published state.
#[derive(Debug)]
pub struct StateStore {
    ports: watch::Sender<Arc<PortMap>>,
    meta: watch::Sender<Arc<DeviceMeta>>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl StateStore {
    pub(crate) fn new() -> Self {
        Self {
            ports: watch::Sender::new(Arc::new(PortMap::new())),
            meta: watch::Sender::new(Arc::new(DeviceMeta::default())),
            last_refresh: watch::Sender::new(None),
        }
    }

    /// Swap in a complete port snapshot and stamp the refresh time.
    /// Only successful cycles land here; a failed cycle leaves both alone.
    pub(crate) fn publish_ports(&self, ports: PortMap) {
        self.ports.send_replace(Arc::new(ports));
        self.last_refresh.send_replace(Some(Utc::now()));
    }

    pub(crate) fn publish_meta(&self, meta: DeviceMeta) {
        self.meta.send_replace(Arc::new(meta));
    }

    pub fn ports_snapshot(&self) -> Arc<PortMap> {
        self.ports.borrow().clone()
    }

    pub fn meta_snapshot(&self) -> Arc<DeviceMeta> {
        self.meta.borrow().clone()
    }

    /// When the last successful poll cycle completed, if any.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    pub fn subscribe_ports(&self) -> watch::Receiver<Arc<PortMap>> {
        self.ports.subscribe()
    }

    pub fn subscribe_meta(&self) -> watch::Receiver<Arc<DeviceMeta>> {
        self.meta.subscribe()
    }

    pub fn subscribe_last_refresh(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.last_refresh.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PortStatus;

    fn port(index: u32) -> Port {
        Port {
            index,
            name: format!("1/{index}"),
            display_name: format!("1/{index}"),
            status: PortStatus::Up,
            admin_on: true,
            poe: None,
        }
    }

    #[test]
    fn publish_stamps_refresh_time() {
        let store = StateStore::new();
        assert!(store.last_refresh().is_none());

        store.publish_ports(PortMap::from([(1, port(1))]));
        assert!(store.last_refresh().is_some());
        assert_eq!(store.ports_snapshot().len(), 1);
    }

    #[test]
    fn snapshot_is_stable_across_publishes() {
        let store = StateStore::new();
        store.publish_ports(PortMap::from([(1, port(1))]));
        let held = store.ports_snapshot();

        store.publish_ports(PortMap::from([(1, port(1)), (2, port(2))]));
        assert_eq!(held.len(), 1);
        assert_eq!(store.ports_snapshot().len(), 2);
    }
}

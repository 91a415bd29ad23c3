//! The synchronization coordinator.
//!
//! Owns the session transport, the cached topology and the published state.
//! A single poll cycle runs at a time; control writes deliberately bypass
//! the cycle gate so a slow walk never delays an operator action.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use switchly_snmp::{Oid, SnmpValue, Transport};
use tokio::sync::{Mutex, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::command::{Command, CommandEnvelope, CommandResult};
use crate::config::MonitorConfig;
use crate::discovery::{self, PoeAddress, Topology};
use crate::error::CoreError;
use crate::meta;
use crate::mib;
use crate::model::{DeviceMeta, PoeDetection, PoeStatus, Port, PortStatus};
use crate::store::{PortMap, StateStore};

const COMMAND_CHANNEL_CAPACITY: usize = 32;

/// Session lifecycle as observed from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SyncState {
    /// No topology cached yet.
    Uninitialized,
    /// Discovery walks in flight.
    Discovering,
    /// Topology cached, snapshots flowing.
    Polling,
    /// The most recent cycle failed. The previous snapshot stands and the
    /// next cycle retries from wherever the failure left the cache.
    Failed,
}

/// Handle to one device's coordinator. Cheap to clone; all clones share
/// the same session and published state.
pub struct Coordinator<T: Transport + 'static> {
    inner: Arc<CoordinatorInner<T>>,
}

impl<T: Transport + 'static> Clone for Coordinator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct CoordinatorInner<T> {
    config: MonitorConfig,
    transport: T,
    store: StateStore,
    topology: Mutex<Option<Topology>>,
    sync_state: watch::Sender<SyncState>,
    command_tx: mpsc::Sender<CommandEnvelope>,
    command_rx: Mutex<Option<mpsc::Receiver<CommandEnvelope>>>,
    /// Serializes poll cycles. Held across a whole cycle; never held
    /// while writing control values.
    cycle_gate: Mutex<()>,
    cancel: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<T: Transport + 'static> Coordinator<T> {
    pub fn new(config: MonitorConfig, transport: T) -> Self {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(CoordinatorInner {
                config,
                transport,
                store: StateStore::new(),
                topology: Mutex::new(None),
                sync_state: watch::Sender::new(SyncState::Uninitialized),
                command_tx,
                command_rx: Mutex::new(Some(command_rx)),
                cycle_gate: Mutex::new(()),
                cancel: CancellationToken::new(),
                tasks: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Spawn the worker tasks and run the bootstrap cycle inline.
    ///
    /// A failed bootstrap is reported but not fatal to the coordinator:
    /// the workers stay up and the next cycle retries discovery.
    pub async fn start(&self) -> Result<(), CoreError> {
        if let Some(rx) = self.inner.command_rx.lock().await.take() {
            let mut tasks = self.inner.tasks.lock().await;
            tasks.push(tokio::spawn(command_processor_task(
                self.clone(),
                rx,
                self.inner.cancel.child_token(),
            )));
            if self.inner.config.poll_interval_secs > 0 {
                tasks.push(tokio::spawn(poll_task(
                    self.clone(),
                    self.inner.cancel.child_token(),
                )));
            }
        }

        let bootstrap = self.run_cycle().await;
        if let Err(e) = &bootstrap {
            warn!(error = %e, "bootstrap cycle failed, retrying on schedule");
        }
        bootstrap
    }

    /// Cancel the workers and wait for them to finish.
    pub async fn shutdown(&self) {
        info!("coordinator shutting down");
        self.inner.cancel.cancel();
        let mut tasks = self.inner.tasks.lock().await;
        for handle in tasks.drain(..) {
            if let Err(e) = handle.await {
                debug!(error = %e, "worker task join failed");
            }
        }
    }

    /// Drop the cached topology. The next cycle rediscovers.
    pub async fn reset(&self) {
        *self.inner.topology.lock().await = None;
        self.set_state(SyncState::Uninitialized);
        debug!("cached topology dropped");
    }

    /// Submit a command and wait for its outcome.
    pub async fn execute(&self, command: Command) -> Result<CommandResult, CoreError> {
        if self.inner.command_rx.lock().await.is_some() {
            // start() was never called; nothing is draining the channel.
            return Err(CoreError::NotRunning);
        }
        let (respond_to, reply) = oneshot::channel();
        self.inner
            .command_tx
            .send(CommandEnvelope {
                command,
                respond_to,
            })
            .await
            .map_err(|_| CoreError::NotRunning)?;
        reply.await.map_err(|_| CoreError::NotRunning)?
    }

    pub async fn set_port_admin(&self, index: u32, enable: bool) -> Result<(), CoreError> {
        self.execute(Command::SetPortAdmin { index, enable })
            .await
            .map(|_| ())
    }

    pub async fn set_port_poe_admin(&self, index: u32, enable: bool) -> Result<(), CoreError> {
        self.execute(Command::SetPortPoeAdmin { index, enable })
            .await
            .map(|_| ())
    }

    /// Run a poll cycle now, outside the schedule.
    pub async fn request_refresh(&self) -> Result<CommandResult, CoreError> {
        self.execute(Command::Refresh).await
    }

    pub async fn rediscover(&self) -> Result<CommandResult, CoreError> {
        self.execute(Command::Rediscover).await
    }

    /// One cheap round-trip to prove the session works; returns sysName.
    pub async fn test_connection(&self) -> Result<String, CoreError> {
        self.inner
            .transport
            .get(&Oid::from(mib::SYS_NAME))
            .await
            .map(|value| value.as_text())
            .map_err(|e| CoreError::UpdateFailed {
                reason: e.to_string(),
            })
    }

    // ── Observation ─────────────────────────────────────────────────

    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &StateStore {
        &self.inner.store
    }

    pub fn sync_state(&self) -> SyncState {
        *self.inner.sync_state.borrow()
    }

    pub fn subscribe_sync_state(&self) -> watch::Receiver<SyncState> {
        self.inner.sync_state.subscribe()
    }

    pub async fn topology(&self) -> Option<Topology> {
        self.inner.topology.lock().await.clone()
    }

    fn set_state(&self, state: SyncState) {
        self.inner.sync_state.send_replace(state);
    }

    // ── Cycle ───────────────────────────────────────────────────────

    async fn run_cycle(&self) -> Result<(), CoreError> {
        let _guard = self.inner.cycle_gate.lock().await;
        let transport = &self.inner.transport;

        let cached = { self.inner.topology.lock().await.clone() };
        let topology = match cached {
            Some(topology) => {
                let mut device_meta = (*self.inner.store.meta_snapshot()).clone();
                meta::fetch_metrics(transport, &mut device_meta).await;
                self.inner.store.publish_meta(device_meta);
                topology
            }
            None => {
                self.set_state(SyncState::Discovering);
                let topology = match discovery::discover(transport).await {
                    Ok(topology) => topology,
                    Err(e) => {
                        self.set_state(SyncState::Failed);
                        return Err(e);
                    }
                };
                let mut device_meta = DeviceMeta::default();
                meta::fetch_identity(transport, &mut device_meta).await;
                meta::fetch_metrics(transport, &mut device_meta).await;
                self.inner.store.publish_meta(device_meta);
                *self.inner.topology.lock().await = Some(topology.clone());
                topology
            }
        };

        match self.poll_ports(&topology).await {
            Ok(ports) => {
                debug!(ports = ports.len(), "snapshot published");
                self.inner.store.publish_ports(ports);
                self.set_state(SyncState::Polling);
                Ok(())
            }
            Err(e) => {
                self.set_state(SyncState::Failed);
                Err(e)
            }
        }
    }

    /// Walk the status columns, merge against the topology frame, and
    /// assemble a complete snapshot.
    async fn poll_ports(&self, topology: &Topology) -> Result<PortMap, CoreError> {
        let transport = &self.inner.transport;
        let oper_oid = Oid::from(mib::IF_OPER_STATUS);
        let admin_oid = Oid::from(mib::IF_ADMIN_STATUS);
        let (oper_rows, admin_rows) = tokio::join!(
            transport.walk(&oper_oid),
            transport.walk(&admin_oid),
        );
        let oper_rows = oper_rows.map_err(|e| CoreError::UpdateFailed {
            reason: format!("ifOperStatus walk: {e}"),
        })?;
        let admin_rows = admin_rows.map_err(|e| CoreError::UpdateFailed {
            reason: format!("ifAdminStatus walk: {e}"),
        })?;

        let mut oper = std::collections::BTreeMap::new();
        for (oid, value) in oper_rows {
            let Ok(index) = mib::parse_port_index(oid.as_str()) else {
                continue;
            };
            oper.insert(index, value.as_i64() == Some(mib::OPER_UP));
        }
        let mut admin = std::collections::BTreeMap::new();
        for (oid, value) in admin_rows {
            let Ok(index) = mib::parse_port_index(oid.as_str()) else {
                continue;
            };
            admin.insert(index, value.as_i64() == Some(mib::ADMIN_UP));
        }

        // PoE column reads address disjoint rows; issue them concurrently.
        let poe_reads = topology
            .poe
            .iter()
            .map(|(index, address)| async move { (*index, self.poll_poe(*index, address).await) });
        let poe: std::collections::BTreeMap<u32, PoeStatus> =
            join_all(poe_reads).await.into_iter().collect();

        let mut ports = PortMap::new();
        for (index, name) in &topology.ports {
            // A port missing from a status walk reads as down, not absent:
            // the topology decides membership.
            let up = oper.get(index).copied().unwrap_or(false);
            ports.insert(
                *index,
                Port {
                    index: *index,
                    name: name.raw.clone(),
                    display_name: name.display.clone(),
                    status: if up { PortStatus::Up } else { PortStatus::Down },
                    admin_on: admin.get(index).copied().unwrap_or(false),
                    poe: poe.get(index).copied(),
                },
            );
        }
        Ok(ports)
    }

    /// Best-effort PoE readings for one port. Each of the three reads
    /// degrades to `None` on its own.
    async fn poll_poe(&self, index: u32, address: &PoeAddress) -> PoeStatus {
        let transport = &self.inner.transport;
        let enable_oid = address.column(&Oid::from(mib::PETH_PSE_PORT_ADMIN_ENABLE));
        let detect_oid = address.column(&Oid::from(mib::PETH_PSE_PORT_DETECTION_STATUS));
        // Delivered power is indexed by raw ifIndex, not group.port.
        let power_oid = Oid::from(mib::POE_PORT_POWER).child(index);

        let (enable, detect, power) = tokio::join!(
            transport.get(&enable_oid),
            transport.get(&detect_oid),
            transport.get(&power_oid),
        );

        PoeStatus {
            enabled: enable
                .ok()
                .and_then(|v| v.as_i64())
                .map(|code| code == mib::TRUTH_TRUE),
            detection: detect
                .ok()
                .and_then(|v| v.as_i64())
                .map(PoeDetection::from_code),
            power_watts: power
                .ok()
                .and_then(|v| v.as_i64())
                .and_then(|w| u32::try_from(w).ok()),
        }
    }

    // ── Command routing ─────────────────────────────────────────────

    async fn route_command(&self, command: Command) -> Result<CommandResult, CoreError> {
        match command {
            Command::SetPortAdmin { index, enable } => {
                self.ensure_port(index).await?;
                let oid = Oid::from(mib::IF_ADMIN_STATUS).child(index);
                let code = if enable { mib::ADMIN_UP } else { mib::ADMIN_DOWN };
                self.write(&oid, SnmpValue::Integer(code)).await?;
                info!(port = index, enable, "port admin state written");
                Ok(CommandResult::Done)
            }
            Command::SetPortPoeAdmin { index, enable } => {
                let address = self.poe_address(index).await?;
                let oid = address.column(&Oid::from(mib::PETH_PSE_PORT_ADMIN_ENABLE));
                let code = if enable {
                    mib::TRUTH_TRUE
                } else {
                    mib::TRUTH_FALSE
                };
                self.write(&oid, SnmpValue::Integer(code)).await?;
                info!(port = index, enable, "port PoE admin state written");
                Ok(CommandResult::Done)
            }
            Command::Refresh => {
                self.run_cycle().await?;
                Ok(CommandResult::Refreshed {
                    ports: self.inner.store.ports_snapshot().len(),
                })
            }
            Command::Rediscover => {
                self.reset().await;
                self.run_cycle().await?;
                Ok(CommandResult::Refreshed {
                    ports: self.inner.store.ports_snapshot().len(),
                })
            }
        }
    }

    async fn ensure_port(&self, index: u32) -> Result<(), CoreError> {
        let topology = self.inner.topology.lock().await;
        match topology.as_ref() {
            Some(t) if t.ports.contains_key(&index) => Ok(()),
            _ => Err(CoreError::PortNotFound { port: index }),
        }
    }

    async fn poe_address(&self, index: u32) -> Result<PoeAddress, CoreError> {
        let topology = self.inner.topology.lock().await;
        let Some(t) = topology.as_ref() else {
            return Err(CoreError::PortNotFound { port: index });
        };
        if let Some(address) = t.poe.get(&index) {
            Ok(*address)
        } else if t.ports.contains_key(&index) {
            Err(CoreError::PoeNotSupported { port: index })
        } else {
            Err(CoreError::PortNotFound { port: index })
        }
    }

    /// A set is a real write every time; failures surface, never retry.
    async fn write(&self, oid: &Oid, value: SnmpValue) -> Result<(), CoreError> {
        self.inner
            .transport
            .set(oid, value)
            .await
            .map_err(|e| CoreError::ControlRejected {
                message: e.to_string(),
            })
    }
}

async fn command_processor_task<T: Transport + 'static>(
    coordinator: Coordinator<T>,
    mut rx: mpsc::Receiver<CommandEnvelope>,
    cancel: CancellationToken,
) {
    debug!("command processor started");
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            envelope = rx.recv() => {
                let Some(CommandEnvelope { command, respond_to }) = envelope else {
                    break;
                };
                let result = coordinator.route_command(command).await;
                if let Err(e) = &result {
                    warn!(?command, error = %e, "command failed");
                }
                if respond_to.send(result).is_err() {
                    debug!("command submitter went away before the reply");
                }
            }
        }
    }
    debug!("command processor stopped");
}

async fn poll_task<T: Transport + 'static>(coordinator: Coordinator<T>, cancel: CancellationToken) {
    let period = Duration::from_secs(coordinator.inner.config.poll_interval_secs);
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick fires immediately; the bootstrap cycle covered it.
    interval.tick().await;
    debug!(period_secs = period.as_secs(), "poll task started");
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = coordinator.run_cycle().await {
                    warn!(error = %e, "scheduled poll cycle failed");
                }
            }
        }
    }
    debug!("poll task stopped");
}

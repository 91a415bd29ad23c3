//! State synchronization for SNMP-managed ethernet switches.
//!
//! The [`Coordinator`] owns one device session: it discovers the port
//! topology once, polls status on a schedule, merges readings into atomic
//! snapshots published through watch channels, and routes idempotent
//! control writes around the poll schedule.

pub mod command;
pub mod config;
pub mod coordinator;
pub mod discovery;
pub mod error;
pub mod meta;
pub mod mib;
pub mod model;
pub mod store;

pub use command::{Command, CommandResult};
pub use config::MonitorConfig;
pub use coordinator::{Coordinator, SyncState};
pub use discovery::{PoeAddress, PortName, Topology};
pub use error::CoreError;
pub use model::{DeviceMeta, PoeDetection, PoeStatus, Port, PortStatus};
pub use store::{PortMap, StateStore};

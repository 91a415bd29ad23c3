use tokio::sync::oneshot;

use crate::error::CoreError;

/// Control and maintenance operations accepted by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Write ifAdminStatus for one port.
    SetPortAdmin { index: u32, enable: bool },
    /// Write pethPsePortAdminEnable for one PoE-capable port.
    SetPortPoeAdmin { index: u32, enable: bool },
    /// Run a poll cycle now, outside the schedule.
    Refresh,
    /// Drop the cached topology and discover from scratch.
    Rediscover,
}

/// What a completed command reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    Done,
    /// A refresh or rediscover completed; `ports` is the new snapshot size.
    Refreshed { ports: usize },
}

/// A command paired with its reply channel.
#[derive(Debug)]
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub respond_to: oneshot::Sender<Result<CommandResult, CoreError>>,
}

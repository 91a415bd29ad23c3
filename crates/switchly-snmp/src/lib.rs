//! SNMP transport boundary for the switchly workspace.
//!
//! This crate defines everything `switchly-core` needs to talk to a managed
//! device without knowing how the bytes get on the wire:
//!
//! - **[`Oid`]** — dotted-numeric object identifier with suffix helpers for
//!   table-row addressing.
//! - **[`SnmpValue`]** — tagged value type returned by reads. Converts the
//!   protocol layer's ambiguous varbind triples into a single `Ok(value)` /
//!   `Err(kind)` shape exactly once, at this boundary.
//! - **[`SnmpError`]** — distinguishes transport-level failures (retry next
//!   cycle) from device-reported errors (the request arrived and was refused).
//! - **[`Transport`]** — the capability trait (`get` / `walk` / `set`). The
//!   core is generic over it; wire implementations and test doubles plug in
//!   at a single construction point.
//! - **[`SessionConfig`]** — target address, protocol version, credentials,
//!   and timeout for establishing one session, plus IPv4-preferred address
//!   resolution with a one-shot IPv6 fallback.

pub mod error;
pub mod oid;
pub mod session;
pub mod transport;
pub mod value;

pub use error::SnmpError;
pub use oid::Oid;
pub use session::{AuthProtocol, PrivProtocol, SessionConfig, SnmpAuth, SnmpVersion};
pub use transport::Transport;
pub use value::SnmpValue;

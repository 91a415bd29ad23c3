// ── Transport capability trait ──
//
// The single seam between switchly-core and the wire. Implementations own
// encoding, transport, retries-per-request, and authentication/privacy
// negotiation; the core sees tagged results only.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SnmpError;
use crate::oid::Oid;
use crate::value::SnmpValue;

/// Read/walk/write access to one managed device over an established session.
///
/// Contract notes:
///
/// - All three calls distinguish transport-level failures from
///   device-reported errors through [`SnmpError`].
/// - `walk` enumerates every row under `prefix` as `(row identifier, value)`
///   pairs. Whether that is done with get-next or bulk requests, and in what
///   batch size, is the implementation's business.
/// - `set` uses the session's *write* credentials where those are configured
///   separately from read credentials (v1/v2c write community). A `set` is a
///   real write every time — callers must not retry automatically.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Read a single scalar.
    async fn get(&self, oid: &Oid) -> Result<SnmpValue, SnmpError>;

    /// Enumerate all rows under an OID prefix.
    async fn walk(&self, prefix: &Oid) -> Result<Vec<(Oid, SnmpValue)>, SnmpError>;

    /// Write a single scalar.
    async fn set(&self, oid: &Oid, value: SnmpValue) -> Result<(), SnmpError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, oid: &Oid) -> Result<SnmpValue, SnmpError> {
        (**self).get(oid).await
    }

    async fn walk(&self, prefix: &Oid) -> Result<Vec<(Oid, SnmpValue)>, SnmpError> {
        (**self).walk(prefix).await
    }

    async fn set(&self, oid: &Oid, value: SnmpValue) -> Result<(), SnmpError> {
        (**self).set(oid, value).await
    }
}

//! Pending-call registry: correlation id -> one-shot resolver.
//!
//! Message flow for an outgoing call:
//! 1. The adapter registers the call's uuid and gets a [`PendingCall`].
//! 2. The call envelope is sent over the transport.
//! 3. The caller awaits the `PendingCall`.
//! 4. The inbound handler sees the matching response and resolves the uuid.
//!
//! There is no built-in timeout: a call that never gets a response stays
//! pending. See `crate::deadline` for an opt-in wrapper.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::oneshot;

use tribridge_core::error::{Result, RpcError};

/// Outstanding calls to one remote peer kind.
pub struct PendingCalls {
    label: &'static str,
    waiters: DashMap<String, oneshot::Sender<Value>>,
}

impl PendingCalls {
    /// `label` names the peer kind in logs (e.g. `"client->server"`).
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            waiters: DashMap::new(),
        }
    }

    /// Register `id` and return the future its response resolves.
    pub fn register(&self, id: impl Into<String>) -> PendingCall {
        let id = id.into();
        let (tx, rx) = oneshot::channel();
        self.waiters.insert(id.clone(), tx);
        PendingCall { id, rx }
    }

    /// Deliver `value` to the call registered under `id`, removing the entry.
    ///
    /// Unknown ids (late or duplicate responses) are logged and ignored.
    pub fn resolve(&self, id: &str, value: Value) -> bool {
        let Some((_, tx)) = self.waiters.remove(id) else {
            tracing::warn!(pending = self.label, uuid = %id, "response for unknown call dropped");
            return false;
        };
        if tx.send(value).is_err() {
            tracing::debug!(pending = self.label, uuid = %id, "caller stopped waiting before response");
            return false;
        }
        true
    }

    /// Drop the entry for `id` without resolving it (send failed).
    pub fn forget(&self, id: &str) -> bool {
        self.waiters.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.waiters.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.waiters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }
}

/// Suspended result of an outgoing call.
pub struct PendingCall {
    id: String,
    rx: oneshot::Receiver<Value>,
}

impl PendingCall {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Future for PendingCall {
    type Output = Result<Value>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let polled = Pin::new(&mut self.rx).poll(cx);
        match polled {
            Poll::Ready(Ok(value)) => Poll::Ready(Ok(value)),
            Poll::Ready(Err(_)) => Poll::Ready(Err(RpcError::Abandoned(self.id.clone()))),
            Poll::Pending => Poll::Pending,
        }
    }
}

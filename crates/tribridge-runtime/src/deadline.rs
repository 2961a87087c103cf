//! Optional caller-side deadline for outgoing calls.
//!
//! Pending registries never expire entries on their own. Wrapping a call
//! here gives up waiting after `dur`; a reply that arrives later is dropped
//! with a warning by the registry.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tribridge_core::error::{Result, RpcError};

pub async fn with_deadline<F>(dur: Duration, fut: F) -> Result<Value>
where
    F: Future<Output = Result<Value>>,
{
    match tokio::time::timeout(dur, fut).await {
        Ok(res) => res,
        Err(_) => Err(RpcError::Timeout(dur)),
    }
}

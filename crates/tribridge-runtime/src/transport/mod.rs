//! Transport seams.
//!
//! The runtime never owns a socket. Each context is handed the one-way send
//! primitives of its host platform through these traits; inbound text is fed
//! back in through the adapters' `handle_*` entry points.
//!
//! `loopback` wires every seam together in-process for tests and the dev host.

pub mod loopback;

use async_trait::async_trait;
use serde_json::Value;

use tribridge_core::error::Result;
use tribridge_core::protocol::{Channel, PlayerId, Target};

/// Server side of the server<->client transport.
#[async_trait]
pub trait ServerOutbound: Send + Sync {
    async fn send(&self, channel: Channel, target: Target, text: String) -> Result<()>;
}

/// Client side of the server<->client transport.
#[async_trait]
pub trait ClientOutbound: Send + Sync {
    async fn send(&self, channel: Channel, text: String) -> Result<()>;

    /// Id the server knows this client by.
    fn server_id(&self) -> PlayerId;

    /// Local player index inside the client process.
    fn local_index(&self) -> PlayerId;
}

/// Client->webview in-process push (encoded `WebMessage` frames).
#[async_trait]
pub trait WebviewPush: Send + Sync {
    async fn push(&self, text: String) -> Result<()>;
}

/// Webview->client request/response, the webview's only way out.
#[async_trait]
pub trait BridgeRequest: Send + Sync {
    async fn post(&self, url: &str, body: String) -> Result<Value>;
}

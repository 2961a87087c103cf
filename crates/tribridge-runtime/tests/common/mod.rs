#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use tribridge_core::error::{Result, RpcError};
use tribridge_core::protocol::{codec, Channel, PlayerId, Target};
use tribridge_core::{Envelope, WebMessage};
use tribridge_runtime::host::{CommandCallback, NativeCallback, NativeHost};
use tribridge_runtime::transport::{BridgeRequest, ClientOutbound, ServerOutbound, WebviewPush};

/// Server outbound that only records what was sent.
#[derive(Default)]
pub struct RecordingServer {
    pub sent: Mutex<Vec<(Channel, Target, String)>>,
}

impl RecordingServer {
    pub fn envelopes(&self) -> Vec<(Channel, Target, Envelope)> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(c, t, s)| (*c, *t, codec::decode(s).unwrap()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ServerOutbound for RecordingServer {
    async fn send(&self, channel: Channel, target: Target, text: String) -> Result<()> {
        self.sent.lock().unwrap().push((channel, target, text));
        Ok(())
    }
}

/// Client outbound recording frames; `server_id` is the id the server uses.
pub struct RecordingClient {
    pub server_id: PlayerId,
    pub index: PlayerId,
    pub fail: bool,
    pub sent: Mutex<Vec<(Channel, String)>>,
}

impl RecordingClient {
    pub fn new(server_id: PlayerId) -> Self {
        Self {
            server_id,
            index: 0,
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(server_id: PlayerId) -> Self {
        Self {
            fail: true,
            ..Self::new(server_id)
        }
    }

    pub fn envelopes(&self) -> Vec<(Channel, Envelope)> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(c, s)| (*c, codec::decode(s).unwrap()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ClientOutbound for RecordingClient {
    async fn send(&self, channel: Channel, text: String) -> Result<()> {
        if self.fail {
            return Err(RpcError::Transport("link down".into()));
        }
        self.sent.lock().unwrap().push((channel, text));
        Ok(())
    }

    fn server_id(&self) -> PlayerId {
        self.server_id
    }

    fn local_index(&self) -> PlayerId {
        self.index
    }
}

#[derive(Default)]
pub struct RecordingPush {
    pub pushed: Mutex<Vec<String>>,
}

impl RecordingPush {
    pub fn messages(&self) -> Vec<WebMessage> {
        self.pushed
            .lock()
            .unwrap()
            .iter()
            .map(|s| codec::decode_web(s).unwrap())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pushed.lock().unwrap().len()
    }
}

#[async_trait]
impl WebviewPush for RecordingPush {
    async fn push(&self, text: String) -> Result<()> {
        self.pushed.lock().unwrap().push(text);
        Ok(())
    }
}

/// Bridge that records posts and answers every one with `reply`.
pub struct RecordingBridge {
    pub reply: Value,
    pub posts: Mutex<Vec<(String, String)>>,
}

impl RecordingBridge {
    pub fn new(reply: Value) -> Self {
        Self {
            reply,
            posts: Mutex::new(Vec::new()),
        }
    }

    pub fn envelopes(&self) -> Vec<(String, Envelope)> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .map(|(u, b)| (u.clone(), codec::decode(b).unwrap()))
            .collect()
    }
}

#[async_trait]
impl BridgeRequest for RecordingBridge {
    async fn post(&self, url: &str, body: String) -> Result<Value> {
        self.posts.lock().unwrap().push((url.to_string(), body));
        Ok(self.reply.clone())
    }
}

/// Host that accepts everything and remembers nothing.
#[derive(Default)]
pub struct NullHost;

impl NativeHost for NullHost {
    fn on_native(&self, _event: &str, _callback: NativeCallback) {}
    fn register_command(&self, _name: &str, _callback: CommandCallback, _restricted: bool) {}
    fn set_ui_focus(&self, _has_focus: bool, _has_cursor: bool) {}
}

/// Spin until `cond` holds or a second passes.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}

pub fn raw(v: Value) -> String {
    v.to_string()
}

pub fn arc<T>(t: T) -> Arc<T> {
    Arc::new(t)
}

//! Webview adapter.
//!
//! No transport of its own: envelopes arrive as `WebMessage` pushes from the
//! client, and every outbound envelope (calls and replies alike) is posted to
//! the client bridge. Calls resolve with the bridge's response body, so the
//! webview keeps no pending registry.

use std::sync::Arc;

use serde_json::Value;

use tribridge_core::error::Result;
use tribridge_core::protocol::channel::bridge_url;
use tribridge_core::protocol::codec;
use tribridge_core::{Channel, Envelope, Environment, WebMessage};

use crate::config::RpcConfig;
use crate::context::base::ContextBase;
use crate::dispatch::{Handler, HandlerRegistry};
use crate::routing::{route, Action};
use crate::transport::BridgeRequest;

pub struct WebviewRpc {
    base: ContextBase,
    client_handlers: HandlerRegistry,
    server_handlers: HandlerRegistry,
    bridge: Arc<dyn BridgeRequest>,
    url: String,
}

impl WebviewRpc {
    pub fn new(cfg: &RpcConfig, bridge: Arc<dyn BridgeRequest>) -> Self {
        Self {
            base: ContextBase::new(Environment::Webview, cfg.debug),
            client_handlers: HandlerRegistry::new(),
            server_handlers: HandlerRegistry::new(),
            bridge,
            url: bridge_url(&cfg.webview.resource_name, Channel::ListenerWeb),
        }
    }

    /// Bridge endpoint every outbound envelope is posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    // ===== HANDLERS =====

    /// Receive callback for raw push frames.
    pub async fn handle_push(&self, raw: &str) -> Result<()> {
        let msg = codec::decode_web(raw)?;
        self.handle_message(msg).await
    }

    pub async fn handle_message(&self, msg: WebMessage) -> Result<()> {
        let env = msg.data;
        self.base.accepted(&env);

        if env.called_from != msg.origin.origin() {
            tracing::debug!(origin = %msg.origin, from = %env.called_from, "origin does not match sender, ignored");
            return Ok(());
        }
        let handlers = match env.called_from {
            Environment::Client => &self.client_handlers,
            Environment::Server => &self.server_handlers,
            Environment::Webview => return Ok(()),
        };

        match route(Environment::Webview, &env) {
            Action::Dispatch => {
                self.base.verify_event(handlers, &env)?;
                let result = handlers.dispatch(&env.event, env.args()).await?;
                let reply = env.reply(Environment::Webview, env.called_from, result);
                self.bridge.post(&self.url, codec::encode(&reply)?).await?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    async fn call(&self, to: Environment, event: &str, args: Vec<Value>) -> Result<Value> {
        let env = Envelope::call(event, Environment::Webview, to, args, None);
        self.bridge.post(&self.url, codec::encode(&env)?).await
    }

    // ===== CLIENT =====

    pub fn on_client(&self, event: &str, handler: Arc<dyn Handler>) -> &Self {
        self.base.op("onClient", event);
        self.client_handlers.register(event, handler);
        self
    }

    pub fn off_client(&self, event: &str) -> &Self {
        self.base.op("offClient", event);
        self.client_handlers.unregister(event);
        self
    }

    pub async fn emit_client(&self, event: &str, args: Vec<Value>) -> Result<Value> {
        self.base.op("emitClient", event);
        self.call(Environment::Client, event, args).await
    }

    // ===== SERVER =====

    pub fn on_server(&self, event: &str, handler: Arc<dyn Handler>) -> &Self {
        self.base.op("onServer", event);
        self.server_handlers.register(event, handler);
        self
    }

    pub fn off_server(&self, event: &str) -> &Self {
        self.base.op("offServer", event);
        self.server_handlers.unregister(event);
        self
    }

    /// Call the server through the client; the client fills in the player.
    pub async fn emit_server(&self, event: &str, args: Vec<Value>) -> Result<Value> {
        self.base.op("emitServer", event);
        self.call(Environment::Server, event, args).await
    }

    // ===== SELF =====

    pub fn on_self(&self, event: &str, handler: Arc<dyn Handler>) -> &Self {
        self.base.on_self(event, handler);
        self
    }

    pub fn off_self(&self, event: &str) -> &Self {
        self.base.off_self(event);
        self
    }

    pub async fn emit_self(&self, event: &str, args: Vec<Value>) -> Result<Value> {
        self.base.emit_self(event, args).await
    }
}

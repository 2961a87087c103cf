//! Client adapter.
//!
//! The client sits between the server and its webview:
//! - `handle_server` receives `__rpc:listenerServer` traffic. Calls addressed
//!   to the client dispatch locally; calls addressed to the webview are pushed
//!   into it untouched.
//! - `handle_webview` is the webview bridge callback. Calls addressed to the
//!   client dispatch locally; anything addressed to the server is relayed on
//!   `__rpc:listenerWeb` with the local player id filled in.
//!
//! Webview->server calls are awaited in a registry of their own so their
//! responses go back to the webview and never to the client's own callers.

use std::sync::Arc;

use serde_json::{json, Value};

use tribridge_core::error::Result;
use tribridge_core::native::{self, NativeKind};
use tribridge_core::protocol::codec;
use tribridge_core::{Channel, Envelope, Environment, WebMessage};

use crate::config::RpcConfig;
use crate::context::base::ContextBase;
use crate::dispatch::{Handler, HandlerRegistry, PendingCalls};
use crate::host::{CommandCallback, NativeCallback, NativeHost};
use crate::routing::{route, Action};
use crate::transport::{ClientOutbound, WebviewPush};

pub struct ClientRpc {
    base: ContextBase,
    server_handlers: HandlerRegistry,
    server_pending: PendingCalls,
    webview_handlers: HandlerRegistry,
    webview_pending: PendingCalls,
    relayed_pending: PendingCalls,
    outbound: Arc<dyn ClientOutbound>,
    webview: Arc<dyn WebviewPush>,
    host: Arc<dyn NativeHost>,
}

fn status(s: &str) -> Value {
    json!({ "status": s })
}

impl ClientRpc {
    pub fn new(
        cfg: &RpcConfig,
        outbound: Arc<dyn ClientOutbound>,
        webview: Arc<dyn WebviewPush>,
        host: Arc<dyn NativeHost>,
    ) -> Self {
        Self {
            base: ContextBase::new(Environment::Client, cfg.debug),
            server_handlers: HandlerRegistry::new(),
            server_pending: PendingCalls::new("client->server"),
            webview_handlers: HandlerRegistry::new(),
            webview_pending: PendingCalls::new("client->webview"),
            relayed_pending: PendingCalls::new("webview->server"),
            outbound,
            webview,
            host,
        }
    }

    // ===== HANDLERS =====

    /// Receive callback for `__rpc:listenerServer`.
    pub async fn handle_server(&self, raw: &str) -> Result<()> {
        let env = codec::decode(raw)?;
        self.base.accepted(&env);

        if env.called_from != Environment::Server {
            return Ok(());
        }

        match route(Environment::Client, &env) {
            Action::Dispatch => {
                self.base.verify_event(&self.server_handlers, &env)?;
                let result = self.server_handlers.dispatch(&env.event, env.args()).await?;
                let reply = env.reply(Environment::Client, Environment::Server, result);
                self.outbound
                    .send(Channel::ListenerClient, codec::encode(&reply)?)
                    .await
            }
            Action::Resolve => {
                self.server_pending.resolve(&env.uuid, env.result());
                Ok(())
            }
            Action::RelayToWebview => self.relay_server_to_webview(env).await,
            Action::ResolveRelayed => {
                self.relayed_pending.resolve(&env.uuid, env.result());
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Webview bridge callback. The returned value is the bridge response
    /// body: the handler result for calls, `{"status": ...}` otherwise.
    pub async fn handle_webview(&self, env: Envelope) -> Result<Value> {
        self.base.accepted(&env);

        if env.called_from != Environment::Webview {
            return Ok(status("unknown"));
        }

        match route(Environment::Client, &env) {
            Action::Dispatch => {
                self.base.verify_event(&self.webview_handlers, &env)?;
                self.webview_handlers.dispatch(&env.event, env.args()).await
            }
            Action::Resolve => {
                self.webview_pending.resolve(&env.uuid, env.result());
                Ok(status("ok"))
            }
            Action::RelayToServer if env.is_call() => self.relay_webview_to_server(env).await,
            Action::RelayToServer => {
                self.forward_webview_response(env).await?;
                Ok(status("ok"))
            }
            _ => Ok(status("unknown")),
        }
    }

    /// Hop server->webview: push a server call into the webview unmodified.
    pub async fn relay_server_to_webview(&self, env: Envelope) -> Result<()> {
        let msg = WebMessage {
            origin: Channel::ListenerServer,
            data: env,
        };
        self.webview.push(codec::encode_web(&msg)?).await
    }

    /// Hop webview->server: forward a webview call and wait for the server's
    /// reply on the webview's behalf.
    pub async fn relay_webview_to_server(&self, mut env: Envelope) -> Result<Value> {
        env.player = Some(self.outbound.server_id());
        let text = codec::encode(&env)?;

        let waiter = self.relayed_pending.register(env.uuid.clone());
        if let Err(e) = self.outbound.send(Channel::ListenerWeb, text).await {
            self.relayed_pending.forget(&env.uuid);
            return Err(e);
        }
        waiter.await
    }

    /// Hop webview->server for a response the webview produced.
    pub async fn forward_webview_response(&self, mut env: Envelope) -> Result<()> {
        env.player = Some(self.outbound.server_id());
        self.outbound
            .send(Channel::ListenerWeb, codec::encode(&env)?)
            .await
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

    pub async fn emit_server(&self, event: &str, args: Vec<Value>) -> Result<Value> {
        self.base.op("emitServer", event);
        let env = Envelope::call(
            event,
            Environment::Client,
            Environment::Server,
            args,
            Some(self.outbound.server_id()),
        );
        let text = codec::encode(&env)?;

        let waiter = self.server_pending.register(env.uuid.clone());
        if let Err(e) = self.outbound.send(Channel::ListenerClient, text).await {
            self.server_pending.forget(&env.uuid);
            return Err(e);
        }
        waiter.await
    }

    // ===== WEBVIEW =====

    pub fn on_webview(&self, event: &str, handler: Arc<dyn Handler>) -> &Self {
        self.base.op("onWebview", event);
        self.webview_handlers.register(event, handler);
        self
    }

    pub fn off_webview(&self, event: &str) -> &Self {
        self.base.op("offWebview", event);
        self.webview_handlers.unregister(event);
        self
    }

    pub async fn emit_webview(&self, event: &str, args: Vec<Value>) -> Result<Value> {
        self.base.op("emitWebview", event);
        let env = Envelope::call(
            event,
            Environment::Client,
            Environment::Webview,
            args,
            Some(self.outbound.local_index()),
        );
        let msg = WebMessage {
            origin: Channel::ListenerClient,
            data: env,
        };
        let text = codec::encode_web(&msg)?;

        let waiter = self.webview_pending.register(msg.data.uuid.clone());
        if let Err(e) = self.webview.push(text).await {
            self.webview_pending.forget(&msg.data.uuid);
            return Err(e);
        }
        waiter.await
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

    // ===== OTHER =====

    /// Client commands are never restricted.
    pub fn on_command(&self, name: &str, callback: CommandCallback) -> &Self {
        self.base.op("onCommand", name);
        self.host.register_command(name, callback, false);
        self
    }

    pub fn on_native_event(&self, event: &str, callback: NativeCallback) -> Result<&Self> {
        native::ensure_known(NativeKind::Client, event)?;
        self.base.op("onNativeEvent", event);
        self.host.on_native(event, callback);
        Ok(self)
    }

    pub fn on_native_network_event(&self, event: &str, callback: NativeCallback) -> Result<&Self> {
        native::ensure_known(NativeKind::ClientNetwork, event)?;
        self.base.op("onNativeNetworkEvent", event);
        self.host.on_native(event, callback);
        Ok(self)
    }

    pub fn set_webview_focus(&self, has_focus: bool, has_cursor: bool) -> &Self {
        if self.base.debug() {
            tracing::debug!(has_focus, has_cursor, "setWebviewFocus");
        }
        self.host.set_ui_focus(has_focus, has_cursor);
        self
    }

    /// Calls still waiting for a reply, including relayed webview calls.
    pub fn outstanding(&self) -> usize {
        self.server_pending.len() + self.webview_pending.len() + self.relayed_pending.len()
    }
}

//! Server adapter.
//!
//! Inbound: `__rpc:listenerClient` (client traffic) and `__rpc:listenerWeb`
//! (webview traffic relayed by a client). Outbound: everything goes out on
//! `__rpc:listenerServer` addressed to one player or to everyone.
//!
//! Calls received here get the caller's player id prepended to their
//! arguments, so handlers always know who is asking.

use std::sync::Arc;

use serde_json::{json, Value};

use tribridge_core::error::{Result, RpcError};
use tribridge_core::native::{self, NativeKind};
use tribridge_core::protocol::{codec, Target};
use tribridge_core::{Channel, Envelope, Environment, PlayerId};

use crate::config::RpcConfig;
use crate::context::base::ContextBase;
use crate::dispatch::{Handler, HandlerRegistry, PendingCalls};
use crate::host::{CommandCallback, NativeCallback, NativeHost};
use crate::routing::{route, Action};
use crate::transport::ServerOutbound;

pub struct ServerRpc {
    base: ContextBase,
    client_handlers: HandlerRegistry,
    client_pending: PendingCalls,
    webview_handlers: HandlerRegistry,
    webview_pending: PendingCalls,
    outbound: Arc<dyn ServerOutbound>,
    host: Arc<dyn NativeHost>,
}

impl ServerRpc {
    pub fn new(cfg: &RpcConfig, outbound: Arc<dyn ServerOutbound>, host: Arc<dyn NativeHost>) -> Self {
        Self {
            base: ContextBase::new(Environment::Server, cfg.debug),
            client_handlers: HandlerRegistry::new(),
            client_pending: PendingCalls::new("server->client"),
            webview_handlers: HandlerRegistry::new(),
            webview_pending: PendingCalls::new("server->webview"),
            outbound,
            host,
        }
    }

    /// Receive callback for one inbound channel.
    ///
    /// Protocol errors (`InvalidPayload`, `NoPlayer`, `EventNotRegistered`)
    /// are returned to the caller and no response is sent.
    pub async fn handle_inbound(&self, channel: Channel, raw: &str) -> Result<()> {
        let env = codec::decode(raw)?;
        self.base.accepted(&env);

        let (handlers, pending) = match channel {
            Channel::ListenerClient => (&self.client_handlers, &self.client_pending),
            Channel::ListenerWeb => (&self.webview_handlers, &self.webview_pending),
            Channel::ListenerServer => {
                tracing::debug!(%channel, "server ignores its own outbound channel");
                return Ok(());
            }
        };
        if env.called_from != channel.origin() {
            tracing::debug!(%channel, from = %env.called_from, "origin does not match channel, ignored");
            return Ok(());
        }

        match route(Environment::Server, &env) {
            Action::Dispatch => self.answer(handlers, env).await,
            Action::Resolve => {
                pending.resolve(&env.uuid, env.result());
                Ok(())
            }
            _ => Ok(()),
        }
    }

    async fn answer(&self, handlers: &HandlerRegistry, env: Envelope) -> Result<()> {
        let Some(player) = env.resolved_player() else {
            return Err(RpcError::no_player(&env, None));
        };
        self.base.verify_event(handlers, &env)?;

        let mut args = Vec::with_capacity(1 + env.data.as_ref().map_or(0, Vec::len));
        args.push(json!(player));
        args.extend(env.args());

        let result = handlers.dispatch(&env.event, args).await?;
        let reply = env.reply(Environment::Server, env.called_from, result);
        self.outbound
            .send(Channel::ListenerServer, Target::Player(player), codec::encode(&reply)?)
            .await
    }

    async fn call(
        &self,
        pending: &PendingCalls,
        to: Environment,
        player: PlayerId,
        event: &str,
        args: Vec<Value>,
    ) -> Result<Value> {
        let env = Envelope::call(event, Environment::Server, to, args, Some(player));
        let text = codec::encode(&env)?;

        // register before sending so a fast response cannot miss its waiter
        let waiter = pending.register(env.uuid.clone());
        if let Err(e) = self
            .outbound
            .send(Channel::ListenerServer, Target::Player(player), text)
            .await
        {
            pending.forget(&env.uuid);
            return Err(e);
        }
        waiter.await
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

    /// Call `event` on one client and wait for its reply.
    pub async fn emit_client(&self, player: PlayerId, event: &str, args: Vec<Value>) -> Result<Value> {
        self.base.op("emitClient", event);
        self.call(&self.client_pending, Environment::Client, player, event, args)
            .await
    }

    /// Fire `event` on every client. A broadcast has no single reply, so
    /// nothing is awaited.
    pub async fn emit_client_everyone(&self, event: &str, args: Vec<Value>) -> Result<()> {
        self.base.op("emitClientEveryone", event);
        let env = Envelope::call(
            event,
            Environment::Server,
            Environment::Client,
            args,
            Some(Target::Everyone.as_player()),
        );
        self.outbound
            .send(Channel::ListenerServer, Target::Everyone, codec::encode(&env)?)
            .await
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

    /// Call `event` on the webview of `player` (relayed by its client).
    pub async fn emit_webview(&self, player: PlayerId, event: &str, args: Vec<Value>) -> Result<Value> {
        self.base.op("emitWebview", event);
        self.call(&self.webview_pending, Environment::Webview, player, event, args)
            .await
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

    pub fn on_command(&self, name: &str, callback: CommandCallback, restricted: bool) -> &Self {
        self.base.op("onCommand", name);
        self.host.register_command(name, callback, restricted);
        self
    }

    pub fn on_native_event(&self, event: &str, callback: NativeCallback) -> Result<&Self> {
        native::ensure_known(NativeKind::Server, event)?;
        self.base.op("onNativeEvent", event);
        self.host.on_native(event, callback);
        Ok(self)
    }

    /// Calls still waiting for a reply, across both peer kinds.
    pub fn outstanding(&self) -> usize {
        self.client_pending.len() + self.webview_pending.len()
    }
}

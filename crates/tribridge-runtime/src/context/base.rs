use std::sync::Arc;

use serde_json::Value;

use tribridge_core::error::{Result, RpcError};
use tribridge_core::{Envelope, Environment};

use crate::dispatch::{Handler, HandlerRegistry};

/// State and behavior shared by every adapter: identity, debug logging and
/// the same-context (`self`) registry.
pub struct ContextBase {
    env: Environment,
    debug: bool,
    local: HandlerRegistry,
}

impl ContextBase {
    pub fn new(env: Environment, debug: bool) -> Self {
        tracing::info!(ctx = %env, "rpc context initialized");
        Self {
            env,
            debug,
            local: HandlerRegistry::new(),
        }
    }

    pub fn env(&self) -> Environment {
        self.env
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub(crate) fn accepted(&self, env: &Envelope) {
        if self.debug {
            tracing::debug!(
                ctx = %self.env,
                kind = %env.kind,
                event = %env.event,
                from = %env.called_from,
                uuid = %env.uuid,
                "accepted"
            );
        }
    }

    pub(crate) fn op(&self, op: &'static str, event: &str) {
        if self.debug {
            tracing::debug!(ctx = %self.env, op, event, "rpc op");
        }
    }

    /// Raise `EventNotRegistered` unless `registry` can serve `env.event`.
    pub(crate) fn verify_event(&self, registry: &HandlerRegistry, env: &Envelope) -> Result<()> {
        if registry.has(&env.event) {
            Ok(())
        } else {
            Err(RpcError::event_not_registered(env, None))
        }
    }

    pub(crate) fn on_self(&self, event: &str, handler: Arc<dyn Handler>) {
        self.op("onSelf", event);
        self.local.register(event, handler);
    }

    pub(crate) fn off_self(&self, event: &str) {
        self.op("offSelf", event);
        self.local.unregister(event);
    }

    /// Same-context call: dispatched in-process, never touches a transport.
    pub(crate) async fn emit_self(&self, event: &str, args: Vec<Value>) -> Result<Value> {
        let env = Envelope::call(event, self.env, self.env, args, None);
        self.accepted(&env);
        self.verify_event(&self.local, &env)?;
        self.local.dispatch(&env.event, env.args()).await
    }
}

//! Context factory.
//!
//! One entry point builds whichever adapter the config names, so a host
//! program can be written once and pick its side at startup.

use std::sync::Arc;

use tribridge_core::error::{Result, RpcError};
use tribridge_core::Environment;

use crate::config::RpcConfig;
use crate::context::{ClientRpc, ServerRpc, WebviewRpc};
use crate::host::NativeHost;
use crate::transport::{BridgeRequest, ClientOutbound, ServerOutbound, WebviewPush};

/// Transport and host pieces for one context kind.
pub enum ContextParts {
    Server {
        outbound: Arc<dyn ServerOutbound>,
        host: Arc<dyn NativeHost>,
    },
    Client {
        outbound: Arc<dyn ClientOutbound>,
        webview: Arc<dyn WebviewPush>,
        host: Arc<dyn NativeHost>,
    },
    Webview {
        bridge: Arc<dyn BridgeRequest>,
    },
}

impl ContextParts {
    fn env(&self) -> Environment {
        match self {
            ContextParts::Server { .. } => Environment::Server,
            ContextParts::Client { .. } => Environment::Client,
            ContextParts::Webview { .. } => Environment::Webview,
        }
    }
}

#[derive(Clone)]
pub enum RpcInstance {
    Server(Arc<ServerRpc>),
    Client(Arc<ClientRpc>),
    Webview(Arc<WebviewRpc>),
}

impl RpcInstance {
    /// Build the adapter for `cfg.env`.
    ///
    /// Fails with `UnknownEnvironment` for an unrecognized env and with
    /// `Config` when `parts` belong to a different context kind.
    pub fn new(cfg: &RpcConfig, parts: ContextParts) -> Result<Self> {
        cfg.validate()?;
        let env = cfg.environment()?;
        if parts.env() != env {
            return Err(RpcError::Config(format!(
                "config env is {env} but transport parts are for {}",
                parts.env()
            )));
        }

        let instance = match parts {
            ContextParts::Server { outbound, host } => {
                RpcInstance::Server(Arc::new(ServerRpc::new(cfg, outbound, host)))
            }
            ContextParts::Client {
                outbound,
                webview,
                host,
            } => RpcInstance::Client(Arc::new(ClientRpc::new(cfg, outbound, webview, host))),
            ContextParts::Webview { bridge } => {
                RpcInstance::Webview(Arc::new(WebviewRpc::new(cfg, bridge)))
            }
        };
        Ok(instance)
    }

    pub fn env(&self) -> Environment {
        match self {
            RpcInstance::Server(_) => Environment::Server,
            RpcInstance::Client(_) => Environment::Client,
            RpcInstance::Webview(_) => Environment::Webview,
        }
    }

    pub fn server(&self) -> Option<Arc<ServerRpc>> {
        match self {
            RpcInstance::Server(s) => Some(Arc::clone(s)),
            _ => None,
        }
    }

    pub fn client(&self) -> Option<Arc<ClientRpc>> {
        match self {
            RpcInstance::Client(c) => Some(Arc::clone(c)),
            _ => None,
        }
    }

    pub fn webview(&self) -> Option<Arc<WebviewRpc>> {
        match self {
            RpcInstance::Webview(w) => Some(Arc::clone(w)),
            _ => None,
        }
    }
}

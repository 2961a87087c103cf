use std::net::SocketAddr;

use serde::Deserialize;
use tribridge_core::error::{Result, RpcError};
use tribridge_core::Environment;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RpcConfig {
    pub version: u32,

    /// `server`, `client` or `webview`; kept as text so an unknown value
    /// surfaces as `UnknownEnvironment` rather than a generic parse error.
    pub env: String,

    /// Log every accepted envelope and registration.
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub webview: WebviewSection,

    #[serde(default)]
    pub bridge: BridgeSection,
}

impl RpcConfig {
    /// Defaults for one context kind.
    pub fn for_env(env: Environment) -> Self {
        Self {
            version: 1,
            env: env.as_str().to_string(),
            debug: false,
            webview: WebviewSection::default(),
            bridge: BridgeSection::default(),
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn environment(&self) -> Result<Environment> {
        self.env.parse()
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RpcError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.environment()?;

        self.webview.validate()?;
        self.bridge.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebviewSection {
    /// Host resource the webview posts back to.
    #[serde(default = "default_resource_name")]
    pub resource_name: String,
}

impl Default for WebviewSection {
    fn default() -> Self {
        Self {
            resource_name: default_resource_name(),
        }
    }
}

impl WebviewSection {
    pub fn validate(&self) -> Result<()> {
        if self.resource_name.trim().is_empty() {
            return Err(RpcError::Config("webview.resource_name must not be empty".into()));
        }
        if self.resource_name.contains('/') {
            return Err(RpcError::Config("webview.resource_name must not contain '/'".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeSection {
    /// Dev host HTTP bridge address.
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl BridgeSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| RpcError::Config(format!("bridge.listen must be a socket address: {e}")))
    }
}

fn default_resource_name() -> String {
    "nui-frame-app".into()
}
fn default_listen() -> String {
    "127.0.0.1:13172".into()
}

//! tribridge runtime.
//!
//! Context adapters (server, client, webview) over pluggable transports,
//! the in-process loopback mesh, the HTTP webview bridge and the config
//! loader. Consumed by the dev host binary (`main.rs`) and integration tests.

pub mod config;
pub mod context;
pub mod deadline;
pub mod dispatch;
pub mod factory;
pub mod host;
pub mod router;
pub mod routing;
pub mod services;
pub mod transport;
pub mod typed;

pub use context::{ClientRpc, ServerRpc, WebviewRpc};
pub use factory::{ContextParts, RpcInstance};

//! Built-in handlers registered by the dev host.
//!
//! - `ping`: answers `"pong"` with the caller's player id, for clients and webviews
//! - `echo`: replies with its arguments as an array
//! - `rpc:status`: local self-call reporting outstanding calls

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use tribridge_core::error::Result;

use crate::context::{ClientRpc, ServerRpc};
use crate::dispatch::sync_fn;
use crate::typed::{self, RpcEvent};

pub struct Ping;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pong {
    pub reply: String,
    pub player: i64,
}

impl RpcEvent for Ping {
    const NAME: &'static str = "ping";
    type Args = ();
    type Reply = Pong;
}

fn echo(args: Vec<Value>) -> Result<Value> {
    Ok(Value::Array(args))
}

pub fn register_server(server: &Arc<ServerRpc>) {
    let ping = || {
        typed::player_handler::<Ping, _, _>(|player, ()| async move {
            Ok(Pong {
                reply: "pong".into(),
                player,
            })
        })
    };
    server
        .on_client(Ping::NAME, ping())
        .on_webview(Ping::NAME, ping())
        .on_client("echo", sync_fn(echo))
        .on_webview("echo", sync_fn(echo));

    let status = Arc::downgrade(server);
    server.on_self(
        "rpc:status",
        sync_fn(move |_| {
            let outstanding = status.upgrade().map_or(0, |s| s.outstanding());
            Ok(json!({ "ctx": "server", "outstanding": outstanding }))
        }),
    );
    tracing::info!("server built-ins registered");
}

pub fn register_client(client: &Arc<ClientRpc>) {
    client.on_webview("echo", sync_fn(echo));

    let status = Arc::downgrade(client);
    client.on_self(
        "rpc:status",
        sync_fn(move |_| {
            let outstanding = status.upgrade().map_or(0, |c| c.outstanding());
            Ok(json!({ "ctx": "client", "outstanding": outstanding }))
        }),
    );
    tracing::info!("client built-ins registered");
}

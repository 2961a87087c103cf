#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;

use serde_json::json;

use common::{NullHost, RecordingBridge, RecordingClient, RecordingPush, RecordingServer};
use tribridge_core::error::{ErrorCode, RpcError};
use tribridge_core::Environment;
use tribridge_runtime::config::{self, RpcConfig};
use tribridge_runtime::{ContextParts, RpcInstance};

fn server_parts() -> ContextParts {
    ContextParts::Server {
        outbound: Arc::new(RecordingServer::default()),
        host: Arc::new(NullHost),
    }
}

#[test]
fn builds_the_configured_context() {
    let inst = RpcInstance::new(&RpcConfig::for_env(Environment::Server), server_parts()).unwrap();
    assert_eq!(inst.env(), Environment::Server);
    assert!(inst.server().is_some());
    assert!(inst.client().is_none());

    let inst = RpcInstance::new(
        &RpcConfig::for_env(Environment::Client),
        ContextParts::Client {
            outbound: Arc::new(RecordingClient::new(1)),
            webview: Arc::new(RecordingPush::default()),
            host: Arc::new(NullHost),
        },
    )
    .unwrap();
    assert!(inst.client().is_some());
}

#[test]
fn unknown_env_is_rejected() {
    let cfg = RpcConfig {
        env: "toaster".into(),
        ..RpcConfig::for_env(Environment::Server)
    };
    let err = RpcInstance::new(&cfg, server_parts()).err().unwrap();
    assert!(matches!(err, RpcError::UnknownEnvironment(_)));
    assert_eq!(err.code(), ErrorCode::UnknownEnvironment);
}

#[test]
fn parts_must_match_env() {
    let err = RpcInstance::new(&RpcConfig::for_env(Environment::Webview), server_parts())
        .err()
        .unwrap();
    assert!(matches!(err, RpcError::Config(_)));
}

#[tokio::test]
async fn webview_posts_to_resource_bridge_url() {
    let cfg = config::load_from_str(
        r#"
version: 1
env: webview
webview:
  resource_name: "my-ui"
"#,
    )
    .unwrap();
    let bridge = Arc::new(RecordingBridge::new(json!({ "ok": 1 })));
    let inst = RpcInstance::new(&cfg, ContextParts::Webview { bridge: bridge.clone() }).unwrap();
    let webview = inst.webview().unwrap();

    assert_eq!(webview.url(), "https://my-ui/__rpc:listenerWeb");
    let v = webview.emit_server("buy", vec![json!("apple")]).await.unwrap();
    assert_eq!(v, json!({ "ok": 1 }));

    let (url, env) = bridge.envelopes().remove(0);
    assert_eq!(url, "https://my-ui/__rpc:listenerWeb");
    assert_eq!(env.called_from, Environment::Webview);
    assert_eq!(env.called_to, Environment::Server);
    assert_eq!(env.player, None);
}

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use tribridge_core::error::{ErrorCode, RpcError};
use tribridge_runtime::transport::loopback::LoopbackMesh;

#[tokio::test]
async fn unknown_native_event_is_rejected_before_the_host() {
    let mesh = LoopbackMesh::new(false);
    let err = mesh
        .server()
        .on_native_event("madeUpEvent", Arc::new(|_: Vec<Value>| {}))
        .err()
        .unwrap();
    assert!(matches!(err, RpcError::UnknownNative(ref n) if n == "madeUpEvent"));
    assert_eq!(err.code(), ErrorCode::UnknownNative);
    assert!(!mesh.server_host().has_native("madeUpEvent"));
}

#[tokio::test]
async fn server_native_event_is_forwarded() {
    let mesh = LoopbackMesh::new(false);
    let got = Arc::new(Mutex::new(Vec::new()));
    let g = got.clone();
    mesh.server()
        .on_native_event("playerConnecting", Arc::new(move |args: Vec<Value>| g.lock().unwrap().extend(args)))
        .unwrap();

    assert!(mesh.server_host().fire("playerConnecting", vec![json!("bob")]));
    assert_eq!(*got.lock().unwrap(), vec![json!("bob")]);
}

#[tokio::test]
async fn client_lists_are_separate() {
    let mesh = LoopbackMesh::new(false);
    let peer = mesh.connect(1).unwrap();

    peer.client.on_native_event("onClientResourceStart", Arc::new(|_: Vec<Value>| {})).unwrap();
    assert!(peer.host.has_native("onClientResourceStart"));

    // a server-only name is not a client native
    assert!(peer.client.on_native_event("playerConnecting", Arc::new(|_: Vec<Value>| {})).is_err());

    peer.client
        .on_native_network_event("CEventAcquaintancePedDead", Arc::new(|_: Vec<Value>| {}))
        .unwrap();
    assert!(peer.host.has_native("CEventAcquaintancePedDead"));
    assert!(peer.client.on_native_network_event("CEventMadeUp", Arc::new(|_: Vec<Value>| {})).is_err());
}

#[tokio::test]
async fn commands_keep_restriction_flag() {
    let mesh = LoopbackMesh::new(false);
    let runs = Arc::new(AtomicUsize::new(0));
    let r = runs.clone();
    mesh.server().on_command(
        "kick",
        Arc::new(move |player: i64, args: Vec<String>, raw: String| {
            assert_eq!(player, 3);
            assert_eq!(args, vec!["bob".to_string()]);
            assert_eq!(raw, "kick bob");
            r.fetch_add(1, Ordering::SeqCst);
        }),
        true,
    );
    assert_eq!(mesh.server_host().is_restricted("kick"), Some(true));
    assert!(mesh.server_host().run_command("kick", 3, vec!["bob".into()]));
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    let peer = mesh.connect(3).unwrap();
    peer.client.on_command("hud", Arc::new(|_: i64, _: Vec<String>, _: String| {}));
    assert_eq!(peer.host.is_restricted("hud"), Some(false));
    assert!(!peer.host.run_command("nope", 3, vec![]));
}

#[tokio::test]
async fn webview_focus_reaches_host() {
    let mesh = LoopbackMesh::new(false);
    let peer = mesh.connect(1).unwrap();
    peer.client.set_webview_focus(true, false);
    assert_eq!(peer.host.focus(), (true, false));
}

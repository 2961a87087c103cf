#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;

use serde_json::json;

use common::{raw, wait_until, NullHost, RecordingClient, RecordingPush};
use tribridge_core::error::{ErrorCode, RpcError};
use tribridge_core::protocol::codec;
use tribridge_core::{Channel, Envelope, EnvelopeKind, Environment};
use tribridge_runtime::config::RpcConfig;
use tribridge_runtime::dispatch::sync_fn;
use tribridge_runtime::ClientRpc;

const SERVER_ID: i64 = 12;

fn client_with(out: RecordingClient) -> (Arc<ClientRpc>, Arc<RecordingClient>, Arc<RecordingPush>) {
    let out = Arc::new(out);
    let push = Arc::new(RecordingPush::default());
    let client = ClientRpc::new(
        &RpcConfig::for_env(Environment::Client),
        out.clone(),
        push.clone(),
        Arc::new(NullHost),
    );
    (Arc::new(client), out, push)
}

fn client() -> (Arc<ClientRpc>, Arc<RecordingClient>, Arc<RecordingPush>) {
    client_with(RecordingClient::new(SERVER_ID))
}

fn webview_call(event: &str, to: Environment) -> Envelope {
    Envelope::call(event, Environment::Webview, to, vec![json!("x")], None)
}

#[tokio::test]
async fn emit_server_sends_on_client_channel_and_resolves() {
    let (client, out, _push) = client();

    let call = tokio::spawn({
        let client = client.clone();
        async move { client.emit_server("getBalance", vec![]).await }
    });
    wait_until(|| out.len() == 1).await;

    let (channel, env) = out.envelopes().remove(0);
    assert_eq!(channel, Channel::ListenerClient);
    assert_eq!(env.player, Some(SERVER_ID));
    assert_eq!(env.data, None);

    let reply = env.reply(Environment::Server, Environment::Client, json!(100));
    client.handle_server(&codec::encode(&reply).unwrap()).await.unwrap();

    assert_eq!(call.await.unwrap().unwrap(), json!(100));
    assert_eq!(client.outstanding(), 0);
}

#[tokio::test]
async fn failed_send_leaves_no_pending_entry() {
    let (client, _out, _push) = client_with(RecordingClient::failing(SERVER_ID));
    let err = client.emit_server("getBalance", vec![]).await.unwrap_err();
    assert!(matches!(err, RpcError::Transport(_)));
    assert_eq!(client.outstanding(), 0);
}

#[tokio::test]
async fn answers_server_call_on_client_channel() {
    let (client, out, _push) = client();
    client.on_server("getPos", sync_fn(|args| Ok(json!({ "args": args }))));

    let call = Envelope::call("getPos", Environment::Server, Environment::Client, vec![json!(1)], Some(SERVER_ID));
    client.handle_server(&codec::encode(&call).unwrap()).await.unwrap();

    let (channel, reply) = out.envelopes().remove(0);
    assert_eq!(channel, Channel::ListenerClient);
    assert_eq!(reply.uuid, call.uuid);
    assert_eq!(reply.kind, EnvelopeKind::Response);
    assert_eq!(reply.called_to, Environment::Server);
    assert_eq!(reply.result(), json!({ "args": [1] }));
}

#[tokio::test]
async fn unknown_server_event_sends_no_reply() {
    let (client, out, _push) = client();
    let call = Envelope::call("nope", Environment::Server, Environment::Client, vec![], Some(SERVER_ID));
    let err = client.handle_server(&codec::encode(&call).unwrap()).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::EventNotRegistered);
    assert_eq!(out.len(), 0);
}

#[tokio::test]
async fn server_call_for_webview_is_pushed_untouched() {
    let (client, out, push) = client();
    let call = Envelope::call("showMenu", Environment::Server, Environment::Webview, vec![json!(3)], Some(SERVER_ID));
    client.handle_server(&codec::encode(&call).unwrap()).await.unwrap();

    let msgs = push.messages();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].origin, Channel::ListenerServer);
    assert_eq!(msgs[0].data, call);
    assert_eq!(out.len(), 0);
}

#[tokio::test]
async fn webview_call_to_server_is_relayed_with_player() {
    let (client, out, _push) = client();
    let original = webview_call("buy", Environment::Server);

    let relayed = tokio::spawn({
        let client = client.clone();
        let call = original.clone();
        async move { client.handle_webview(call).await }
    });
    wait_until(|| out.len() == 1).await;

    let (channel, env) = out.envelopes().remove(0);
    assert_eq!(channel, Channel::ListenerWeb);
    assert_eq!(env.player, Some(SERVER_ID));
    assert_eq!(env.uuid, original.uuid);
    assert_eq!(env.event, original.event);
    assert_eq!(env.data, original.data);
    assert_eq!(env.called_from, original.called_from);
    assert_eq!(env.called_to, original.called_to);
    assert_eq!(env.kind, original.kind);
    // nothing but the player differs
    assert_eq!(Envelope { player: original.player, ..env.clone() }, original);

    // the server answers the webview, not the client
    let reply = env.reply(Environment::Server, Environment::Webview, json!("bought"));
    client.handle_server(&codec::encode(&reply).unwrap()).await.unwrap();

    assert_eq!(relayed.await.unwrap().unwrap(), json!("bought"));
    assert_eq!(client.outstanding(), 0);
}

#[tokio::test]
async fn relayed_reply_does_not_complete_client_calls() {
    let (client, out, _push) = client();

    let own = tokio::spawn({
        let client = client.clone();
        async move { client.emit_server("getBalance", vec![]).await }
    });
    wait_until(|| out.len() == 1).await;
    let (_, env) = out.envelopes().remove(0);

    // same uuid, but addressed to the webview: must not resolve the client's call
    let stray = env.reply(Environment::Server, Environment::Webview, json!("wrong"));
    client.handle_server(&codec::encode(&stray).unwrap()).await.unwrap();
    assert_eq!(client.outstanding(), 1);

    let reply = env.reply(Environment::Server, Environment::Client, json!(100));
    client.handle_server(&codec::encode(&reply).unwrap()).await.unwrap();
    assert_eq!(own.await.unwrap().unwrap(), json!(100));
}

#[tokio::test]
async fn webview_response_is_forwarded_to_server() {
    let (client, out, _push) = client();
    let call = Envelope::call("showMenu", Environment::Server, Environment::Webview, vec![], Some(SERVER_ID));
    let reply = call.reply(Environment::Webview, Environment::Server, json!(true));

    let body = client.handle_webview(reply).await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));

    let (channel, fwd) = out.envelopes().remove(0);
    assert_eq!(channel, Channel::ListenerWeb);
    assert_eq!(fwd.uuid, call.uuid);
    assert_eq!(fwd.player, Some(SERVER_ID));
}

#[tokio::test]
async fn webview_call_to_client_returns_handler_value() {
    let (client, out, _push) = client();
    client.on_webview("close", sync_fn(|args| Ok(json!(args.len()))));

    let body = client
        .handle_webview(webview_call("close", Environment::Client))
        .await
        .unwrap();
    assert_eq!(body, json!(1));
    assert_eq!(out.len(), 0);

    let err = client
        .handle_webview(webview_call("open", Environment::Client))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::EventNotRegistered);
}

#[tokio::test]
async fn emit_webview_pushes_and_resolves_from_bridge() {
    let (client, _out, push) = client();

    let call = tokio::spawn({
        let client = client.clone();
        async move { client.emit_webview("getInput", vec![json!("name")]).await }
    });
    wait_until(|| push.len() == 1).await;

    let msg = push.messages().remove(0);
    assert_eq!(msg.origin, Channel::ListenerClient);
    assert_eq!(msg.data.player, Some(0));

    let reply = msg.data.reply(Environment::Webview, Environment::Client, json!("bob"));
    let body = client.handle_webview(reply).await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
    assert_eq!(call.await.unwrap().unwrap(), json!("bob"));
}

#[tokio::test]
async fn non_webview_bridge_traffic_is_unknown() {
    let (client, out, _push) = client();
    let env = Envelope::call("x", Environment::Client, Environment::Server, vec![], None);
    assert_eq!(client.handle_webview(env).await.unwrap(), json!({ "status": "unknown" }));

    let raw_env: Envelope = serde_json::from_str(&raw(json!({
        "event": "x", "uuid": "u", "calledFrom": "webview", "calledTo": "webview", "type": "event"
    })))
    .unwrap();
    assert_eq!(client.handle_webview(raw_env).await.unwrap(), json!({ "status": "unknown" }));
    assert_eq!(out.len(), 0);
}

//! Axum router wiring for the webview bridge.
//!
//! The webview posts envelopes to `https://{resource}/__rpc:listenerWeb`; the
//! dev host serves the same path so a browser-hosted webview can talk to an
//! in-process client.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use tribridge_core::error::RpcError;
use tribridge_core::protocol::codec;
use tribridge_core::Channel;

use crate::context::ClientRpc;

pub fn build_router(client: Arc<ClientRpc>) -> Router {
    Router::new()
        .route("/:channel", post(bridge_call))
        .with_state(client)
}

async fn bridge_call(
    State(client): State<Arc<ClientRpc>>,
    Path(channel): Path<String>,
    body: String,
) -> Response {
    if Channel::parse(&channel) != Some(Channel::ListenerWeb) {
        return (StatusCode::NOT_FOUND, format!("unknown channel: {channel}")).into_response();
    }

    let env = match codec::decode(&body) {
        Ok(env) => env,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    match client.handle_webview(env).await {
        Ok(value) => Json(value).into_response(),
        Err(e @ RpcError::InvalidPayload(_)) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "bridge call failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

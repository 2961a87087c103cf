//! Typed events on top of the JSON argument lists.
//!
//! An [`RpcEvent`] ties an event name to its argument and reply types. Tuples
//! map onto positional arguments, `()` onto an empty list and any other
//! type onto a single argument.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use tribridge_core::error::{Result, RpcError};
use tribridge_core::PlayerId;

use crate::dispatch::{handler_fn, Handler};

pub trait RpcEvent {
    const NAME: &'static str;
    type Args: Serialize + DeserializeOwned + Send + 'static;
    type Reply: Serialize + DeserializeOwned + Send + 'static;
}

pub fn to_args<A: Serialize>(args: &A) -> Result<Vec<Value>> {
    let v = serde_json::to_value(args).map_err(|e| RpcError::Args(e.to_string()))?;
    Ok(match v {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        other => vec![other],
    })
}

pub fn from_args<A: DeserializeOwned>(args: Vec<Value>) -> Result<A> {
    if args.is_empty() {
        return serde_json::from_value(Value::Null)
            .or_else(|_| serde_json::from_value(Value::Array(Vec::new())))
            .map_err(|e| RpcError::Args(e.to_string()));
    }

    // a lone argument is the whole payload; the list form is the fallback
    if let [only] = args.as_slice() {
        if let Ok(a) = serde_json::from_value(only.clone()) {
            return Ok(a);
        }
    }
    serde_json::from_value(Value::Array(args)).map_err(|e| RpcError::Args(e.to_string()))
}

pub fn from_reply<R: DeserializeOwned>(value: Value) -> Result<R> {
    serde_json::from_value(value).map_err(|e| RpcError::Args(format!("reply: {e}")))
}

fn to_reply<R: Serialize>(reply: &R) -> Result<Value> {
    serde_json::to_value(reply).map_err(|e| RpcError::Args(format!("reply: {e}")))
}

/// Handler for `E` that decodes its arguments and encodes its reply.
pub fn handler<E, F, Fut>(f: F) -> Arc<dyn Handler>
where
    E: RpcEvent + 'static,
    F: Fn(E::Args) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<E::Reply>> + Send + 'static,
{
    let f = Arc::new(f);
    handler_fn(move |args| {
        let f = Arc::clone(&f);
        async move {
            let args = from_args::<E::Args>(args)?;
            let reply = f(args).await?;
            to_reply(&reply)
        }
    })
}

/// Server-side variant: splits off the caller's player id first.
pub fn player_handler<E, F, Fut>(f: F) -> Arc<dyn Handler>
where
    E: RpcEvent + 'static,
    F: Fn(PlayerId, E::Args) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<E::Reply>> + Send + 'static,
{
    let f = Arc::new(f);
    handler_fn(move |mut args: Vec<Value>| {
        let f = Arc::clone(&f);
        async move {
            if args.is_empty() {
                return Err(RpcError::Args("missing player id".into()));
            }
            let player = args
                .remove(0)
                .as_i64()
                .ok_or_else(|| RpcError::Args("player id is not an integer".into()))?;
            let args = from_args::<E::Args>(args)?;
            let reply = f(player, args).await?;
            to_reply(&reply)
        }
    })
}

/// Issue a typed call through any `emit_*` method.
///
/// ```ignore
/// let balance = typed::call::<GetBalance, _, _>(&(), |e, a| client.emit_server(e, a)).await?;
/// ```
pub async fn call<E, F, Fut>(args: &E::Args, emit: F) -> Result<E::Reply>
where
    E: RpcEvent + 'static,
    F: FnOnce(&'static str, Vec<Value>) -> Fut,
    Fut: Future<Output = Result<Value>>,
{
    let value = emit(E::NAME, to_args(args)?).await?;
    from_reply(value)
}

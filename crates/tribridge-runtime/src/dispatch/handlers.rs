use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::future::{self, Ready};
use serde_json::Value;

use tribridge_core::error::{Result, RpcError};

/// Handler for one event name. Receives the call's argument list (with the
/// caller's player id prepended on the server) and returns the reply value.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, args: Vec<Value>) -> Result<Value>;
}

/// Adapter turning an async closure into a [`Handler`].
pub struct FnHandler<F, Fut> {
    f: F,
    _fut: PhantomData<fn() -> Fut>,
}

#[async_trait]
impl<F, Fut> Handler for FnHandler<F, Fut>
where
    F: Fn(Vec<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value>> + Send,
{
    async fn call(&self, args: Vec<Value>) -> Result<Value> {
        (self.f)(args).await
    }
}

/// Wrap an async closure as a shareable handler.
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn Handler>
where
    F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(FnHandler {
        f,
        _fut: PhantomData,
    })
}

/// Wrap a synchronous closure; dispatch still hands back a future.
pub fn sync_fn<F>(f: F) -> Arc<dyn Handler>
where
    F: Fn(Vec<Value>) -> Result<Value> + Send + Sync + 'static,
{
    handler_fn(move |args| -> Ready<Result<Value>> { future::ready(f(args)) })
}

/// Event name -> handler. At most one handler per name; registering again
/// replaces the previous one.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: DashMap<String, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    pub fn register(&self, event: impl Into<String>, handler: Arc<dyn Handler>) {
        self.handlers.insert(event.into(), handler);
    }

    pub fn unregister(&self, event: &str) {
        self.handlers.remove(event);
    }

    pub fn has(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    pub fn registered(&self) -> Vec<String> {
        self.handlers.iter().map(|e| e.key().clone()).collect()
    }

    /// Run the handler for `event`.
    ///
    /// Callers are expected to check [`has`](Self::has) first and raise a
    /// protocol error with a full diagnostic; this only reports the bare name.
    pub async fn dispatch(&self, event: &str, args: Vec<Value>) -> Result<Value> {
        // clone out of the map so no shard lock is held across the await
        let handler = self
            .handlers
            .get(event)
            .map(|h| Arc::clone(h.value()))
            .ok_or_else(|| RpcError::UnknownEvent(event.to_string()))?;
        handler.call(args).await
    }
}

//! Dispatch registries.
//!
//! - `handlers`: event name -> handler, replace-on-register.
//! - `pending`: correlation id -> one-shot resolver for outgoing calls.

pub mod handlers;
pub mod pending;

pub use handlers::{handler_fn, sync_fn, Handler, HandlerRegistry};
pub use pending::{PendingCall, PendingCalls};

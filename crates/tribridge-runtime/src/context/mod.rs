//! Context adapters: one per execution context kind.
//!
//! Each adapter owns one handler registry per peer kind it can be called by,
//! one pending registry per peer kind it can call, and a `self` registry for
//! in-process calls. Construct exactly one adapter per process and pass it to
//! consumers explicitly.

mod base;
pub mod client;
pub mod server;
pub mod webview;

pub use base::ContextBase;
pub use client::ClientRpc;
pub use server::ServerRpc;
pub use webview::WebviewRpc;

//! tribridge core: transport-agnostic protocol primitives, error types, and
//! the native event allow-lists.
//!
//! This crate defines the wire envelope exchanged between the server, client
//! and webview contexts together with the error surface shared by the runtime
//! and its transports. It carries no runtime dependencies so the same types
//! can be reused by any transport implementation.
//!
//! # Guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed wire text surfaces as `RpcError::InvalidPayload` instead of
//! taking the receiving context down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod native;
pub mod protocol;

pub use error::{Diagnostic, ErrorCode, Result, RpcError};
pub use protocol::{Channel, Envelope, EnvelopeKind, Environment, PlayerId, WebMessage};

//! Protocol modules (envelope, codec, channel names).
//!
//! Every context exchanges the same JSON envelope over one-way transports:
//! - `envelope`: the correlation unit (`event`/`response` with a uuid).
//! - `codec`: text encode/decode, the only place wire text is parsed.
//! - `channel`: fixed logical channel names and the webview push frame.
//!
//! Decoding is panic-free: malformed input is reported as `RpcError` so a bad
//! frame never takes the receiving context down.

pub mod channel;
pub mod codec;
pub mod envelope;

pub use channel::{Channel, WebMessage};
pub use envelope::{Envelope, EnvelopeKind, Environment, PlayerId, Target, BROADCAST};

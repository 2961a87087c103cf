//! Wire envelope (JSON).
//!
//! One envelope type serves both directions: a call (`type = "event"`) and
//! the single reply it produces (`type = "response"`), correlated by `uuid`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RpcError;

/// Peer-connection id as understood by the host platform.
pub type PlayerId = i64;

/// Wire value of `player` meaning "every connected client".
pub const BROADCAST: PlayerId = -1;

/// Execution context kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Server,
    Client,
    Webview,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Server => "server",
            Environment::Client => "client",
            Environment::Webview => "webview",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = RpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "server" => Ok(Environment::Server),
            "client" => Ok(Environment::Client),
            "webview" => Ok(Environment::Webview),
            other => Err(RpcError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// Call or reply (field name is `type` in JSON).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeKind {
    Event,
    Response,
}

impl fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeKind::Event => f.write_str("event"),
            EnvelopeKind::Response => f.write_str("response"),
        }
    }
}

/// Addressing for server-originated traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Player(PlayerId),
    Everyone,
}

impl Target {
    /// Value carried in the envelope's `player` field.
    pub fn as_player(self) -> PlayerId {
        match self {
            Target::Player(id) => id,
            Target::Everyone => BROADCAST,
        }
    }
}

/// Envelope exchanged between contexts.
///
/// Every field is always present on the wire; absent values travel as
/// `null` so the text form round-trips exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Logical event name, opaque to the runtime.
    pub event: String,
    /// Correlation id, generated per call and echoed by its response.
    pub uuid: String,
    /// Origin context kind.
    pub called_from: Environment,
    /// Destination context kind.
    pub called_to: Environment,
    /// Set when the call could not be dispatched.
    pub error: Option<String>,
    /// Call arguments, or the single-element result of a response.
    pub data: Option<Vec<Value>>,
    /// Target/originating peer-connection id (`-1` = broadcast).
    pub player: Option<PlayerId>,
    /// Message type (field name is `type` in JSON).
    #[serde(rename = "type")]
    pub kind: EnvelopeKind,
}

impl Envelope {
    /// Build a call envelope with a fresh correlation id.
    ///
    /// An empty argument list is sent as `data: null`.
    pub fn call(
        event: impl Into<String>,
        from: Environment,
        to: Environment,
        args: Vec<Value>,
        player: Option<PlayerId>,
    ) -> Self {
        Self {
            event: event.into(),
            uuid: new_uuid(),
            called_from: from,
            called_to: to,
            error: None,
            data: if args.is_empty() { None } else { Some(args) },
            player,
            kind: EnvelopeKind::Event,
        }
    }

    /// Build the reply to `self`, carrying `result` as a one-element list.
    ///
    /// The reply keeps the call's event, uuid and player; `from`/`to` are the
    /// replying context and the caller's kind.
    pub fn reply(&self, from: Environment, to: Environment, result: Value) -> Self {
        Self {
            event: self.event.clone(),
            uuid: self.uuid.clone(),
            called_from: from,
            called_to: to,
            error: None,
            data: Some(vec![result]),
            player: self.player,
            kind: EnvelopeKind::Response,
        }
    }

    /// Call arguments with `null` normalized to an empty list.
    pub fn args(&self) -> Vec<Value> {
        self.data.clone().unwrap_or_default()
    }

    /// First data element of a response (`null` when absent).
    pub fn result(&self) -> Value {
        self.data
            .as_ref()
            .and_then(|d| d.first().cloned())
            .unwrap_or(Value::Null)
    }

    pub fn is_call(&self) -> bool {
        self.kind == EnvelopeKind::Event
    }

    /// `player` holds a concrete peer (not absent, not broadcast).
    pub fn resolved_player(&self) -> Option<PlayerId> {
        self.player.filter(|p| *p != BROADCAST)
    }
}

/// RFC 4122 v4 correlation id.
pub fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

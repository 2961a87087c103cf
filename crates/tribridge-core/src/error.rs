//! Shared error type across tribridge crates.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::protocol::Envelope;

/// Stable error codes. `message()` is the text written into `Envelope.error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Inbound call names an event with no registered handler.
    EventNotRegistered,
    /// Wire text is not a well-formed envelope.
    InvalidData,
    /// Server-bound call without a resolvable peer.
    NoPlayer,
    /// Native event or command outside the allow-list.
    UnknownNative,
    /// Configuration names an unknown context kind.
    UnknownEnvironment,
    /// Anything raised by handlers, transports or the runtime itself.
    Internal,
}

impl ErrorCode {
    /// Human readable message, identical across every context.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::EventNotRegistered => "Event not registered",
            ErrorCode::InvalidData => "Invalid data (possibly broken JSON)",
            ErrorCode::NoPlayer => "No player (failed to resolve from local index)",
            ErrorCode::UnknownNative => {
                "Unknown native event (if you are sure this exists - use native handler)"
            }
            ErrorCode::UnknownEnvironment => {
                "Unknown environment (must be either \"server\", \"client\" or \"webview\")"
            }
            ErrorCode::Internal => "Internal error",
        }
    }
}

/// Protocol failure report: the offending envelope plus optional context.
///
/// Rendered as one line per envelope field so the failing call can be traced
/// back to its origin from a log line alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub envelope: Envelope,
    pub info: Option<String>,
}

impl Diagnostic {
    /// Stamp `code` into the envelope's `error` field and wrap it.
    pub fn new(code: ErrorCode, mut envelope: Envelope, info: Option<String>) -> Self {
        envelope.error = Some(code.message().to_string());
        Self { envelope, info }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env = &self.envelope;
        let player = env
            .player
            .map(|p| p.to_string())
            .unwrap_or_else(|| "null".into());
        let data = env
            .data
            .as_ref()
            .map(|d| serde_json::Value::Array(d.clone()).to_string())
            .unwrap_or_else(|| "null".into());

        write!(f, "{}", env.error.as_deref().unwrap_or("null"))?;
        write!(f, "\n | Event: {}", env.event)?;
        write!(f, "\n | Uuid: {}", env.uuid)?;
        write!(f, "\n | From: {}", env.called_from)?;
        write!(f, "\n | To: {}", env.called_to)?;
        write!(f, "\n | Player: {player}")?;
        write!(f, "\n | Type: {}", env.kind)?;
        write!(f, "\n | Data: {data}")?;
        if let Some(info) = &self.info {
            write!(f, "\n | Info: {info}")?;
        }
        Ok(())
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RpcError>;

/// Unified error type used by core and runtime.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid data (possibly broken JSON): {0}")]
    InvalidPayload(String),
    #[error("{0}")]
    EventNotRegistered(Box<Diagnostic>),
    #[error("event not registered: {0}")]
    UnknownEvent(String),
    #[error("{0}")]
    NoPlayer(Box<Diagnostic>),
    #[error("unknown native event: {0}")]
    UnknownNative(String),
    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),
    #[error("handler failed: {0}")]
    Handler(String),
    #[error("argument conversion failed: {0}")]
    Args(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("call abandoned before a response arrived: {0}")]
    Abandoned(String),
    #[error("call timed out after {0:?}")]
    Timeout(Duration),
    #[error("config: {0}")]
    Config(String),
}

impl RpcError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            RpcError::InvalidPayload(_) => ErrorCode::InvalidData,
            RpcError::EventNotRegistered(_) | RpcError::UnknownEvent(_) => {
                ErrorCode::EventNotRegistered
            }
            RpcError::NoPlayer(_) => ErrorCode::NoPlayer,
            RpcError::UnknownNative(_) => ErrorCode::UnknownNative,
            RpcError::UnknownEnvironment(_) => ErrorCode::UnknownEnvironment,
            RpcError::Handler(_)
            | RpcError::Args(_)
            | RpcError::Transport(_)
            | RpcError::Abandoned(_)
            | RpcError::Timeout(_)
            | RpcError::Config(_) => ErrorCode::Internal,
        }
    }

    /// The envelope a protocol error was raised for, if any.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            RpcError::EventNotRegistered(d) | RpcError::NoPlayer(d) => Some(d),
            _ => None,
        }
    }

    pub fn handler(err: impl fmt::Display) -> Self {
        RpcError::Handler(err.to_string())
    }

    /// No handler is registered for `env.event`.
    pub fn event_not_registered(env: &Envelope, info: Option<String>) -> Self {
        RpcError::EventNotRegistered(Box::new(Diagnostic::new(
            ErrorCode::EventNotRegistered,
            env.clone(),
            info,
        )))
    }

    /// A server-bound call carries no usable player id.
    pub fn no_player(env: &Envelope, info: Option<String>) -> Self {
        RpcError::NoPlayer(Box::new(Diagnostic::new(
            ErrorCode::NoPlayer,
            env.clone(),
            info,
        )))
    }
}

//! Envelope codec: the only place wire text is produced or parsed.
//!
//! No schema validation happens here beyond what the envelope shape itself
//! requires; routing decisions belong to the runtime.

use crate::error::{Result, RpcError};
use crate::protocol::{Envelope, WebMessage};

/// Encode an envelope to wire text.
pub fn encode(env: &Envelope) -> Result<String> {
    serde_json::to_string(env).map_err(|e| RpcError::InvalidPayload(format!("encode failed: {e}")))
}

/// Decode wire text into an envelope.
pub fn decode(text: &str) -> Result<Envelope> {
    serde_json::from_str(text).map_err(|e| RpcError::InvalidPayload(e.to_string()))
}

/// Encode a client->webview push frame.
pub fn encode_web(msg: &WebMessage) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| RpcError::InvalidPayload(format!("encode failed: {e}")))
}

/// Decode a client->webview push frame.
pub fn decode_web(text: &str) -> Result<WebMessage> {
    serde_json::from_str(text).map_err(|e| RpcError::InvalidPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Channel, EnvelopeKind, Environment};
    use serde_json::json;

    #[test]
    fn nulls_are_written_explicitly() {
        let env = Envelope::call("ping", Environment::Webview, Environment::Client, vec![], None);
        let text = encode(&env).unwrap_or_default();
        assert!(text.contains("\"data\":null"));
        assert!(text.contains("\"player\":null"));
        assert!(text.contains("\"error\":null"));
        assert!(text.contains("\"calledFrom\":\"webview\""));
        assert!(text.contains("\"type\":\"event\""));
    }

    #[test]
    fn nested_arguments_survive() {
        let env = Envelope::call(
            "save",
            Environment::Client,
            Environment::Server,
            vec![json!({"a": [1, 2.5, {"b": null}]}), json!("x"), json!(true)],
            Some(4),
        );
        let back = encode(&env).and_then(|t| decode(&t));
        assert!(matches!(back, Ok(ref e) if *e == env));
    }

    #[test]
    fn broken_json_is_invalid_payload() {
        assert!(matches!(decode("{\"event\":"), Err(RpcError::InvalidPayload(_))));
        assert!(matches!(decode("[]"), Err(RpcError::InvalidPayload(_))));
    }

    #[test]
    fn web_frame_carries_origin() {
        let env = Envelope::call("open", Environment::Server, Environment::Webview, vec![], Some(1));
        let msg = WebMessage {
            origin: Channel::ListenerServer,
            data: env,
        };
        let text = encode_web(&msg).unwrap_or_default();
        assert!(text.contains("\"origin\":\"__rpc:listenerServer\""));
        let back = decode_web(&text);
        assert!(matches!(back, Ok(ref m) if m.data.kind == EnvelopeKind::Event));
    }
}

//! Fixed logical channel names and the webview push frame.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::protocol::{Envelope, Environment};

/// Logical channel names carried by the host transports.
///
/// - `ListenerServer`: everything the server sends to a client (the client
///   tells client- and webview-bound traffic apart by `calledTo`).
/// - `ListenerClient`: client-originated traffic to the server.
/// - `ListenerWeb`: webview-originated traffic relayed to the server, and the
///   bridge endpoint the webview posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "__rpc:listenerServer")]
    ListenerServer,
    #[serde(rename = "__rpc:listenerClient")]
    ListenerClient,
    #[serde(rename = "__rpc:listenerWeb")]
    ListenerWeb,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::ListenerServer => "__rpc:listenerServer",
            Channel::ListenerClient => "__rpc:listenerClient",
            Channel::ListenerWeb => "__rpc:listenerWeb",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "__rpc:listenerServer" => Some(Channel::ListenerServer),
            "__rpc:listenerClient" => Some(Channel::ListenerClient),
            "__rpc:listenerWeb" => Some(Channel::ListenerWeb),
            _ => None,
        }
    }

    /// Context kind whose traffic this channel carries.
    pub fn origin(self) -> Environment {
        match self {
            Channel::ListenerServer => Environment::Server,
            Channel::ListenerClient => Environment::Client,
            Channel::ListenerWeb => Environment::Webview,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client->webview push frame, tagged with the channel the envelope came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebMessage {
    pub origin: Channel,
    pub data: Envelope,
}

/// URL the webview posts to in order to reach its client process.
pub fn bridge_url(resource_name: &str, channel: Channel) -> String {
    format!("https://{resource_name}/{channel}")
}

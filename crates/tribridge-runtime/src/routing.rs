//! Routing table: what a context does with an inbound envelope.
//!
//! | at      | calledFrom | calledTo | type     | action           |
//! |---------|------------|----------|----------|------------------|
//! | server  | client     | server   | event    | dispatch         |
//! | server  | client     | server   | response | resolve          |
//! | server  | webview    | server   | event    | dispatch         |
//! | server  | webview    | server   | response | resolve          |
//! | client  | server     | client   | event    | dispatch         |
//! | client  | server     | client   | response | resolve          |
//! | client  | server     | webview  | event    | relay to webview |
//! | client  | server     | webview  | response | resolve relayed  |
//! | client  | webview    | client   | event    | dispatch         |
//! | client  | webview    | client   | response | resolve          |
//! | client  | webview    | server   | any      | relay to server  |
//! | webview | client     | webview  | event    | dispatch         |
//! | webview | server     | webview  | event    | dispatch         |
//!
//! Anything else is ignored. Same-context (`self`) calls never touch a
//! transport and are not routed through this table.

use tribridge_core::{Envelope, EnvelopeKind, Environment};

/// Terminal action for one inbound envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Run the local handler registered for calls from `calledFrom`.
    Dispatch,
    /// Complete a pending call this context made to `calledFrom`.
    Resolve,
    /// Complete a webview->server call the client relayed.
    ResolveRelayed,
    /// Client forwards a server call into the webview unmodified.
    RelayToWebview,
    /// Client forwards webview traffic to the server.
    RelayToServer,
    Ignore,
}

/// Decide what context `at` does with `env`.
pub fn route(at: Environment, env: &Envelope) -> Action {
    use Environment::{Client, Server, Webview};
    use EnvelopeKind::{Event, Response};

    match (at, env.called_from, env.called_to, env.kind) {
        (Server, Client | Webview, Server, Event) => Action::Dispatch,
        (Server, Client | Webview, Server, Response) => Action::Resolve,

        (Client, Server | Webview, Client, Event) => Action::Dispatch,
        (Client, Server | Webview, Client, Response) => Action::Resolve,
        (Client, Server, Webview, Event) => Action::RelayToWebview,
        (Client, Server, Webview, Response) => Action::ResolveRelayed,
        (Client, Webview, Server, _) => Action::RelayToServer,

        (Webview, Client | Server, Webview, Event) => Action::Dispatch,

        _ => Action::Ignore,
    }
}

//! In-process loopback mesh.
//!
//! Connects one server with any number of players (client + webview each)
//! over tokio channels, implementing every transport seam:
//! - server -> client: per-player unbounded queue
//! - client -> server: one shared queue tagged with the channel name
//! - client -> webview: per-player push queue
//! - webview -> client: direct bridge call into `ClientRpc::handle_webview`
//!
//! Every inbound frame is handled on its own task so a handler may issue
//! nested calls without stalling its own context. Dispatch failures are
//! logged and reported through [`LoopbackMesh::next_failure`].

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::mpsc;

use tribridge_core::error::{Result, RpcError};
use tribridge_core::protocol::{codec, Channel, PlayerId, Target};
use tribridge_core::Environment;

use crate::config::RpcConfig;
use crate::context::{ClientRpc, ServerRpc, WebviewRpc};
use crate::host::{CommandCallback, NativeCallback, NativeHost};
use crate::transport::{BridgeRequest, ClientOutbound, ServerOutbound, WebviewPush};

type Frame = (Channel, String);

/// A failed inbound dispatch, as seen by the context that received it.
#[derive(Debug)]
pub struct Failure {
    pub ctx: Environment,
    pub player: Option<PlayerId>,
    pub error: RpcError,
}

struct ServerLink {
    clients: Arc<DashMap<PlayerId, mpsc::UnboundedSender<Frame>>>,
}

#[async_trait]
impl ServerOutbound for ServerLink {
    async fn send(&self, channel: Channel, target: Target, text: String) -> Result<()> {
        match target {
            Target::Player(id) => {
                let tx = self
                    .clients
                    .get(&id)
                    .ok_or_else(|| RpcError::Transport(format!("player {id} not connected")))?;
                tx.send((channel, text))
                    .map_err(|_| RpcError::Transport(format!("player {id} disconnected")))
            }
            Target::Everyone => {
                for entry in self.clients.iter() {
                    let _ = entry.value().send((channel, text.clone()));
                }
                Ok(())
            }
        }
    }
}

struct ClientLink {
    server_id: PlayerId,
    index: PlayerId,
    to_server: mpsc::UnboundedSender<Frame>,
}

#[async_trait]
impl ClientOutbound for ClientLink {
    async fn send(&self, channel: Channel, text: String) -> Result<()> {
        self.to_server
            .send((channel, text))
            .map_err(|_| RpcError::Transport("server gone".into()))
    }

    fn server_id(&self) -> PlayerId {
        self.server_id
    }

    fn local_index(&self) -> PlayerId {
        self.index
    }
}

struct WebviewLink {
    tx: mpsc::UnboundedSender<String>,
}

#[async_trait]
impl WebviewPush for WebviewLink {
    async fn push(&self, text: String) -> Result<()> {
        self.tx
            .send(text)
            .map_err(|_| RpcError::Transport("webview gone".into()))
    }
}

/// Webview bridge that calls straight into the client adapter, decoding the
/// body the same way the HTTP bridge does.
pub struct DirectBridge {
    client: Arc<ClientRpc>,
}

impl DirectBridge {
    pub fn new(client: Arc<ClientRpc>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BridgeRequest for DirectBridge {
    async fn post(&self, _url: &str, body: String) -> Result<Value> {
        let env = codec::decode(&body)?;
        self.client.handle_webview(env).await
    }
}

/// Native host that records registrations and lets callers fire them.
#[derive(Default)]
pub struct LoopbackHost {
    natives: DashMap<String, NativeCallback>,
    commands: DashMap<String, (CommandCallback, bool)>,
    focus: Mutex<(bool, bool)>,
}

impl LoopbackHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_native(&self, event: &str) -> bool {
        self.natives.contains_key(event)
    }

    /// Fire a native event; false when nothing is subscribed.
    pub fn fire(&self, event: &str, args: Vec<Value>) -> bool {
        let Some(cb) = self.natives.get(event).map(|c| Arc::clone(c.value())) else {
            return false;
        };
        cb(args);
        true
    }

    /// Run a registered command as `player`; false when unknown.
    pub fn run_command(&self, name: &str, player: PlayerId, args: Vec<String>) -> bool {
        let Some(cb) = self.commands.get(name).map(|c| Arc::clone(&c.value().0)) else {
            return false;
        };
        let raw = std::iter::once(name.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        cb(player, args, raw);
        true
    }

    pub fn is_restricted(&self, name: &str) -> Option<bool> {
        self.commands.get(name).map(|c| c.value().1)
    }

    pub fn focus(&self) -> (bool, bool) {
        self.focus.lock().map(|f| *f).unwrap_or_default()
    }
}

impl NativeHost for LoopbackHost {
    fn on_native(&self, event: &str, callback: NativeCallback) {
        self.natives.insert(event.to_string(), callback);
    }

    fn register_command(&self, name: &str, callback: CommandCallback, restricted: bool) {
        self.commands.insert(name.to_string(), (callback, restricted));
    }

    fn set_ui_focus(&self, has_focus: bool, has_cursor: bool) {
        if let Ok(mut f) = self.focus.lock() {
            *f = (has_focus, has_cursor);
        }
    }
}

/// One connected player: its client, webview and client-side host.
#[derive(Clone)]
pub struct LoopbackPeer {
    pub player: PlayerId,
    /// Local player index reported by the client's transport.
    pub index: PlayerId,
    pub client: Arc<ClientRpc>,
    pub webview: Arc<WebviewRpc>,
    pub host: Arc<LoopbackHost>,
}

pub struct LoopbackMesh {
    server: Arc<ServerRpc>,
    server_host: Arc<LoopbackHost>,
    clients: Arc<DashMap<PlayerId, mpsc::UnboundedSender<Frame>>>,
    to_server: mpsc::UnboundedSender<Frame>,
    failures_tx: mpsc::UnboundedSender<Failure>,
    failures_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<Failure>>,
    next_index: AtomicI64,
    debug: bool,
}

fn report(failures: &mpsc::UnboundedSender<Failure>, ctx: Environment, player: Option<PlayerId>, error: RpcError) {
    tracing::error!(%ctx, ?player, error = %error, "inbound dispatch failed");
    let _ = failures.send(Failure { ctx, player, error });
}

impl LoopbackMesh {
    /// Build the mesh and start the server pump. Must run inside a tokio runtime.
    pub fn new(debug: bool) -> Self {
        let clients = Arc::new(DashMap::new());
        let (to_server, mut server_rx) = mpsc::unbounded_channel::<Frame>();
        let (failures_tx, failures_rx) = mpsc::unbounded_channel();

        let server_host = Arc::new(LoopbackHost::new());
        let server = Arc::new(ServerRpc::new(
            &RpcConfig::for_env(Environment::Server).with_debug(debug),
            Arc::new(ServerLink {
                clients: Arc::clone(&clients),
            }),
            server_host.clone(),
        ));

        let pump_server = Arc::clone(&server);
        let pump_failures = failures_tx.clone();
        tokio::spawn(async move {
            while let Some((channel, text)) = server_rx.recv().await {
                let server = Arc::clone(&pump_server);
                let failures = pump_failures.clone();
                tokio::spawn(async move {
                    if let Err(e) = server.handle_inbound(channel, &text).await {
                        report(&failures, Environment::Server, None, e);
                    }
                });
            }
        });

        Self {
            server,
            server_host,
            clients,
            to_server,
            failures_tx,
            failures_rx: tokio::sync::Mutex::new(failures_rx),
            next_index: AtomicI64::new(0),
            debug,
        }
    }

    pub fn server(&self) -> Arc<ServerRpc> {
        Arc::clone(&self.server)
    }

    pub fn server_host(&self) -> Arc<LoopbackHost> {
        Arc::clone(&self.server_host)
    }

    /// Connect `player`, starting its client and webview pumps.
    ///
    /// Fails with `Transport` when `player` is already connected. Local
    /// indexes are never reused, even after a disconnect.
    pub fn connect(&self, player: PlayerId) -> Result<LoopbackPeer> {
        let (client_tx, mut client_rx) = mpsc::unbounded_channel::<Frame>();
        let (webview_tx, mut webview_rx) = mpsc::unbounded_channel::<String>();

        match self.clients.entry(player) {
            Entry::Occupied(_) => {
                tracing::warn!(player, "loopback peer already connected");
                return Err(RpcError::Transport(format!("player {player} already connected")));
            }
            Entry::Vacant(slot) => {
                slot.insert(client_tx);
            }
        }
        let index = self.next_index.fetch_add(1, Ordering::Relaxed);

        let host = Arc::new(LoopbackHost::new());
        let client = Arc::new(ClientRpc::new(
            &RpcConfig::for_env(Environment::Client).with_debug(self.debug),
            Arc::new(ClientLink {
                server_id: player,
                index,
                to_server: self.to_server.clone(),
            }),
            Arc::new(WebviewLink { tx: webview_tx }),
            host.clone(),
        ));
        let webview = Arc::new(WebviewRpc::new(
            &RpcConfig::for_env(Environment::Webview).with_debug(self.debug),
            Arc::new(DirectBridge::new(Arc::clone(&client))),
        ));

        let pump_client = Arc::clone(&client);
        let failures = self.failures_tx.clone();
        tokio::spawn(async move {
            while let Some((_channel, text)) = client_rx.recv().await {
                let client = Arc::clone(&pump_client);
                let failures = failures.clone();
                tokio::spawn(async move {
                    if let Err(e) = client.handle_server(&text).await {
                        report(&failures, Environment::Client, Some(player), e);
                    }
                });
            }
        });

        let pump_webview = Arc::clone(&webview);
        let failures = self.failures_tx.clone();
        tokio::spawn(async move {
            while let Some(text) = webview_rx.recv().await {
                let webview = Arc::clone(&pump_webview);
                let failures = failures.clone();
                tokio::spawn(async move {
                    if let Err(e) = webview.handle_push(&text).await {
                        report(&failures, Environment::Webview, Some(player), e);
                    }
                });
            }
        });

        tracing::info!(player, index, "loopback peer connected");

        Ok(LoopbackPeer {
            player,
            index,
            client,
            webview,
            host,
        })
    }

    /// Drop the server->client pipe for `player`; later sends to it fail.
    pub fn disconnect(&self, player: PlayerId) -> bool {
        self.clients.remove(&player).is_some()
    }

    pub fn connected(&self) -> usize {
        self.clients.len()
    }

    /// Next failed inbound dispatch on any context.
    pub async fn next_failure(&self) -> Option<Failure> {
        self.failures_rx.lock().await.recv().await
    }
}

//! tribridge dev host
//!
//! Runs a server and one player (client + webview) on the loopback mesh and
//! serves the webview bridge over HTTP, so a browser-hosted webview can post
//! to `http://{bridge.listen}/__rpc:listenerWeb`.
//!
//! Config is read from `tribridge.yaml`; only `debug` and `bridge.listen`
//! matter here since the dev host builds every context itself.

use tracing_subscriber::{fmt, EnvFilter};

use tribridge_runtime::transport::loopback::LoopbackMesh;
use tribridge_runtime::{config, router, services};

const DEV_PLAYER: i64 = 1;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "tribridge-devhost failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::load_from_file("tribridge.yaml")?;
    let listen = cfg.bridge.listen_addr()?;

    let mesh = LoopbackMesh::new(cfg.debug);
    services::register_server(&mesh.server());

    let peer = mesh.connect(DEV_PLAYER)?;
    services::register_client(&peer.client);

    let app = router::build_router(peer.client.clone());

    tracing::info!(%listen, player = DEV_PLAYER, "tribridge-devhost starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

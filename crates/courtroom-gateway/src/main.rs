//! Courtroom gateway: pins personas, narrative content and portraits to IPFS for the agent tools.
//! Listens on `bind_addr` (default 127.0.0.1:8000).

mod routes;

use courtroom_core::{CourtroomConfig, PinataClient};
use routes::{router, AppState};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = match CourtroomConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("courtroom-gateway: {}", e);
            std::process::exit(1);
        }
    };
    let pinata = match PinataClient::from_config(&cfg) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("courtroom-gateway: {}", e);
            std::process::exit(1);
        }
    };

    let app = router(AppState {
        pinning: Arc::new(pinata),
    })
    .layer(TraceLayer::new_for_http());

    let listener = match tokio::net::TcpListener::bind(&cfg.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("courtroom-gateway: cannot bind {}: {}", cfg.bind_addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!(target: "courtroom::gateway", addr = %cfg.bind_addr, gateway = %cfg.gateway_base, "Gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("courtroom-gateway: {}", e);
        std::process::exit(1);
    }
}

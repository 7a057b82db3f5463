//! API Server for the Taskdash dashboard
//!
//! This is the main entry point for the Rust backend.
//! It provides the REST API and a Socket.IO push channel on separate ports.

mod config;
mod routes;
mod socket;
mod state;

use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::socket::{create_socket_layer, forward_changes, SocketState};
use crate::state::AppState;

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api_server=debug,taskdash_core=debug,tower_http=debug,socketioxide=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!("Using data directory: {:?}", config.data_dir);
    if let Some(dir) = &config.export_archive_dir {
        tracing::info!("Archiving exports to {:?}", dir);
    }

    let rest_port = config.rest_port;
    let socket_port = config.socket_port;

    let app_state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;

    // Socket.IO layer, fed by the store's change notifications
    let (socket_layer, io) = create_socket_layer(SocketState::new(app_state.store_arc()));
    forward_changes(io, app_state.store_arc());

    // REST API server
    let rest_app = Router::new()
        .merge(routes::health::router())
        .merge(routes::task::router())
        .merge(routes::metadata::router())
        .merge(routes::analytics::router())
        .merge(routes::export::router())
        .with_state(app_state)
        .layer(cors())
        .layer(TraceLayer::new_for_http());

    // Socket.IO server
    // Layers are applied bottom-to-top, so CorsLayer is added last to be applied first
    let socket_app = Router::new().layer(cors()).layer(socket_layer);

    // Bind to 0.0.0.0 for localhost/127.0.0.1 compatibility
    let rest_addr = SocketAddr::from(([0, 0, 0, 0], rest_port));
    let socket_addr = SocketAddr::from(([0, 0, 0, 0], socket_port));

    let rest_listener = tokio::net::TcpListener::bind(rest_addr)
        .await
        .with_context(|| format!("Failed to bind REST API to {}", rest_addr))?;
    let socket_listener = tokio::net::TcpListener::bind(socket_addr)
        .await
        .with_context(|| format!("Failed to bind Socket.IO to {}", socket_addr))?;

    tracing::info!("REST API listening on {}", rest_addr);
    tracing::info!("Socket.IO listening on {}", socket_addr);

    let rest_handle = tokio::spawn(async move { axum::serve(rest_listener, rest_app).await });
    let socket_handle =
        tokio::spawn(async move { axum::serve(socket_listener, socket_app).await });

    // Wait for both
    let (rest, socket) = tokio::try_join!(rest_handle, socket_handle)?;
    rest.context("REST API server failed")?;
    socket.context("Socket.IO server failed")?;
    Ok(())
}

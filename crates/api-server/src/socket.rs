//! Socket.IO push channel
//!
//! Clients ask for the current collections with `sync:request`; after that
//! every store mutation is pushed to all connected clients.

use serde::Serialize;
use serde_json::Value;
use socketioxide::extract::{SocketRef, State};
use socketioxide::{SocketIo, TransportType};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use taskdash_core::store::{EntityStore, Repository};

pub const TASKS_SYNC: &str = "tasks:sync";
pub const CATEGORIES_SYNC: &str = "categories:sync";
pub const TAGS_SYNC: &str = "tags:sync";

/// Shared state for Socket.IO handlers
#[derive(Clone)]
pub struct SocketState {
    pub store: Arc<EntityStore>,
}

impl SocketState {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}

/// Handle new socket connection
pub async fn on_connect(socket: SocketRef) {
    info!("Client connected: {}", socket.id);

    socket.on(
        "sync:request",
        |socket: SocketRef, State(state): State<SocketState>| async move {
            handle_request_sync(socket, state).await;
        },
    );

    socket.on_disconnect(|socket: SocketRef| async move {
        info!("Client disconnected: {}", socket.id);
    });
}

async fn handle_request_sync(socket: SocketRef, state: SocketState) {
    debug!("Client {} requested sync", socket.id);

    match state.store.snapshot().await {
        Ok(snapshot) => {
            let _ = socket.emit(TASKS_SYNC, &snapshot.tasks);
            let _ = socket.emit(CATEGORIES_SYNC, &snapshot.categories);
            let _ = socket.emit(TAGS_SYNC, &snapshot.tags);
        }
        Err(e) => warn!("Failed to read store for sync: {}", e),
    }
}

/// Destination for relayed store snapshots
pub trait SyncSink: Send + 'static {
    fn emit_sync(&self, event: &'static str, docs: Value);
}

impl SyncSink for SocketIo {
    fn emit_sync(&self, event: &'static str, docs: Value) {
        if let Err(e) = self.emit(event, &docs) {
            warn!("Failed to broadcast {}: {}", event, e);
        }
    }
}

/// Forward store change notifications to `sink`, which is the Socket.IO
/// server in production.
///
/// Runs until all three collections have closed their channels.
pub fn forward_changes<S: SyncSink>(sink: S, store: Arc<EntityStore>) -> JoinHandle<()> {
    let mut tasks = store.tasks().subscribe();
    let mut categories = store.categories().subscribe();
    let mut tags = store.tags().subscribe();

    tokio::spawn(async move {
        let mut open = [true; 3];
        while open.iter().any(|o| *o) {
            tokio::select! {
                changed = tasks.recv(), if open[0] => {
                    open[0] = forward(&sink, TASKS_SYNC, changed);
                }
                changed = categories.recv(), if open[1] => {
                    open[1] = forward(&sink, CATEGORIES_SYNC, changed);
                }
                changed = tags.recv(), if open[2] => {
                    open[2] = forward(&sink, TAGS_SYNC, changed);
                }
            }
        }
        debug!("Store change feed closed");
    })
}

/// Emit one received snapshot; `false` once the channel is gone.
fn forward<S: SyncSink, T: Serialize>(
    sink: &S,
    event: &'static str,
    changed: Result<Vec<T>, RecvError>,
) -> bool {
    match changed {
        Ok(docs) => {
            match serde_json::to_value(&docs) {
                Ok(docs) => sink.emit_sync(event, docs),
                Err(e) => warn!("Failed to encode {}: {}", event, e),
            }
            true
        }
        // A newer snapshot is already queued behind the skipped ones.
        Err(RecvError::Lagged(skipped)) => {
            debug!("{} feed skipped {} snapshot(s)", event, skipped);
            true
        }
        Err(RecvError::Closed) => false,
    }
}

/// Create and configure Socket.IO layer
pub fn create_socket_layer(state: SocketState) -> (socketioxide::layer::SocketIoLayer, SocketIo) {
    let (layer, io) = SocketIo::builder()
        .with_state(state)
        // Only allow WebSocket transport to avoid CORS issues with polling
        .transports([TransportType::Websocket])
        .build_layer();

    io.ns("/", on_connect);

    (layer, io)
}

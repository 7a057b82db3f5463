//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use taskdash_core::store::Repository;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    data_dir: String,
    task_count: usize,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // A store read failure still reports "ok"; the count just shows zero.
    let task_count = state
        .store()
        .tasks()
        .list()
        .await
        .map(|tasks| tasks.len())
        .unwrap_or_default();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data_dir: state.config().data_dir.to_string_lossy().to_string(),
        task_count,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

//! Spreadsheet download endpoints
//!
//! Only one export runs at a time; a second request while one is in flight
//! gets 409 instead of queueing.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::{info, warn};

use taskdash_core::export::{export, ExportKind, ExportRequest};

use super::{api_error, store_error, ApiError, FilterQuery};
use crate::state::AppState;

fn failure_message(kind: ExportKind) -> &'static str {
    match kind {
        ExportKind::Tasks => "Failed to export tasks.",
        ExportKind::Analytics => "Failed to export analytics.",
    }
}

async fn run_export(
    state: AppState,
    kind: ExportKind,
    filter: FilterQuery,
) -> Result<Response, ApiError> {
    let _permit = state.begin_export().ok_or_else(|| {
        api_error(StatusCode::CONFLICT, "An export is already in progress")
    })?;

    let snapshot = state.store().snapshot().await.map_err(store_error)?;
    let tasks = filter
        .to_spec()
        .apply(&snapshot.tasks)
        .into_iter()
        .cloned()
        .collect();

    let request = ExportRequest::new(kind, tasks, snapshot.categories, snapshot.tags);
    let artifact = export(request).await.map_err(|e| {
        warn!("{:?} export failed: {}", kind, e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, failure_message(kind))
    })?;

    if let Some(dir) = &state.config().export_archive_dir {
        match artifact.save_to(dir).await {
            Ok(path) => info!("Archived export to {:?}", path),
            Err(e) => warn!("Failed to archive export {}: {}", artifact.filename, e),
        }
    }

    let disposition = format!("attachment; filename=\"{}\"", artifact.filename);
    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}

/// GET /api/export/tasks - Task list workbook
async fn export_tasks(
    State(state): State<AppState>,
    Query(filter): Query<FilterQuery>,
) -> Result<Response, ApiError> {
    run_export(state, ExportKind::Tasks, filter).await
}

/// GET /api/export/analytics - Summary plus detail workbook
async fn export_analytics(
    State(state): State<AppState>,
    Query(filter): Query<FilterQuery>,
) -> Result<Response, ApiError> {
    run_export(state, ExportKind::Analytics, filter).await
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/export/tasks", get(export_tasks))
        .route("/api/export/analytics", get(export_analytics))
}

//! Task API endpoints
//!
//! RESTful API for task CRUD operations and the filtered table view.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use taskdash_core::lookup::Lookup;
use taskdash_core::store::Repository;
use taskdash_core::task::{NewTask, Task, TaskPatch};
use taskdash_core::view::{
    paginate, sort_tasks, Page, PageRequest, SortDirection, SortKey, SortSpec, TaskRow,
    DEFAULT_PAGE_SIZE,
};

use super::{api_error, store_error, ApiError, FilterQuery};
use crate::state::AppState;

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub sort: Option<SortKey>,
    #[serde(default)]
    pub order: Option<SortDirection>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub per_page: Option<usize>,
}

impl ListQuery {
    fn sort_spec(&self) -> SortSpec {
        SortSpec::new(
            self.sort.unwrap_or_default(),
            self.order.unwrap_or_default(),
        )
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tasks - Filtered, sorted, paginated task rows
async fn list_tasks(
    State(state): State<AppState>,
    Query(filter): Query<FilterQuery>,
    Query(list): Query<ListQuery>,
) -> Result<Json<Page<TaskRow>>, ApiError> {
    let snapshot = state.store().snapshot().await.map_err(store_error)?;
    let spec = filter.to_spec();

    let mut visible = spec.apply(&snapshot.tasks);
    // Sorting is opt-in; the default keeps collection order.
    if list.sort.is_some() {
        sort_tasks(&mut visible, list.sort_spec());
    }
    debug!(
        "Filter kept {} of {} task(s)",
        visible.len(),
        snapshot.tasks.len()
    );

    let lookup = Lookup::new(&snapshot.categories, &snapshot.tags);
    let rows: Vec<TaskRow> = visible.iter().map(|t| TaskRow::new(t, &lookup)).collect();

    Ok(Json(paginate(rows, list.page_request())))
}

/// POST /api/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let created = state.store().tasks().create(req).await.map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/tasks/{id} - Get a single task
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let task = state.store().tasks().get(&id).await.map_err(store_error)?;

    match task {
        Some(t) => Ok(Json(t)),
        None => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Task {} not found", id),
        )),
    }
}

/// PATCH /api/tasks/{id} - Update a task
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    let updated = state
        .store()
        .tasks()
        .update(&id, req)
        .await
        .map_err(store_error)?;
    Ok(Json(updated))
}

/// DELETE /api/tasks/{id} - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let deleted = state.store().tasks().delete(&id).await.map_err(store_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Task {} not found", id),
        ))
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).patch(update_task).delete(delete_task),
        )
}

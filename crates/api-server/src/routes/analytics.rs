//! Analytics endpoint

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;

use taskdash_core::analytics::AnalyticsReport;

use super::{store_error, ApiError, FilterQuery};
use crate::state::AppState;

/// GET /api/analytics - Summary and chart data for the filtered tasks
async fn get_analytics(
    State(state): State<AppState>,
    Query(filter): Query<FilterQuery>,
) -> Result<Json<AnalyticsReport>, ApiError> {
    let snapshot = state.store().snapshot().await.map_err(store_error)?;
    let visible = filter.to_spec().apply(&snapshot.tasks);

    Ok(Json(AnalyticsReport::build(
        &visible,
        &snapshot.categories,
        Utc::now(),
    )))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/analytics", get(get_analytics))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use taskdash_core::store::Repository;
    use taskdash_core::task::{NewTask, TaskStatus};

    use crate::config::ServerConfig;

    fn new_task(title: &str, status: TaskStatus, category_id: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            status,
            category_id: category_id.to_string(),
            due_date: "2000-01-01".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn analytics_reflects_filter() {
        let temp_dir = TempDir::new().unwrap();
        let config = ServerConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        let state = AppState::new(config).await.unwrap();
        let general = state.store().categories().list().await.unwrap()[0].id.clone();

        let tasks = state.store().tasks();
        tasks
            .create(new_task("a", TaskStatus::Todo, &general))
            .await
            .unwrap();
        tasks
            .create(new_task("b", TaskStatus::Done, &general))
            .await
            .unwrap();
        tasks
            .create(new_task("c", TaskStatus::Todo, "elsewhere"))
            .await
            .unwrap();

        let response = router()
            .with_state(state.clone())
            .oneshot(
                Request::builder()
                    .uri(format!("/api/analytics?categoryId={}", general))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let report: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(report["summary"]["total"], 2);
        assert_eq!(report["summary"]["overdue"], 1);
        assert_eq!(report["summary"]["categories"][0]["name"], "General");
        assert_eq!(report["summary"]["categories"][0]["count"], 2);
        assert_eq!(report["statusDistribution"].as_array().unwrap().len(), 2);
    }
}

//! Category and tag endpoints
//!
//! Both collections share one payload shape, so the handlers are generic
//! over the document type and mounted twice.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};

use taskdash_core::metadata::{Category, Tag};
use taskdash_core::store::{CollectionOf, Document, EntityStore, Repository};

use super::{api_error, store_error, ApiError};
use crate::state::AppState;

/// GET /api/{categories,tags}
async fn list_docs<T>(State(state): State<AppState>) -> Result<Json<Vec<T>>, ApiError>
where
    T: Document,
    EntityStore: CollectionOf<T>,
{
    let docs = CollectionOf::<T>::collection(state.store())
        .list()
        .await
        .map_err(store_error)?;
    Ok(Json(docs))
}

/// POST /api/{categories,tags}
async fn create_doc<T>(
    State(state): State<AppState>,
    Json(draft): Json<T::Draft>,
) -> Result<(StatusCode, Json<T>), ApiError>
where
    T: Document,
    EntityStore: CollectionOf<T>,
{
    let created = CollectionOf::<T>::collection(state.store())
        .create(draft)
        .await
        .map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/{categories,tags}/{id}
async fn update_doc<T>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<T::Patch>,
) -> Result<Json<T>, ApiError>
where
    T: Document,
    EntityStore: CollectionOf<T>,
{
    let updated = CollectionOf::<T>::collection(state.store())
        .update(&id, req)
        .await
        .map_err(store_error)?;
    Ok(Json(updated))
}

/// DELETE /api/{categories,tags}/{id}
///
/// Tasks that reference the removed document keep the dangling id.
async fn delete_doc<T>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    T: Document,
    EntityStore: CollectionOf<T>,
{
    let deleted = CollectionOf::<T>::collection(state.store())
        .delete(&id)
        .await
        .map_err(store_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Not found: {} {}", T::KIND, id),
        ))
    }
}

fn collection_routes<T>(base: &str) -> Router<AppState>
where
    T: Document,
    EntityStore: CollectionOf<T>,
{
    Router::new()
        .route(base, get(list_docs::<T>).post(create_doc::<T>))
        .route(
            &format!("{}/{{id}}", base),
            patch(update_doc::<T>).delete(delete_doc::<T>),
        )
}

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(collection_routes::<Category>("/api/categories"))
        .merge(collection_routes::<Tag>("/api/tags"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::config::ServerConfig;

    async fn build_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = ServerConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        (AppState::new(config).await.unwrap(), temp_dir)
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = router()
            .with_state(state.clone())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, payload)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn categories_start_with_general() {
        let (state, _temp) = build_state().await;

        let (code, list) = send(
            &state,
            Request::builder()
                .uri("/api/categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["name"], "General");
        assert_eq!(list[0]["color"], "#999999");
    }

    #[tokio::test]
    async fn create_tag_defaults_color() {
        let (state, _temp) = build_state().await;

        let (code, tag) = send(
            &state,
            json_request("POST", "/api/tags", json!({"name": "urgent"})),
        )
        .await;
        assert_eq!(code, StatusCode::CREATED);
        assert_eq!(tag["name"], "urgent");
        assert_eq!(tag["color"], "#999999");

        let (code, _) = send(
            &state,
            json_request("POST", "/api/tags", json!({"name": ""})),
        )
        .await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rename_then_delete_category() {
        let (state, _temp) = build_state().await;
        let (_, created) = send(
            &state,
            json_request(
                "POST",
                "/api/categories",
                json!({"name": "Work", "color": "#ff0000"}),
            ),
        )
        .await;
        let uri = format!("/api/categories/{}", created["id"].as_str().unwrap());

        let (code, renamed) = send(&state, json_request("PATCH", &uri, json!({"name": "Job"}))).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(renamed["name"], "Job");
        assert_eq!(renamed["color"], "#ff0000");

        let delete = || {
            Request::builder()
                .method("DELETE")
                .uri(&uri)
                .body(Body::empty())
                .unwrap()
        };
        let (code, _) = send(&state, delete()).await;
        assert_eq!(code, StatusCode::NO_CONTENT);
        let (code, body) = send(&state, delete()).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("category"));
    }
}

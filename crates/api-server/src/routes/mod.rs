//! Route handlers

pub mod analytics;
pub mod export;
pub mod health;
pub mod metadata;
pub mod task;

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use taskdash_core::filter::FilterSpec;
use taskdash_core::task::TaskStatus;
use taskdash_core::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a core error onto an HTTP status
pub fn store_error(err: Error) -> ApiError {
    match err {
        Error::NotFound(what) => api_error(StatusCode::NOT_FOUND, format!("Not found: {}", what)),
        Error::InvalidInput(msg) => api_error(StatusCode::BAD_REQUEST, msg),
        other => {
            error!("Request failed: {}", other);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

/// Filter parameters shared by list, analytics and export endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub category_id: Option<String>,
    /// Comma separated tag ids
    #[serde(default)]
    pub tag_ids: Option<String>,
    #[serde(default, alias = "searchQuery")]
    pub q: Option<String>,
}

impl FilterQuery {
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec {
            status: self.status,
            category_id: self.category_id.clone().filter(|id| !id.is_empty()),
            tag_ids: self
                .tag_ids
                .as_deref()
                .unwrap_or("")
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect(),
            search_query: self.q.clone().unwrap_or_default(),
        }
    }
}

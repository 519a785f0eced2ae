use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::content::{LanguageError, QueryError};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Language(#[from] LanguageError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("couldn't render feed: {0}")]
    Render(#[from] askama::Error),
    #[error("feed task didn't finish: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Feeds are not worth a 500: the error goes back as a small JSON payload
/// with a `200 OK`.
impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(json!({ "err": self.to_string() }))).into_response()
    }
}

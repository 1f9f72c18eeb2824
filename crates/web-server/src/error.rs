// In crates/web-server/src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to bind server address: {0}")]
    ServerBindError(#[source] std::io::Error),

    #[error("Server stopped unexpectedly: {0}")]
    ServeError(#[source] std::io::Error),

    #[error("Failed to serialize plan payload: {0}")]
    Serialization(#[from] plan_types::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_core::CatalogError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServerError {
    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Catalog(e) => match e {
                CatalogError::MusicNotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::Duplicate(_) => StatusCode::CONFLICT,
                CatalogError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                CatalogError::Storage(_) | CatalogError::Database(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ServerError::NotFound(msg) | ServerError::BadRequest(msg) => msg,
            ServerError::Catalog(e) => match e {
                CatalogError::InvalidInput(msg) => msg,
                e @ (CatalogError::MusicNotFound(_) | CatalogError::Duplicate(_)) => e.to_string(),
                e @ (CatalogError::Storage(_) | CatalogError::Database(_)) => {
                    tracing::error!("Catalog error: {:?}", e);
                    "Database error".to_string()
                }
            },
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                "Configuration error".to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

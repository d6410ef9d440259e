use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{ERR_INTERNAL, ERR_INVALID_DATA};
use crate::models::{ModelError, Resource};

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::error::EncodeError),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bincode::error::DecodeError),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: u64 },

    #[error("Invalid data")]
    InvalidData,
}

impl AppError {
    /// Not-found error for a resource type, e.g. `Board 7 not found`
    pub fn not_found<T: Resource>(id: u64) -> Self {
        AppError::NotFound {
            resource: T::NAME,
            id,
        }
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        tracing::debug!("Rejecting payload: {}", err);
        AppError::InvalidData
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
///
/// Validation failures use the `details` key, everything else uses `message`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                json!({ "message": self.to_string() }),
            ),
            AppError::InvalidData => (
                StatusCode::BAD_REQUEST,
                json!({ "details": ERR_INVALID_DATA }),
            ),
            ref internal => {
                tracing::error!("{}", internal);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": ERR_INTERNAL }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;

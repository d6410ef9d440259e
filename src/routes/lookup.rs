use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};
use serde_json::Value;

use crate::db::Repository;
use crate::error::{AppError, Result};
use crate::models::Resource;

/// Turns a missing row into `<Resource> <id> not found`
///
/// Every handler that addresses a row by id funnels its lookup through this.
pub trait OrNotFound<T> {
    fn or_not_found(self, id: u64) -> Result<T>;
}

impl<T: Resource> OrNotFound<T> for Option<T> {
    fn or_not_found(self, id: u64) -> Result<T> {
        self.ok_or_else(|| missing::<T>(id))
    }
}

/// Not-found error for a row that another request payload points at
pub fn missing<T: Resource>(id: u64) -> AppError {
    tracing::warn!("{} {} not found", T::NAME, id);
    AppError::not_found::<T>(id)
}

/// Run blocking storage work on the blocking thread pool
pub async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

/// Fetch a row or fail the request with 404
pub async fn find_or_not_found<R>(repo: R, id: u64) -> Result<R::Entity>
where
    R: Repository + Send + 'static,
    R::Entity: Send + 'static,
{
    run_blocking(move || repo.find_by_id(id)?.or_not_found(id)).await
}

/// Unwrap a JSON body; malformed JSON or a wrong content type is a validation error
pub fn json_body(payload: std::result::Result<Json<Value>, JsonRejection>) -> Result<Value> {
    payload.map(|Json(data)| data).map_err(|rejection| {
        tracing::debug!("Rejected request body: {}", rejection);
        AppError::InvalidData
    })
}

/// Unwrap an id path segment; anything that is not a `u64` is a validation error
pub fn path_id(path: std::result::Result<Path<u64>, PathRejection>) -> Result<u64> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!("Rejected path: {}", rejection);
        AppError::InvalidData
    })
}

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::db::Repository;
use crate::error::Result;
use crate::models::{BoardDetail, BoardPatch, BoardSummary, CardResponse, NewBoard};
use crate::routes::lookup::{json_body, path_id, run_blocking, OrNotFound};
use crate::AppState;

/// List every board with its card count, ordered by id
///
/// GET /boards
pub async fn list_boards(State(state): State<AppState>) -> Result<Json<Vec<BoardSummary>>> {
    let boards = state.boards();
    let summaries = run_blocking(move || boards.list_summaries()).await?;

    Ok(Json(summaries))
}

/// Create a board from `{title, owner}`
///
/// POST /boards
pub async fn create_board(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<BoardSummary>)> {
    let draft = NewBoard::from_json(&json_body(payload)?)?;

    let boards = state.boards();
    let board = run_blocking(move || boards.create(draft)).await?;

    Ok((StatusCode::CREATED, Json(board.to_summary(0))))
}

/// Board with all of its cards
///
/// GET /boards/:board_id
pub async fn get_board(
    State(state): State<AppState>,
    path: std::result::Result<Path<u64>, PathRejection>,
) -> Result<Json<BoardDetail>> {
    let board_id = path_id(path)?;

    let boards = state.boards();
    let detail = run_blocking(move || boards.detail(board_id)?.or_not_found(board_id)).await?;

    Ok(Json(detail))
}

/// Rename a board; only `title` is mutable
///
/// PUT /boards/:board_id
///
/// A missing board is reported before the body is validated.
pub async fn update_board(
    State(state): State<AppState>,
    path: std::result::Result<Path<u64>, PathRejection>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<BoardSummary>> {
    let board_id = path_id(path)?;
    let patch = json_body(payload).and_then(|data| Ok(BoardPatch::from_json(&data)?));

    let boards = state.boards();
    let summary = run_blocking(move || {
        boards
            .update_summary(board_id, move |board| {
                patch?.apply(board);
                Ok(())
            })?
            .or_not_found(board_id)
    })
    .await?;

    tracing::info!("Board {} updated", board_id);
    Ok(Json(summary))
}

/// Delete a board and, in the same transaction, all of its cards
///
/// DELETE /boards/:board_id
pub async fn delete_board(
    State(state): State<AppState>,
    path: std::result::Result<Path<u64>, PathRejection>,
) -> Result<StatusCode> {
    let board_id = path_id(path)?;

    let boards = state.boards();
    run_blocking(move || boards.delete(board_id)?.or_not_found(board_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Cards of one board, ordered by id
///
/// GET /boards/:board_id/cards
pub async fn list_board_cards(
    State(state): State<AppState>,
    path: std::result::Result<Path<u64>, PathRejection>,
) -> Result<Json<Vec<CardResponse>>> {
    let board_id = path_id(path)?;

    let boards = state.boards();
    let detail = run_blocking(move || boards.detail(board_id)?.or_not_found(board_id)).await?;

    Ok(Json(detail.cards))
}

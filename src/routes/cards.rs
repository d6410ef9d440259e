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
use crate::models::{Board, CardPatch, CardResponse, NewCard};
use crate::routes::lookup::{
    find_or_not_found, json_body, missing, path_id, run_blocking, OrNotFound,
};
use crate::AppState;

/// List every card, ordered by id
///
/// GET /cards
pub async fn list_cards(State(state): State<AppState>) -> Result<Json<Vec<CardResponse>>> {
    let cards = state.cards();
    let all = run_blocking(move || cards.list_all()).await?;

    Ok(Json(all.iter().map(|card| card.to_response()).collect()))
}

/// Create a card from `{message, board_id, likes?}`
///
/// POST /cards
///
/// Field errors are reported before the board lookup, so a body without
/// `message` is a 400 even when `board_id` names no board.
pub async fn create_card(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CardResponse>)> {
    let draft = NewCard::from_json(&json_body(payload)?)?;
    let board_id = draft.board_id;

    let cards = state.cards();
    let card = run_blocking(move || cards.insert(draft))
        .await?
        .ok_or_else(|| missing::<Board>(board_id))?;

    Ok((StatusCode::CREATED, Json(card.to_response())))
}

/// GET /cards/:card_id
pub async fn get_card(
    State(state): State<AppState>,
    path: std::result::Result<Path<u64>, PathRejection>,
) -> Result<Json<CardResponse>> {
    let card_id = path_id(path)?;
    let card = find_or_not_found(state.cards(), card_id).await?;

    Ok(Json(card.to_response()))
}

/// Update `message` and/or `likes`; other fields are left as stored
///
/// PUT /cards/:card_id
///
/// A missing card is reported before the body is validated.
pub async fn update_card(
    State(state): State<AppState>,
    path: std::result::Result<Path<u64>, PathRejection>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<CardResponse>> {
    let card_id = path_id(path)?;
    let patch = json_body(payload).and_then(|data| Ok(CardPatch::from_json(&data)?));

    let cards = state.cards();
    let card = run_blocking(move || {
        cards
            .update(card_id, move |card| {
                patch?.apply(card);
                Ok(())
            })?
            .or_not_found(card_id)
    })
    .await?;

    tracing::info!("Card {} updated", card_id);
    Ok(Json(card.to_response()))
}

/// Add exactly one like
///
/// PATCH /cards/:card_id/like
pub async fn like_card(
    State(state): State<AppState>,
    path: std::result::Result<Path<u64>, PathRejection>,
) -> Result<Json<CardResponse>> {
    let card_id = path_id(path)?;

    let cards = state.cards();
    let card = run_blocking(move || {
        cards
            .update(card_id, |card| {
                card.like();
                Ok(())
            })?
            .or_not_found(card_id)
    })
    .await?;

    tracing::debug!("Card {} now has {} likes", card.id, card.likes);
    Ok(Json(card.to_response()))
}

/// DELETE /cards/:card_id
pub async fn delete_card(
    State(state): State<AppState>,
    path: std::result::Result<Path<u64>, PathRejection>,
) -> Result<StatusCode> {
    let card_id = path_id(path)?;

    let cards = state.cards();
    run_blocking(move || cards.delete(card_id)?.or_not_found(card_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

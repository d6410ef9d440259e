//! Inspiration Board Server Library
//!
//! Boards, the cards pinned to them, and the HTTP handlers that manage both.
//! This module exports the core types and functions for testing and reuse.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

pub use config::Config;
pub use db::{open_database, BoardRepo, CardRepo, Db, Repository};
pub use error::{AppError, Result};

use axum::{
    routing::{get, patch},
    Router,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given database and configuration
    pub fn new(db: Db, config: Config) -> Self {
        Self { db, config }
    }

    pub fn boards(&self) -> BoardRepo {
        BoardRepo::new(self.db.clone())
    }

    pub fn cards(&self) -> CardRepo {
        CardRepo::new(self.db.clone())
    }
}

/// All routes, without transport layers (CORS, tracing)
pub fn build_router(state: AppState) -> Router {
    use routes::*;

    Router::new()
        .route("/health", get(health_check))
        .route("/boards", get(list_boards).post(create_board))
        .route(
            "/boards/:board_id",
            get(get_board).put(update_board).delete(delete_board),
        )
        .route("/boards/:board_id/cards", get(list_board_cards))
        .route("/cards", get(list_cards).post(create_card))
        .route(
            "/cards/:card_id",
            get(get_card).put(update_card).delete(delete_card),
        )
        .route("/cards/:card_id/like", patch(like_card))
        .with_state(state)
}

use axum::{extract::State, Json};
use redb::ReadableDatabase;
use serde::Serialize;

use crate::db::{tables, Db};
use crate::error::Result;
use crate::routes::lookup::run_blocking;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
///
/// GET /health
///
/// Reports unhealthy when any board or card table cannot be opened for reading.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    let db = state.db.clone();
    let connected = match run_blocking(move || check_tables(&db)).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            false
        }
    };

    Json(HealthReport {
        status: if connected { "healthy" } else { "unhealthy" },
        database: if connected { "connected" } else { "disconnected" },
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Open every table the API reads from in one read transaction
fn check_tables(db: &Db) -> Result<()> {
    let read_txn = db.begin_read()?;
    read_txn.open_table(tables::BOARDS)?;
    read_txn.open_table(tables::CARDS)?;
    read_txn.open_table(tables::BOARD_CARDS)?;
    read_txn.open_table(tables::SEQUENCES)?;
    Ok(())
}

pub mod boards;
pub mod cards;
pub mod repository;
pub mod tables;

pub use boards::BoardRepo;
pub use cards::CardRepo;
pub use repository::Repository;

use redb::{Database, Error as RedbError, ReadableTable, WriteTransaction};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;

/// Database handle type (Arc-wrapped for sharing across handlers)
pub type Db = Arc<Database>;

const BINCODE_CONFIG: bincode::config::Configuration = bincode::config::standard();

/// Open or create the redb database at the given path
///
/// Creates all required tables on first run.
#[allow(clippy::result_large_err)]
pub fn open_database(path: impl AsRef<Path>) -> std::result::Result<Db, RedbError> {
    tracing::info!("Opening database at: {:?}", path.as_ref());

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                RedbError::Io(e)
            })?;
        }
    }

    let db = Database::create(path)?;

    let write_txn = db.begin_write()?;
    {
        let _ = write_txn.open_table(tables::BOARDS)?;
        let _ = write_txn.open_table(tables::CARDS)?;
        let _ = write_txn.open_table(tables::BOARD_CARDS)?;
        let _ = write_txn.open_table(tables::SEQUENCES)?;
    }
    write_txn.commit()?;

    tracing::info!("Database initialized successfully");

    Ok(Arc::new(db))
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(bincode::serde::encode_to_vec(value, BINCODE_CONFIG)?)
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let (value, _) = bincode::serde::decode_from_slice(bytes, BINCODE_CONFIG)?;
    Ok(value)
}

/// Reserve the next id of a sequence; ids are never reused, even after deletes
pub(crate) fn next_id(write_txn: &WriteTransaction, sequence: &str) -> Result<u64> {
    let mut sequences = write_txn.open_table(tables::SEQUENCES)?;
    let last = sequences.get(sequence)?.map(|id| id.value()).unwrap_or(0);
    let next = last + 1;
    sequences.insert(sequence, next)?;
    Ok(next)
}

/// Card ids of a board from the `BOARD_CARDS` index, ascending
pub(crate) fn card_ids<T>(index: &T, board_id: u64) -> Result<Vec<u64>>
where
    T: ReadableTable<u64, &'static [u8]>,
{
    let ids = match index.get(board_id)? {
        Some(bytes) => decode(bytes.value())?,
        None => Vec::new(),
    };
    Ok(ids)
}

use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable, WriteTransaction};

use super::{card_ids, decode, encode, next_id, tables, Db, Repository};
use crate::constants::BOARD_SEQUENCE;
use crate::error::Result;
use crate::models::{Board, BoardDetail, BoardRecord, BoardSummary, Card, CardRecord, NewBoard};

/// redb-backed board storage
#[derive(Clone)]
pub struct BoardRepo {
    db: Db,
}

impl BoardRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// A board with its cards ordered by id, read from a single snapshot
    pub fn detail(&self, id: u64) -> Result<Option<BoardDetail>> {
        let read_txn = self.db.begin_read()?;
        let boards = read_txn.open_table(tables::BOARDS)?;
        let record: BoardRecord = match boards.get(id)? {
            Some(bytes) => decode(bytes.value())?,
            None => return Ok(None),
        };

        let index = read_txn.open_table(tables::BOARD_CARDS)?;
        let cards_table = read_txn.open_table(tables::CARDS)?;

        let mut cards = Vec::new();
        for card_id in card_ids(&index, id)? {
            if let Some(bytes) = cards_table.get(card_id)? {
                let record: CardRecord = decode(bytes.value())?;
                cards.push(Card::from_record(card_id, record));
            }
        }
        Ok(Some(Board::from_record(id, record).to_detail(&cards)))
    }

    /// Every board with its card count, read from a single snapshot
    pub fn list_summaries(&self) -> Result<Vec<BoardSummary>> {
        let read_txn = self.db.begin_read()?;
        let boards = read_txn.open_table(tables::BOARDS)?;
        let index = read_txn.open_table(tables::BOARD_CARDS)?;

        let mut summaries = Vec::new();
        for entry in boards.iter()? {
            let (id, bytes) = entry?;
            let board = Board::from_record(id.value(), decode(bytes.value())?);
            let card_count = card_ids(&index, board.id)?.len() as u64;
            summaries.push(board.to_summary(card_count));
        }
        Ok(summaries)
    }

    /// Store a new board and return it with its assigned id
    pub fn create(&self, draft: NewBoard) -> Result<Board> {
        let now = Utc::now().timestamp();

        let write_txn = self.db.begin_write()?;
        let board = {
            let id = next_id(&write_txn, BOARD_SEQUENCE)?;
            let record = BoardRecord {
                title: draft.title,
                owner: draft.owner,
                created_at: now,
                updated_at: now,
            };

            let mut boards = write_txn.open_table(tables::BOARDS)?;
            boards.insert(id, encode(&record)?.as_slice())?;
            Board::from_record(id, record)
        };
        write_txn.commit()?;

        tracing::info!("Board {} created", board.id);
        Ok(board)
    }

    /// Like `update`, but counts the board's cards in the same write transaction
    pub fn update_summary<F>(&self, id: u64, apply: F) -> Result<Option<BoardSummary>>
    where
        F: FnOnce(&mut Board) -> Result<()>,
    {
        let write_txn = self.db.begin_write()?;
        let summary = match apply_update(&write_txn, id, apply)? {
            Some(board) => {
                let index = write_txn.open_table(tables::BOARD_CARDS)?;
                let card_count = card_ids(&index, id)?.len() as u64;
                board.to_summary(card_count)
            }
            None => return Ok(None),
        };
        write_txn.commit()?;

        Ok(Some(summary))
    }
}

/// Read-modify-write of one board row; `owner` and `created_at` come from the stored row
fn apply_update<F>(write_txn: &WriteTransaction, id: u64, apply: F) -> Result<Option<Board>>
where
    F: FnOnce(&mut Board) -> Result<()>,
{
    let mut boards = write_txn.open_table(tables::BOARDS)?;
    let stored: BoardRecord = match boards.get(id)? {
        Some(bytes) => decode(bytes.value())?,
        None => return Ok(None),
    };

    let mut board = Board::from_record(id, stored.clone());
    apply(&mut board)?;

    let record = BoardRecord {
        title: board.title,
        owner: stored.owner,
        created_at: stored.created_at,
        updated_at: Utc::now().timestamp(),
    };
    boards.insert(id, encode(&record)?.as_slice())?;
    Ok(Some(Board::from_record(id, record)))
}

impl Repository for BoardRepo {
    type Entity = Board;
    type Draft = NewBoard;

    fn find_by_id(&self, id: u64) -> Result<Option<Board>> {
        let read_txn = self.db.begin_read()?;
        let boards = read_txn.open_table(tables::BOARDS)?;

        let board = match boards.get(id)? {
            Some(bytes) => Some(Board::from_record(id, decode(bytes.value())?)),
            None => None,
        };
        Ok(board)
    }

    fn list_all(&self) -> Result<Vec<Board>> {
        let read_txn = self.db.begin_read()?;
        let boards = read_txn.open_table(tables::BOARDS)?;

        let mut all = Vec::new();
        for entry in boards.iter()? {
            let (id, bytes) = entry?;
            all.push(Board::from_record(id.value(), decode(bytes.value())?));
        }
        Ok(all)
    }

    /// A board refers to nothing else, so this never returns `None`
    fn insert(&self, draft: NewBoard) -> Result<Option<Board>> {
        self.create(draft).map(Some)
    }

    fn update<F>(&self, id: u64, apply: F) -> Result<Option<Board>>
    where
        F: FnOnce(&mut Board) -> Result<()>,
    {
        let write_txn = self.db.begin_write()?;
        let board = match apply_update(&write_txn, id, apply)? {
            Some(board) => board,
            None => return Ok(None),
        };
        write_txn.commit()?;

        Ok(Some(board))
    }

    /// Deletes the board, every card it owns, and its index entry atomically
    fn delete(&self, id: u64) -> Result<Option<Board>> {
        let write_txn = self.db.begin_write()?;
        let (board, removed_cards) = {
            let mut boards = write_txn.open_table(tables::BOARDS)?;
            let record: BoardRecord = match boards.remove(id)? {
                Some(bytes) => decode(bytes.value())?,
                None => return Ok(None),
            };

            let mut index = write_txn.open_table(tables::BOARD_CARDS)?;
            let card_ids: Vec<u64> = match index.remove(id)? {
                Some(bytes) => decode(bytes.value())?,
                None => Vec::new(),
            };

            let mut cards = write_txn.open_table(tables::CARDS)?;
            for card_id in &card_ids {
                cards.remove(*card_id)?;
            }

            (Board::from_record(id, record), card_ids.len())
        };
        write_txn.commit()?;

        tracing::info!("Board {} deleted with {} cards", id, removed_cards);
        Ok(Some(board))
    }
}

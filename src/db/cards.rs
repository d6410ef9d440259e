use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable};

use super::{card_ids, decode, encode, next_id, tables, Db, Repository};
use crate::constants::CARD_SEQUENCE;
use crate::error::Result;
use crate::models::{Card, CardRecord, NewCard};

/// redb-backed card storage
///
/// Keeps the `BOARD_CARDS` index in step with the cards table so a board
/// delete can find every card it owns.
#[derive(Clone)]
pub struct CardRepo {
    db: Db,
}

impl CardRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

impl Repository for CardRepo {
    type Entity = Card;
    type Draft = NewCard;

    fn find_by_id(&self, id: u64) -> Result<Option<Card>> {
        let read_txn = self.db.begin_read()?;
        let cards = read_txn.open_table(tables::CARDS)?;

        let card = match cards.get(id)? {
            Some(bytes) => Some(Card::from_record(id, decode(bytes.value())?)),
            None => None,
        };
        Ok(card)
    }

    fn list_all(&self) -> Result<Vec<Card>> {
        let read_txn = self.db.begin_read()?;
        let cards = read_txn.open_table(tables::CARDS)?;

        let mut all = Vec::new();
        for entry in cards.iter()? {
            let (id, bytes) = entry?;
            all.push(Card::from_record(id.value(), decode(bytes.value())?));
        }
        Ok(all)
    }

    /// Returns `Ok(None)` if the draft's board does not exist
    fn insert(&self, draft: NewCard) -> Result<Option<Card>> {
        let now = Utc::now().timestamp();
        let board_id = draft.board_id;

        let write_txn = self.db.begin_write()?;
        let card = {
            // 1. Verify the board exists
            let boards = write_txn.open_table(tables::BOARDS)?;
            if boards.get(board_id)?.is_none() {
                tracing::warn!("Card creation for non-existent board {}", board_id);
                return Ok(None);
            }
            drop(boards);

            // 2. Store the card
            let id = next_id(&write_txn, CARD_SEQUENCE)?;
            let record = CardRecord {
                message: draft.message,
                likes: draft.likes,
                board_id,
                created_at: now,
                updated_at: now,
            };
            let mut cards = write_txn.open_table(tables::CARDS)?;
            cards.insert(id, encode(&record)?.as_slice())?;

            // 3. Append to the board's index (ids grow, so it stays sorted)
            let mut index = write_txn.open_table(tables::BOARD_CARDS)?;
            let mut ids = card_ids(&index, board_id)?;
            ids.push(id);
            index.insert(board_id, encode(&ids)?.as_slice())?;

            Card::from_record(id, record)
        };
        write_txn.commit()?;

        tracing::info!("Card {} created on board {}", card.id, board_id);
        Ok(Some(card))
    }

    fn update<F>(&self, id: u64, apply: F) -> Result<Option<Card>>
    where
        F: FnOnce(&mut Card) -> Result<()>,
    {
        let write_txn = self.db.begin_write()?;
        let card = {
            let mut cards = write_txn.open_table(tables::CARDS)?;
            let stored: CardRecord = match cards.get(id)? {
                Some(bytes) => decode(bytes.value())?,
                None => return Ok(None),
            };

            let mut card = Card::from_record(id, stored.clone());
            apply(&mut card)?;

            let record = CardRecord {
                message: card.message,
                likes: card.likes,
                board_id: stored.board_id,
                created_at: stored.created_at,
                updated_at: Utc::now().timestamp(),
            };
            cards.insert(id, encode(&record)?.as_slice())?;
            Card::from_record(id, record)
        };
        write_txn.commit()?;

        Ok(Some(card))
    }

    fn delete(&self, id: u64) -> Result<Option<Card>> {
        let write_txn = self.db.begin_write()?;
        let card = {
            let mut cards = write_txn.open_table(tables::CARDS)?;
            let record: CardRecord = match cards.remove(id)? {
                Some(bytes) => decode(bytes.value())?,
                None => return Ok(None),
            };

            let mut index = write_txn.open_table(tables::BOARD_CARDS)?;
            let mut ids = card_ids(&index, record.board_id)?;
            ids.retain(|card_id| *card_id != id);
            if ids.is_empty() {
                index.remove(record.board_id)?;
            } else {
                index.insert(record.board_id, encode(&ids)?.as_slice())?;
            }

            Card::from_record(id, record)
        };
        write_txn.commit()?;

        tracing::info!("Card {} deleted from board {}", id, card.board_id);
        Ok(Some(card))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_database, BoardRepo};
    use crate::models::{Board, NewBoard};
    use tempfile::TempDir;

    fn setup(temp_dir: &TempDir) -> (BoardRepo, CardRepo, Board) {
        let db = open_database(temp_dir.path().join("cards.db")).unwrap();
        let boards = BoardRepo::new(db.clone());
        let board = boards
            .insert(NewBoard {
                title: "Daily Affirmations".to_string(),
                owner: "Ada".to_string(),
            })
            .unwrap()
            .unwrap();
        (boards, CardRepo::new(db), board)
    }

    fn draft(board_id: u64, message: &str) -> NewCard {
        NewCard {
            message: message.to_string(),
            likes: 0,
            board_id,
        }
    }

    #[test]
    fn test_insert_and_find() {
        let temp_dir = TempDir::new().unwrap();
        let (_, cards, board) = setup(&temp_dir);

        let card = cards.insert(draft(board.id, "Stay kind")).unwrap().unwrap();

        assert_eq!(card.id, 1);
        assert_eq!(card.likes, 0);
        assert_eq!(card.board_id, board.id);
        assert_eq!(cards.find_by_id(card.id).unwrap(), Some(card));
    }

    #[test]
    fn test_insert_for_missing_board() {
        let temp_dir = TempDir::new().unwrap();
        let (_, cards, _) = setup(&temp_dir);

        assert_eq!(cards.insert(draft(99, "Stay kind")).unwrap(), None);
        assert!(cards.list_all().unwrap().is_empty());

        let next = cards.insert(draft(1, "Stay kind")).unwrap().unwrap();
        assert_eq!(next.id, 1);
    }

    #[test]
    fn test_update_keeps_board_id() {
        let temp_dir = TempDir::new().unwrap();
        let (boards, cards, board) = setup(&temp_dir);
        let other = boards
            .insert(NewBoard {
                title: "Other".to_string(),
                owner: "Eve".to_string(),
            })
            .unwrap()
            .unwrap();
        let card = cards.insert(draft(board.id, "Stay kind")).unwrap().unwrap();

        let updated = cards
            .update(card.id, |c| {
                c.message = "Stay curious".to_string();
                c.board_id = other.id;
                Ok(())
            })
            .unwrap()
            .unwrap();

        assert_eq!(updated.message, "Stay curious");
        assert_eq!(updated.board_id, board.id);
        assert!(boards.detail(other.id).unwrap().unwrap().cards.is_empty());
    }

    #[test]
    fn test_repeated_likes() {
        let temp_dir = TempDir::new().unwrap();
        let (_, cards, board) = setup(&temp_dir);
        let card = cards.insert(draft(board.id, "Stay kind")).unwrap().unwrap();

        for _ in 0..5 {
            cards
                .update(card.id, |c| {
                    c.like();
                    Ok(())
                })
                .unwrap();
        }

        assert_eq!(cards.find_by_id(card.id).unwrap().unwrap().likes, 5);
    }

    #[test]
    fn test_delete_updates_board_index() {
        let temp_dir = TempDir::new().unwrap();
        let (boards, cards, board) = setup(&temp_dir);
        let first = cards.insert(draft(board.id, "one")).unwrap().unwrap();
        let second = cards.insert(draft(board.id, "two")).unwrap().unwrap();

        assert_eq!(cards.delete(first.id).unwrap(), Some(first.clone()));
        assert_eq!(
            boards.detail(board.id).unwrap().unwrap().cards,
            vec![second.to_response()]
        );

        cards.delete(second.id).unwrap();
        assert_eq!(boards.list_summaries().unwrap()[0].card_count, 0);
        assert_eq!(cards.delete(second.id).unwrap(), None);
    }
}

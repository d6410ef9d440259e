use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{
    as_object, non_empty, optional_str, required_str, Card, CardResponse, ModelResult, Resource,
};

/// Board row stored in redb, keyed by board id
/// Uses Unix timestamps for compact storage with bincode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardRecord {
    pub title: String,
    pub owner: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A persisted board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub id: u64,
    pub title: String,
    /// Set once on creation, never updated
    pub owner: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// List view: the nested cards are replaced by their count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub id: u64,
    pub title: String,
    pub owner: String,
    pub card_count: u64,
}

/// Detail view with every card of the board, ordered by card id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDetail {
    pub id: u64,
    pub title: String,
    pub owner: String,
    pub cards: Vec<CardResponse>,
}

impl Resource for Board {
    const NAME: &'static str = "Board";
}

impl Resource for BoardSummary {
    const NAME: &'static str = Board::NAME;
}

impl Resource for BoardDetail {
    const NAME: &'static str = Board::NAME;
}

impl Board {
    pub fn from_record(id: u64, record: BoardRecord) -> Self {
        Self {
            id,
            title: record.title,
            owner: record.owner,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    pub fn to_summary(&self, card_count: u64) -> BoardSummary {
        BoardSummary {
            id: self.id,
            title: self.title.clone(),
            owner: self.owner.clone(),
            card_count,
        }
    }

    pub fn to_detail(&self, cards: &[Card]) -> BoardDetail {
        BoardDetail {
            id: self.id,
            title: self.title.clone(),
            owner: self.owner.clone(),
            cards: cards.iter().map(Card::to_response).collect(),
        }
    }
}

/// An unpersisted board; the store assigns its id and timestamps on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBoard {
    pub title: String,
    pub owner: String,
}

impl NewBoard {
    /// Build a draft from a JSON object with a non-empty `title` and an `owner`
    pub fn from_json(data: &Value) -> ModelResult<Self> {
        let object = as_object(data)?;
        let title = non_empty(required_str(object, "title")?, "title")?;
        let owner = required_str(object, "owner")?.to_string();

        Ok(Self { title, owner })
    }

    pub fn to_json(&self) -> Value {
        json!({
            "title": self.title,
            "owner": self.owner,
        })
    }
}

/// Mutable board fields; `owner` is ignored if sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardPatch {
    pub title: Option<String>,
}

impl BoardPatch {
    pub fn from_json(data: &Value) -> ModelResult<Self> {
        let object = as_object(data)?;
        let title = optional_str(object, "title")?
            .map(|title| non_empty(title, "title"))
            .transpose()?;

        Ok(Self { title })
    }

    pub fn apply(self, board: &mut Board) {
        if let Some(title) = self.title {
            board.title = title;
        }
    }
}

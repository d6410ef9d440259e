use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{
    as_object, non_empty, optional_str, optional_u64, required_str, required_u64, ModelError,
    ModelResult, Resource,
};
use crate::constants::MAX_MESSAGE_CHARS;

/// Card row stored in redb, keyed by card id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    pub message: String,
    pub likes: u64,
    pub board_id: u64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A persisted card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: u64,
    pub message: String,
    pub likes: u64,
    /// Owning board, fixed at creation
    pub board_id: u64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Card model for API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardResponse {
    pub id: u64,
    pub message: String,
    pub likes: u64,
    pub board_id: u64,
}

impl Resource for Card {
    const NAME: &'static str = "Card";
}

impl Card {
    pub fn from_record(id: u64, record: CardRecord) -> Self {
        Self {
            id,
            message: record.message,
            likes: record.likes,
            board_id: record.board_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    pub fn to_response(&self) -> CardResponse {
        CardResponse {
            id: self.id,
            message: self.message.clone(),
            likes: self.likes,
            board_id: self.board_id,
        }
    }

    pub fn like(&mut self) {
        self.likes = self.likes.saturating_add(1);
    }
}

/// An unpersisted card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub message: String,
    pub likes: u64,
    pub board_id: u64,
}

impl NewCard {
    /// Build a draft from a JSON object; `likes` defaults to 0
    ///
    /// Whether `board_id` names a live board is checked by the store on insert.
    pub fn from_json(data: &Value) -> ModelResult<Self> {
        let object = as_object(data)?;
        let message = non_empty(required_str(object, "message")?, "message")?;
        let board_id = required_u64(object, "board_id")?;
        let likes = optional_u64(object, "likes")?.unwrap_or(0);

        Ok(Self {
            message,
            likes,
            board_id,
        })
    }

    pub fn to_json(&self) -> Value {
        json!({
            "message": self.message,
            "likes": self.likes,
            "board_id": self.board_id,
        })
    }
}

/// Mutable card fields; anything left `None` stays as stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    pub message: Option<String>,
    pub likes: Option<u64>,
}

impl CardPatch {
    pub fn from_json(data: &Value) -> ModelResult<Self> {
        let object = as_object(data)?;
        let message = optional_str(object, "message")?
            .map(validate_message)
            .transpose()?;
        let likes = optional_u64(object, "likes")?;

        Ok(Self { message, likes })
    }

    pub fn apply(self, card: &mut Card) {
        if let Some(message) = self.message {
            card.message = message;
        }
        if let Some(likes) = self.likes {
            card.likes = likes;
        }
    }
}

/// Non-empty and at most `MAX_MESSAGE_CHARS` characters
fn validate_message(message: &str) -> ModelResult<String> {
    let message = non_empty(message, "message")?;
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ModelError::InvalidField("message"));
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card() -> Card {
        Card {
            id: 2,
            message: "Shine bright".to_string(),
            likes: 3,
            board_id: 1,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_to_response() {
        let body = serde_json::to_value(sample_card().to_response()).unwrap();
        assert_eq!(
            body,
            json!({ "id": 2, "message": "Shine bright", "likes": 3, "board_id": 1 })
        );
    }

    #[test]
    fn test_from_json_defaults_likes() {
        let card = NewCard::from_json(&json!({ "message": "Shine bright", "board_id": 1 })).unwrap();

        assert_eq!(card.message, "Shine bright");
        assert_eq!(card.board_id, 1);
        assert_eq!(card.likes, 0);
        assert_eq!(
            card.to_json(),
            json!({ "message": "Shine bright", "likes": 0, "board_id": 1 })
        );
    }

    #[test]
    fn test_from_json_round_trip_with_likes() {
        let data = json!({ "message": "Keep going", "likes": 7, "board_id": 3 });
        assert_eq!(NewCard::from_json(&data).unwrap().to_json(), data);
    }

    #[test]
    fn test_from_json_missing_fields() {
        assert_eq!(
            NewCard::from_json(&json!({ "board_id": 1 })),
            Err(ModelError::MissingField("message"))
        );
        assert_eq!(
            NewCard::from_json(&json!({ "message": "Shine bright" })),
            Err(ModelError::MissingField("board_id"))
        );
    }

    #[test]
    fn test_from_json_rejects_negative_likes() {
        assert_eq!(
            NewCard::from_json(&json!({ "message": "Hi", "board_id": 1, "likes": -2 })),
            Err(ModelError::InvalidField("likes"))
        );
    }

    #[test]
    fn test_patch_message_length_limit() {
        let forty = "a".repeat(MAX_MESSAGE_CHARS);
        let forty_one = "a".repeat(MAX_MESSAGE_CHARS + 1);

        assert!(CardPatch::from_json(&json!({ "message": forty })).is_ok());
        assert_eq!(
            CardPatch::from_json(&json!({ "message": forty_one })),
            Err(ModelError::InvalidField("message"))
        );
        assert_eq!(
            CardPatch::from_json(&json!({ "message": "" })),
            Err(ModelError::InvalidField("message"))
        );
    }

    #[test]
    fn test_patch_counts_characters_not_bytes() {
        let hearts = "\u{2764}".repeat(MAX_MESSAGE_CHARS);
        assert!(CardPatch::from_json(&json!({ "message": hearts })).is_ok());
    }

    #[test]
    fn test_patch_leaves_unspecified_fields() {
        let mut card = sample_card();
        CardPatch::from_json(&json!({ "likes": 10 }))
            .unwrap()
            .apply(&mut card);

        assert_eq!(card.likes, 10);
        assert_eq!(card.message, "Shine bright");
        assert_eq!(card.board_id, 1);
    }

    #[test]
    fn test_like_increments_by_one() {
        let mut card = sample_card();
        card.like();
        card.like();
        assert_eq!(card.likes, 5);
    }
}

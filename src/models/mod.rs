pub mod board;
pub mod card;

pub use board::{Board, BoardDetail, BoardPatch, BoardRecord, BoardSummary, NewBoard};
pub use card::{Card, CardPatch, CardRecord, CardResponse, NewCard};

use serde_json::{Map, Value};
use thiserror::Error;

/// A persisted entity addressable by a store-assigned id
pub trait Resource {
    /// Name used in not-found messages, e.g. `Board`
    const NAME: &'static str;
}

/// Reasons a JSON payload cannot become a draft or patch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid field `{0}`")]
    InvalidField(&'static str),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;

fn as_object(data: &Value) -> ModelResult<&Map<String, Value>> {
    data.as_object().ok_or(ModelError::NotAnObject)
}

/// Look up a field, treating an explicit `null` the same as an absent key
fn field<'a>(object: &'a Map<String, Value>, name: &'static str) -> Option<&'a Value> {
    object.get(name).filter(|value| !value.is_null())
}

fn optional_str<'a>(
    object: &'a Map<String, Value>,
    name: &'static str,
) -> ModelResult<Option<&'a str>> {
    field(object, name)
        .map(|value| value.as_str().ok_or(ModelError::InvalidField(name)))
        .transpose()
}

fn required_str<'a>(object: &'a Map<String, Value>, name: &'static str) -> ModelResult<&'a str> {
    optional_str(object, name)?.ok_or(ModelError::MissingField(name))
}

/// Non-negative integer field; negative numbers and floats are rejected
fn optional_u64(object: &Map<String, Value>, name: &'static str) -> ModelResult<Option<u64>> {
    field(object, name)
        .map(|value| value.as_u64().ok_or(ModelError::InvalidField(name)))
        .transpose()
}

fn required_u64(object: &Map<String, Value>, name: &'static str) -> ModelResult<u64> {
    optional_u64(object, name)?.ok_or(ModelError::MissingField(name))
}

fn non_empty(value: &str, name: &'static str) -> ModelResult<String> {
    if value.trim().is_empty() {
        return Err(ModelError::InvalidField(name));
    }
    Ok(value.to_string())
}

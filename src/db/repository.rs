use crate::error::Result;
use crate::models::Resource;

/// Storage capabilities shared by every resource
///
/// Each method runs in its own redb transaction and blocks; call it from
/// `spawn_blocking`. Absence is reported as `Ok(None)`, never as an error,
/// so the HTTP layer alone decides how a missing row is framed.
pub trait Repository {
    type Entity: Resource;
    /// Unpersisted form accepted by `insert`
    type Draft;

    fn find_by_id(&self, id: u64) -> Result<Option<Self::Entity>>;

    /// Every row, ordered by id ascending
    fn list_all(&self) -> Result<Vec<Self::Entity>>;

    /// Assign an id and timestamps, persist, and return the stored entity
    ///
    /// Returns `Ok(None)` without writing if the draft refers to a row that
    /// does not exist.
    fn insert(&self, draft: Self::Draft) -> Result<Option<Self::Entity>>;

    /// Load, mutate and write back in one write transaction
    ///
    /// Returns `Ok(None)` before calling `apply` if the row does not exist.
    /// An error from `apply` aborts the transaction without writing.
    /// Immutable fields are restored from the stored row after `apply`.
    fn update<F>(&self, id: u64, apply: F) -> Result<Option<Self::Entity>>
    where
        F: FnOnce(&mut Self::Entity) -> Result<()>;

    /// Remove a row (and anything it owns), returning what was removed
    fn delete(&self, id: u64) -> Result<Option<Self::Entity>>;
}

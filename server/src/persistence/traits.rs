//! Async repository trait for the persistence layer.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! the futures are guaranteed `Send`, as required by axum handlers and
//! `tokio::spawn`.

use roster::{Page, PageRequest, PlayerOrder, PlayerRecord, Predicate};
use std::future::Future;

use super::PersistenceError;

/// Store of player records keyed by a store-assigned positive id.
///
/// Implementations evaluate every condition of the predicate (an empty
/// predicate matches all records) and order pages ascending by the order's
/// attribute with ties broken by id. A single call is atomic; nothing spans
/// calls.
pub trait PlayerRepository: Send + Sync {
    /// One page of matches plus the total match count.
    fn query(
        &self,
        predicate: &Predicate,
        order: PlayerOrder,
        page: PageRequest,
    ) -> impl Future<Output = Result<Page<PlayerRecord>, PersistenceError>> + Send;

    /// Number of matches, without loading records.
    fn count_where(
        &self,
        predicate: &Predicate,
    ) -> impl Future<Output = Result<u64, PersistenceError>> + Send;

    fn get_by_key(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<PlayerRecord>, PersistenceError>> + Send;

    /// Insert a record without an id (assigning one) or overwrite the stored
    /// record with the same id. Overwriting an id that is no longer stored
    /// fails with [`PersistenceError::Missing`]. Returns the stored record.
    fn save(
        &self,
        record: &PlayerRecord,
    ) -> impl Future<Output = Result<PlayerRecord, PersistenceError>> + Send;

    /// Remove the record with `id`. Returns whether a record was removed.
    fn delete_by_key(&self, id: i64) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
}

//! Player storage.
//!
//! [`PlayerRepository`] is the contract the service consumes. Two backends
//! implement it: [`sqlite::SqlitePlayerRepository`] for durable storage and
//! [`MemoryPlayerRepository`] for tests and throwaway runs.

mod memory;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryPlayerRepository;
pub use traits::PlayerRepository;

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(String),
    #[error("No stored record with id {0}")]
    Missing(i64),
    #[error("Corrupt row {id}: {reason}")]
    CorruptRow { id: i64, reason: String },
}

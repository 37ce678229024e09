//! SQLite-backed repository implementation.
//!
//! ## Database setup
//!
//! [`Database`] wraps a `sqlx::SqlitePool` configured with:
//! - **WAL mode**: allows one writer and multiple concurrent readers.
//! - **Busy timeout**: a writer waits for the lock instead of failing at once.
//! - **Embedded migrations**: `sqlx::migrate!` runs `migrations/001_initial_schema.sql`
//!   automatically when [`Database::open`] is called. The schema is idempotent.
//!
//! ## Query translation
//!
//! [`SqlitePlayerRepository`] turns each predicate condition into a bound
//! SQL comparison (see [`helpers::push_predicate`]); values are never
//! interpolated into the statement text. Enum columns are stored as the
//! upper-case constant names and checked by the schema.

mod database;
pub(crate) mod helpers;
mod player_repo;

pub use database::Database;
pub use player_repo::SqlitePlayerRepository;

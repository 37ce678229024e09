//! Domain core for the player roster: typed search filters, paging and
//! ordering, experience levels, and payload validation.
//!
//! Nothing here performs IO. Stores evaluate a [`Predicate`] either directly
//! ([`Predicate::matches`], [`paginate`]) or by translating its
//! [`Condition`]s into their own query language.

pub mod error;
pub mod filter;
pub mod level;
pub mod payload;
pub mod player;
pub mod query;
pub mod search;

pub use error::RosterError;
pub use filter::{
    build_predicate, coerce, Comparison, Condition, Criterion, Field, FieldKind, Predicate,
    QueryOperator, Value,
};
pub use level::{experience_to_next_level, level};
pub use payload::{NewPlayer, PlayerPatch};
pub use player::{PlayerRecord, Profession, Race};
pub use query::{count_matches, paginate, Page, PageRequest, PlayerOrder};
pub use search::{ListParams, SearchParams};

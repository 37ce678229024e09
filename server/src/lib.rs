//! Player roster HTTP server: storage backends, the player service, and the
//! axum routes in front of it.

pub mod api;
pub mod config;
pub mod persistence;
pub mod service;

pub use api::{build_router, ApiError, ErrorResponse};
pub use persistence::sqlite::{Database, SqlitePlayerRepository};
pub use persistence::{MemoryPlayerRepository, PersistenceError, PlayerRepository};
pub use service::{PlayerService, ServiceError};

//! HTTP surface: maps `/rest/players` routes onto [`PlayerService`].

mod error;
mod handlers;

pub use error::{ApiError, ErrorResponse};

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::persistence::PlayerRepository;
use crate::service::PlayerService;

/// Create the HTTP router with all endpoints
pub fn build_router<R: PlayerRepository + 'static>(service: PlayerService<R>) -> Router {
    Router::new()
        .route(
            "/rest/players",
            get(handlers::list_players::<R>).post(handlers::create_player::<R>),
        )
        .route("/rest/players/count", get(handlers::count_players::<R>))
        .route(
            "/rest/players/{id}",
            get(handlers::get_player::<R>)
                .post(handlers::update_player::<R>)
                .delete(handlers::delete_player::<R>),
        )
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use roster::{ListParams, NewPlayer, PlayerPatch, PlayerRecord, SearchParams};

use super::error::ApiError;
use crate::persistence::PlayerRepository;
use crate::service::PlayerService;

type ApiResult<T> = Result<T, ApiError>;

fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    params
        .map(|Query(p)| p)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn player_id(id: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    id.map(|Path(id)| id)
        .map_err(|rejection| ApiError::InvalidIdentifier(rejection.body_text()))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(b)| b)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// GET /rest/players
pub async fn list_players<R: PlayerRepository + 'static>(
    State(service): State<PlayerService<R>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<Vec<PlayerRecord>>> {
    let params = query_params(params)?;
    let order = params.order()?;
    let page = params.page()?;
    let page = service.list(&params.search.criteria(), order, page).await?;
    Ok(Json(page.items))
}

/// GET /rest/players/count
pub async fn count_players<R: PlayerRepository + 'static>(
    State(service): State<PlayerService<R>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<u64>> {
    let params = query_params(params)?;
    let count = service.count(&params.criteria()).await?;
    Ok(Json(count))
}

/// POST /rest/players
pub async fn create_player<R: PlayerRepository + 'static>(
    State(service): State<PlayerService<R>>,
    body: Result<Json<NewPlayer>, JsonRejection>,
) -> ApiResult<Json<PlayerRecord>> {
    let payload = json_body(body)?;
    Ok(Json(service.create(payload).await?))
}

/// GET /rest/players/{id}
pub async fn get_player<R: PlayerRepository + 'static>(
    State(service): State<PlayerService<R>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<PlayerRecord>> {
    let id = player_id(id)?;
    Ok(Json(service.get(id).await?))
}

/// POST /rest/players/{id}
pub async fn update_player<R: PlayerRepository + 'static>(
    State(service): State<PlayerService<R>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PlayerPatch>, JsonRejection>,
) -> ApiResult<Json<PlayerRecord>> {
    let id = player_id(id)?;
    let patch = json_body(body)?;
    Ok(Json(service.update(id, patch).await?))
}

/// DELETE /rest/players/{id}
pub async fn delete_player<R: PlayerRepository + 'static>(
    State(service): State<PlayerService<R>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = player_id(id)?;
    service.delete(id).await?;
    Ok(StatusCode::OK)
}

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, sea_query::Expr};

use crate::{
    AppState,
    entities::movie,
    error::{AppError, AppResult},
    models::{DeleteOutcome, MoviePayload},
};

/// Ids arrive as raw path segments. One that is not an integer cannot name
/// a row, so it behaves like an id with no match. `7abc` is not coerced to 7.
fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

/// Decodes a JSON body whatever the request's content type says.
fn decode_payload(body: &[u8]) -> AppResult<MoviePayload> {
    Ok(serde_json::from_slice(body)?)
}

fn not_found(raw: &str) -> AppError {
    AppError::NotFound(format!("movie {raw}"))
}

pub async fn list_movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<movie::Model>>> {
    let movies = movie::Entity::find()
        .order_by_asc(movie::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(movies))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<movie::Model>> {
    let movie_id = parse_id(&id).ok_or_else(|| not_found(&id))?;
    let movie = movie::Entity::find_by_id(movie_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(movie))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<MoviePayload>> {
    let payload = decode_payload(&body)?;

    let model = movie::ActiveModel {
        id: Default::default(),
        title: Set(payload.title.clone()),
        description: Set(payload.description.clone()),
    };
    let inserted = movie::Entity::insert(model).exec(&state.db).await?;
    tracing::debug!(id = inserted.last_insert_id, "movie created");

    Ok(Json(payload))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<Json<MoviePayload>> {
    let payload = decode_payload(&body)?;

    if let Some(movie_id) = parse_id(&id) {
        let result = movie::Entity::update_many()
            .col_expr(movie::Column::Title, Expr::value(payload.title.clone()))
            .col_expr(movie::Column::Description, Expr::value(payload.description.clone()))
            .filter(movie::Column::Id.eq(movie_id))
            .exec(&state.db)
            .await?;
        tracing::debug!(id = movie_id, rows = result.rows_affected, "movie updated");
    }

    Ok(Json(payload))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteOutcome>> {
    let Some(movie_id) = parse_id(&id) else {
        return Ok(Json(DeleteOutcome { rows_affected: 0 }));
    };

    let result = movie::Entity::delete_by_id(movie_id).exec(&state.db).await?;
    tracing::debug!(id = movie_id, rows = result.rows_affected, "movie deleted");

    Ok(Json(result.into()))
}

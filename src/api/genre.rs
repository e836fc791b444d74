use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use super::error_response;
use crate::domain::{AbsoluteUrl, GenreInput};
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/api/genres",
    responses((status = 200, description = "Genres ordered by name", body = [Genre]))
)]
pub async fn list_genres(State(state): State<AppState>) -> impl IntoResponse {
    match state.genre_repo.find_all().await {
        Ok(genres) => (StatusCode::OK, Json(genres)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/genres",
    request_body = GenreInput,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 409, description = "Genre already exists (case insensitive match)")
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Json(payload): Json<GenreInput>,
) -> impl IntoResponse {
    match state.genre_repo.create(payload).await {
        Ok(genre) => (
            StatusCode::CREATED,
            Json(json!({
                "genre": genre,
                "url": genre.get_absolute_url(),
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/genres/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Genre found", body = Genre),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn get_genre(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.genre_repo.find_by_id(id).await {
        Ok(Some(genre)) => (StatusCode::OK, Json(genre)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Genre not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/genres/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    request_body = GenreInput,
    responses(
        (status = 200, description = "Genre renamed", body = Genre),
        (status = 404, description = "Genre not found"),
        (status = 409, description = "Genre already exists (case insensitive match)")
    )
)]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<GenreInput>,
) -> impl IntoResponse {
    match state.genre_repo.update(id, payload).await {
        Ok(genre) => (StatusCode::OK, Json(genre)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/genres/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Genre deleted, book associations dropped"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn delete_genre(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.genre_repo.delete(id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Genre deleted" }))).into_response(),
        Err(e) => error_response(e),
    }
}

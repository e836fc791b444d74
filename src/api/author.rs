use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use super::error_response;
use crate::domain::{AbsoluteUrl, AuthorInput};
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/api/authors",
    responses((status = 200, description = "Authors ordered by last then first name", body = [Author]))
)]
pub async fn list_authors(State(state): State<AppState>) -> impl IntoResponse {
    match state.author_repo.find_all().await {
        Ok(authors) => (StatusCode::OK, Json(authors)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/authors",
    request_body = AuthorInput,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid field")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Json(payload): Json<AuthorInput>,
) -> impl IntoResponse {
    match state.author_repo.create(payload).await {
        Ok(author) => (
            StatusCode::CREATED,
            Json(json!({
                "author": author,
                "url": author.get_absolute_url(),
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author found", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.author_repo.find_by_id(id).await {
        Ok(Some(author)) => (StatusCode::OK, Json(author)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Author not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    request_body = AuthorInput,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AuthorInput>,
) -> impl IntoResponse {
    match state.author_repo.update(id, payload).await {
        Ok(author) => (StatusCode::OK, Json(author)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author deleted"),
        (status = 404, description = "Author not found"),
        (status = 409, description = "Author still referenced by books")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.author_repo.delete(id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Author deleted" }))).into_response(),
        Err(e) => error_response(e),
    }
}

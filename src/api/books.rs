use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use super::error_response;
use crate::domain::{AbsoluteUrl, BookInput};
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/api/books",
    responses((status = 200, description = "All books with author and genres"))
)]
pub async fn list_books(State(state): State<AppState>) -> impl IntoResponse {
    match state.book_repo.find_all().await {
        Ok(books) => {
            let total = books.len();
            Json(json!({
                "books": books,
                "total": total
            }))
            .into_response()
        }
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Unknown author or genre"),
        (status = 409, description = "Book with this ISBN already exists")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<BookInput>,
) -> impl IntoResponse {
    match state.book_repo.create(payload).await {
        Ok(book) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Book created successfully",
                "book": book,
                "url": book.get_absolute_url(),
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.book_repo.find_by_id(id).await {
        Ok(Some(book)) => (StatusCode::OK, Json(json!({ "book": book }))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Book not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book, author or genre not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BookInput>,
) -> impl IntoResponse {
    match state.book_repo.update(id, payload).await {
        Ok(book) => (StatusCode::OK, Json(json!({ "book": book }))).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetGenresRequest {
    pub genre_ids: Vec<i32>,
}

/// Replace the book's genre set
#[utoipa::path(
    put,
    path = "/api/books/{id}/genres",
    params(("id" = i32, Path, description = "Book id")),
    request_body = SetGenresRequest,
    responses(
        (status = 200, description = "Genres replaced", body = Book),
        (status = 404, description = "Book or genre not found")
    )
)]
pub async fn set_book_genres(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<SetGenresRequest>,
) -> impl IntoResponse {
    match state.book_repo.set_genres(id, payload.genre_ids).await {
        Ok(book) => (StatusCode::OK, Json(json!({ "book": book }))).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book still has instances")
    )
)]
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.book_repo.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Book deleted successfully" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub mod author;
pub mod book_instance;
pub mod books;
pub mod catalog;
pub mod genre;
pub mod health;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde_json::json;

use crate::domain::{DetailRoute, DomainError};
use crate::infrastructure::AppState;

/// JSON API, nested under `/api`
pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Authors
        .route(
            "/authors",
            get(author::list_authors).post(author::create_author),
        )
        .route(
            "/authors/:id",
            get(author::get_author)
                .put(author::update_author)
                .delete(author::delete_author),
        )
        // Genres
        .route("/genres", get(genre::list_genres).post(genre::create_genre))
        .route(
            "/genres/:id",
            get(genre::get_genre)
                .put(genre::update_genre)
                .delete(genre::delete_genre),
        )
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/books/:id/genres", put(books::set_book_genres))
        .route(
            "/books/:id/instances",
            get(book_instance::list_book_instances),
        )
        // Book instances
        .route(
            "/instances",
            get(book_instance::list_instances).post(book_instance::create_instance),
        )
        .route(
            "/instances/:id",
            get(book_instance::get_instance)
                .put(book_instance::update_instance)
                .delete(book_instance::delete_instance),
        )
        // Summary
        .route("/catalog/summary", get(catalog::summary))
        .with_state(state)
}

/// Landing page and the named detail pages, nested at the root
pub fn catalog_router(state: AppState) -> Router {
    Router::new()
        .route("/catalog/", get(catalog::index))
        .route(&DetailRoute::Genre.pattern(), get(catalog::genre_detail))
        .route(&DetailRoute::Book.pattern(), get(catalog::book_detail))
        .route(&DetailRoute::Author.pattern(), get(catalog::author_detail))
        .with_state(state)
}

/// Map a domain failure to its HTTP status and a `{"error": ...}` body
pub fn error_response(e: DomainError) -> Response {
    let status = match &e {
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::UniquenessViolation(_) | DomainError::ReferentialRestriction(_) => {
            StatusCode::CONFLICT
        }
        DomainError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("Request failed: {}", e);
    }

    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

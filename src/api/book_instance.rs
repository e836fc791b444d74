//! Book instance API handlers using repository pattern

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use super::error_response;
use crate::domain::{CreateBookInstanceInput, UpdateBookInstanceInput};
use crate::infrastructure::AppState;

// List all instances, earliest due first
#[utoipa::path(
    get,
    path = "/api/instances",
    responses((status = 200, description = "Instances ordered by due date, undated first"))
)]
pub async fn list_instances(State(state): State<AppState>) -> impl IntoResponse {
    match state.instance_repo.find_all().await {
        Ok(instances) => {
            let total = instances.len();
            Json(json!({
                "instances": instances,
                "total": total
            }))
            .into_response()
        }
        Err(e) => error_response(e),
    }
}

// Copies of a specific book
#[utoipa::path(
    get,
    path = "/api/books/{id}/instances",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Instances of the book, undated first"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_book_instances(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
) -> impl IntoResponse {
    match state.book_repo.find_by_id(book_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Book not found" })),
            )
                .into_response();
        }
        Err(e) => return error_response(e),
    }

    match state.instance_repo.find_by_book_id(book_id).await {
        Ok(instances) => {
            let total = instances.len();
            Json(json!({
                "instances": instances,
                "total": total
            }))
            .into_response()
        }
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/instances",
    request_body = CreateBookInstanceInput,
    responses(
        (status = 201, description = "Instance created with a fresh UUID", body = BookInstance),
        (status = 400, description = "Invalid field"),
        (status = 422, description = "Unknown status code"),
        (status = 404, description = "Unknown book")
    )
)]
pub async fn create_instance(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookInstanceInput>,
) -> impl IntoResponse {
    match state.instance_repo.create(payload).await {
        Ok(instance) => (
            StatusCode::CREATED,
            Json(json!({
                "instance": instance,
                "display": instance.to_string(),
                "message": "Book instance created successfully"
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/instances/{id}",
    params(("id" = Uuid, Path, description = "Instance UUID")),
    responses(
        (status = 200, description = "Instance found", body = BookInstance),
        (status = 404, description = "Instance not found")
    )
)]
pub async fn get_instance(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.instance_repo.find_by_id(id).await {
        Ok(Some(instance)) => (StatusCode::OK, Json(json!({ "instance": instance }))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Book instance not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Any status may replace any other; no transition rules apply
#[utoipa::path(
    put,
    path = "/api/instances/{id}",
    params(("id" = Uuid, Path, description = "Instance UUID")),
    request_body = UpdateBookInstanceInput,
    responses(
        (status = 200, description = "Instance updated", body = BookInstance),
        (status = 404, description = "Instance or book not found")
    )
)]
pub async fn update_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookInstanceInput>,
) -> impl IntoResponse {
    match state.instance_repo.update(id, payload).await {
        Ok(instance) => (StatusCode::OK, Json(json!({ "instance": instance }))).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/instances/{id}",
    params(("id" = Uuid, Path, description = "Instance UUID")),
    responses(
        (status = 200, description = "Instance deleted"),
        (status = 404, description = "Instance not found")
    )
)]
pub async fn delete_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.instance_repo.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Book instance deleted successfully" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

//! Landing page, summary counts and canonical detail pages

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use once_cell::sync::OnceCell;
use sea_orm::DatabaseConnection;
use serde_json::json;
use tera::{Context, Tera};

use super::error_response;
use crate::domain::{AbsoluteUrl, CatalogSummary, DomainError};
use crate::infrastructure::AppState;
use crate::services::catalog_summary;

static TEMPLATES: OnceCell<Tera> = OnceCell::new();

/// Templates are compiled into the binary and parsed once
fn templates() -> Result<&'static Tera, tera::Error> {
    TEMPLATES.get_or_try_init(|| {
        let mut tera = Tera::default();
        tera.add_raw_template("index.html", include_str!("../../templates/index.html"))?;
        Ok(tera)
    })
}

/// Render `index.html` with the four summary counts
pub fn render_index(summary: &CatalogSummary) -> Result<String, tera::Error> {
    let context = Context::from_serialize(summary)?;
    templates()?.render("index.html", &context)
}

#[utoipa::path(
    get,
    path = "/api/catalog/summary",
    responses((status = 200, description = "Catalog counts", body = CatalogSummary))
)]
pub async fn summary(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match catalog_summary(&db).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn index(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    let summary = match catalog_summary(&db).await {
        Ok(summary) => summary,
        Err(e) => return error_response(e),
    };

    match render_index(&summary) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!("Failed to render index.html: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to render page" })),
            )
                .into_response()
        }
    }
}

fn detail<T>(result: Result<Option<T>, DomainError>) -> axum::response::Response
where
    T: AbsoluteUrl + std::fmt::Display + serde::Serialize,
{
    match result {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(json!({
                "title": record.to_string(),
                "route": T::ROUTE.name(),
                "url": record.get_absolute_url(),
                "record": record,
            })),
        )
            .into_response(),
        Ok(None) => error_response(DomainError::NotFound),
        Err(e) => error_response(e),
    }
}

pub async fn genre_detail(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    detail(state.genre_repo.find_by_id(id).await)
}

pub async fn book_detail(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    detail(state.book_repo.find_by_id(id).await)
}

pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    detail(state.author_repo.find_by_id(id).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_shows_every_count() {
        let summary = CatalogSummary {
            num_books: 11,
            num_instances: 22,
            num_instances_available: 3,
            num_authors: 4,
        };
        let page = render_index(&summary).unwrap();
        assert!(page.contains("<strong>Books:</strong> 11"));
        assert!(page.contains("<strong>Copies:</strong> 22"));
        assert!(page.contains("<strong>Copies available:</strong> 3"));
        assert!(page.contains("<strong>Authors:</strong> 4"));
    }
}

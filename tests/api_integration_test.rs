use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use locallibrary::{db, seed, server};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

// Helper to create the full application over an in-memory database
async fn setup_test_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    server::build_router(db, &[])
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let req = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;
    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_rowling_scenario_over_http() {
    let app = setup_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/authors",
        Some(json!({ "first_name": "Joanne", "last_name": "Rowling" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let author_id = body["author"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/api/books",
        Some(json!({
            "title": "Harry Potter",
            "author_id": author_id,
            "isbn": "9780747532699"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let book_id = body["book"]["id"].as_i64().unwrap();
    assert_eq!(body["book"]["author"], "Rowling, Joanne");
    assert_eq!(body["url"], format!("/catalog/book/{}/", book_id));

    for code in ["a", "o"] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/instances",
            Some(json!({
                "book_id": book_id,
                "imprint": "Bloomsbury, 1997",
                "status": code
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["instance"]["status"], code);
        assert_eq!(body["instance"]["book_title"], "Harry Potter");
    }

    let (status, body) = send(&app, "GET", "/api/catalog/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "num_books": 1,
            "num_instances": 2,
            "num_instances_available": 1,
            "num_authors": 1
        })
    );

    let (status, body) = send(&app, "GET", &format!("/api/books/{}/instances", book_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_index_page_renders_counts() {
    let app = setup_test_app().await;

    send(
        &app,
        "POST",
        "/api/authors",
        Some(json!({ "first_name": "Isaac", "last_name": "Asimov" })),
    )
    .await;

    let req = Request::builder()
        .uri("/catalog/")
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("<strong>Books:</strong> 0"));
    assert!(page.contains("<strong>Authors:</strong> 1"));
}

#[tokio::test]
async fn test_duplicate_genre_returns_conflict_with_message() {
    let app = setup_test_app().await;

    let (status, _) = send(&app, "POST", "/api/genres", Some(json!({ "name": "Drama" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/genres", Some(json!({ "name": "DRAMA" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Genre already exists (case insensitive match)");
}

#[tokio::test]
async fn test_accented_genre_case_variant_returns_conflict() {
    let app = setup_test_app().await;

    let (status, _) = send(&app, "POST", "/api/genres", Some(json!({ "name": "Épopée" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/genres", Some(json!({ "name": "ÉPOPÉE" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Genre already exists (case insensitive match)");
}

#[tokio::test]
async fn test_openapi_document_lists_every_catalog_route() {
    let app = setup_test_app().await;

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);

    let paths = body["paths"].as_object().expect("paths object");
    for (path, methods) in [
        ("/api/authors", vec!["get", "post"]),
        ("/api/authors/{id}", vec!["get", "put", "delete"]),
        ("/api/genres", vec!["get", "post"]),
        ("/api/genres/{id}", vec!["get", "put", "delete"]),
        ("/api/books", vec!["get", "post"]),
        ("/api/books/{id}", vec!["get", "put", "delete"]),
        ("/api/books/{id}/genres", vec!["put"]),
        ("/api/books/{id}/instances", vec!["get"]),
        ("/api/instances", vec!["get", "post"]),
        ("/api/instances/{id}", vec!["get", "put", "delete"]),
        ("/api/catalog/summary", vec!["get"]),
    ] {
        let entry = paths.get(path).unwrap_or_else(|| panic!("{} documented", path));
        for method in methods {
            assert!(entry.get(method).is_some(), "{} {}", method, path);
        }
    }
}

#[tokio::test]
async fn test_restricted_author_delete_returns_conflict() {
    let app = setup_test_app().await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/authors",
        Some(json!({ "first_name": "Frank", "last_name": "Herbert" })),
    )
    .await;
    let author_id = body["author"]["id"].as_i64().unwrap();

    send(
        &app,
        "POST",
        "/api/books",
        Some(json!({ "title": "Dune", "author_id": author_id, "isbn": "9780441172719" })),
    )
    .await;

    let (status, _) = send(&app, "DELETE", &format!("/api/authors/{}", author_id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, "GET", &format!("/api/authors/{}", author_id), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_status_code_is_rejected() {
    let app = setup_test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/instances",
        Some(json!({ "imprint": "Penguin", "status": "x" })),
    )
    .await;
    assert!(status.is_client_error());

    let (_, body) = send(&app, "GET", "/api/instances", None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_instance_update_can_clear_due_back() {
    let app = setup_test_app().await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/instances",
        Some(json!({ "imprint": "Penguin", "due_back": "2024-05-01", "status": "o" })),
    )
    .await;
    let id = body["instance"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["instance"]["due_back"], "2024-05-01");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/instances/{}", id),
        Some(json!({ "due_back": null, "status": "a" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["instance"]["id"], id);
    assert_eq!(body["instance"]["due_back"], Value::Null);
    assert_eq!(body["instance"]["status"], "a");
}

#[tokio::test]
async fn test_detail_pages_resolve_by_identity() {
    let app = setup_test_app().await;

    let (_, body) = send(&app, "POST", "/api/genres", Some(json!({ "name": "Poetry" }))).await;
    let url = body["url"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", &url, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Poetry");
    assert_eq!(body["route"], "genre-detail");
    assert_eq!(body["url"], url);

    let (status, _) = send(&app, "GET", "/catalog/book/42/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_missing_records_returns_not_found() {
    let app = setup_test_app().await;

    for uri in [
        "/api/authors/999",
        "/api/genres/999",
        "/api/books/999",
        "/api/instances/00000000-0000-0000-0000-000000000000",
    ] {
        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let app = setup_test_app().await;

    let req = Request::builder()
        .uri("/api/books")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("invalid json"))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    // Axum's Json extractor returns 400 for malformed JSON
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_seeded_catalog_summary() {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    seed::seed_demo_data(&db).await.expect("seed succeeds");
    // Seeding twice is a no-op
    seed::seed_demo_data(&db).await.expect("second seed succeeds");

    let app = server::build_router(db, &[]);
    let (status, body) = send(&app, "GET", "/api/catalog/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["num_books"], 2);
    assert_eq!(body["num_instances"], 3);
    assert_eq!(body["num_instances_available"], 1);
    assert_eq!(body["num_authors"], 2);
}

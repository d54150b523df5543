use std::path::PathBuf;
use axum::{
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use serde_json::{json, Value};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;
use crate::catalog::controller::{add_book, list_books, remove_book};
use crate::core::controller::AppState;
use crate::health::controller::{health, router_check, status};

pub(crate) const ENDPOINTS: [(&str, &str, &str); 6] = [
    ("GET", "/api/status", "Server status"),
    ("GET", "/api/test", "Router check"),
    ("GET", "/api/books", "Get all books"),
    ("POST", "/api/books", "Add new book"),
    ("DELETE", "/api/books/:isbn", "Delete book by ISBN"),
    ("GET", "/health", "Health check"),
];

// build_app mounts the catalog api under /api, health at the root, and serves the
// front end for every other path.
pub(crate) fn build_app(state: AppState) -> Router {
    let api = Router::new()
        .route("/status", get(status))
        .route("/test", get(router_check))
        .route("/books", get(list_books).post(add_book))
        .route("/books/:isbn", delete(remove_book));

    let router = Router::new()
        .nest("/api", api)
        .route("/health", get(health));

    let public_dir = PathBuf::from(state.config.public_dir.as_str());
    let index = public_dir.join("index.html");
    let router = if index.is_file() {
        info!("serving front end from {}", public_dir.display());
        router.fallback_service(ServeDir::new(&public_dir).fallback(ServeFile::new(index)))
    } else {
        info!("no front end found at {}", index.display());
        router.fallback(missing_front_end)
    };

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn missing_front_end() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({
        "message": "Front end would load here",
        "note": "Place the front end build files in the public directory",
    })))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Instant;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use crate::app::build_app;
    use crate::catalog::factory;
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;
    use crate::core::repository::{RepositoryStore, StoreStatus};

    async fn app_with(public_dir: &str) -> (Router, StoreStatus) {
        let mut config = Configuration::new(RepositoryStore::Memory);
        config.public_dir = public_dir.to_string();
        let status = StoreStatus::new();
        let svc = factory::create_catalog_service(&config, status.clone())
            .await.expect("should create catalog service");
        (build_app(AppState::new(config, svc, status.clone(), Instant::now())), status)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(val) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(val.to_string())
            }
            None => Body::empty(),
        };
        let res = app.clone().oneshot(req.body(body).expect("should build request"))
            .await.expect("should handle request");
        let status = res.status();
        let bytes = hyper::body::to_bytes(res.into_body()).await.expect("should read body");
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    fn parse(body: &str) -> Value {
        serde_json::from_str(body).expect("should be json")
    }

    #[tokio::test]
    async fn test_should_run_book_scenario() {
        let dir = tempfile::tempdir().expect("should create dir");
        let (app, _) = app_with(dir.path().to_str().expect("utf8 path")).await;

        let (status, body) = send(&app, Method::POST, "/api/books",
                                  Some(json!({"name": "Dune", "isbn": "001", "author": "Herbert", "pages": 412}))).await;
        assert_eq!(StatusCode::CREATED, status);
        let created = parse(&body);
        assert_eq!("Successfully added book", created["message"]);
        assert_eq!("001", created["book"]["isbn"]);

        let (status, body) = send(&app, Method::GET, "/api/books", None).await;
        assert_eq!(StatusCode::OK, status);
        let books = parse(&body);
        assert_eq!(1, books.as_array().expect("array").len());
        assert_eq!("Dune", books[0]["name"]);
        assert_eq!(412, books[0]["pages"]);

        let (status, body) = send(&app, Method::DELETE, "/api/books/001", None).await;
        assert_eq!(StatusCode::OK, status);
        let deleted = parse(&body);
        assert_eq!("Successfully deleted the book", deleted["message"]);
        assert_eq!("001", deleted["book"]["isbn"]);

        let (_, body) = send(&app, Method::GET, "/api/books", None).await;
        assert_eq!(json!([]), parse(&body));
    }

    #[tokio::test]
    async fn test_should_return_not_found_for_unknown_isbn() {
        let dir = tempfile::tempdir().expect("should create dir");
        let (app, _) = app_with(dir.path().to_str().expect("utf8 path")).await;
        let (_, before) = send(&app, Method::GET, "/api/books", None).await;

        let (status, body) = send(&app, Method::DELETE, "/api/books/999", None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(json!({"message": "Book not found"}), parse(&body));

        let (_, after) = send(&app, Method::GET, "/api/books", None).await;
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_should_reject_bad_payloads() {
        let dir = tempfile::tempdir().expect("should create dir");
        let (app, _) = app_with(dir.path().to_str().expect("utf8 path")).await;

        let (status, body) = send(&app, Method::POST, "/api/books",
                                  Some(json!({"name": "Dune", "isbn": "001", "author": "Herbert", "pages": "lots"}))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        let err = parse(&body);
        assert_eq!("Error adding book", err["message"]);
        assert_eq!("pages must be a number", err["error"]);

        let req = Request::builder().method(Method::POST).uri("/api/books")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json")).expect("should build request");
        let res = app.clone().oneshot(req).await.expect("should handle request");
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
    }

    #[tokio::test]
    async fn test_should_add_book_from_form() {
        let dir = tempfile::tempdir().expect("should create dir");
        let (app, _) = app_with(dir.path().to_str().expect("utf8 path")).await;

        let req = Request::builder().method(Method::POST).uri("/api/books")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=Dune&isbn=001&author=Frank+Herbert&pages=412")).expect("should build request");
        let res = app.clone().oneshot(req).await.expect("should handle request");
        assert_eq!(StatusCode::CREATED, res.status());
        let bytes = hyper::body::to_bytes(res.into_body()).await.expect("should read body");
        let created = parse(&String::from_utf8_lossy(&bytes));
        assert_eq!("Frank Herbert", created["book"]["author"]);
        assert_eq!(412, created["book"]["pages"]);

        let req = Request::builder().method(Method::POST).uri("/api/books")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=Dune&isbn=002&author=Herbert&pages=many")).expect("should build request");
        let res = app.clone().oneshot(req).await.expect("should handle request");
        assert_eq!(StatusCode::BAD_REQUEST, res.status());

        let (_, body) = send(&app, Method::GET, "/api/books", None).await;
        assert_eq!(1, parse(&body).as_array().expect("array").len());
    }

    #[tokio::test]
    async fn test_should_reject_array_payload() {
        let dir = tempfile::tempdir().expect("should create dir");
        let (app, _) = app_with(dir.path().to_str().expect("utf8 path")).await;

        let (status, body) = send(&app, Method::POST, "/api/books",
                                  Some(json!(["Dune", "001", "Herbert", 412]))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("request body must be an object", parse(&body)["error"]);

        let (_, body) = send(&app, Method::GET, "/api/books", None).await;
        assert_eq!(json!([]), parse(&body));
    }

    #[tokio::test]
    async fn test_should_answer_router_check() {
        let dir = tempfile::tempdir().expect("should create dir");
        let (app, _) = app_with(dir.path().to_str().expect("utf8 path")).await;
        let (status, body) = send(&app, Method::GET, "/api/test", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!({"message": "Router is working correctly!"}), parse(&body));
    }

    #[tokio::test]
    async fn test_should_report_status_when_store_down() {
        let dir = tempfile::tempdir().expect("should create dir");
        let (app, status) = app_with(dir.path().to_str().expect("utf8 path")).await;
        status.mark_disconnected();

        let (code, body) = send(&app, Method::GET, "/api/status", None).await;
        assert_eq!(StatusCode::OK, code);
        let res = parse(&body);
        assert_eq!("Server is running!", res["message"]);
        assert_eq!(false, res["store_connected"]);

        let (code, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(StatusCode::OK, code);
        assert_eq!("OK", parse(&body)["status"]);

        let (code, body) = send(&app, Method::GET, "/api/books", None).await;
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, code);
        assert!(parse(&body)["message"].is_string());
    }

    #[tokio::test]
    async fn test_should_serve_front_end() {
        let dir = tempfile::tempdir().expect("should create dir");
        fs::write(dir.path().join("index.html"), "<html>bookstore</html>").expect("should write index");
        fs::write(dir.path().join("script.js"), "angular.module('myApp', [])").expect("should write script");
        let (app, _) = app_with(dir.path().to_str().expect("utf8 path")).await;

        let (status, body) = send(&app, Method::GET, "/script.js", None).await;
        assert_eq!(StatusCode::OK, status);
        assert!(body.contains("myApp"));

        let (status, body) = send(&app, Method::GET, "/books/list", None).await;
        assert_eq!(StatusCode::OK, status);
        assert!(body.contains("bookstore"));
    }

    #[tokio::test]
    async fn test_should_report_missing_front_end() {
        let dir = tempfile::tempdir().expect("should create dir");
        let (app, _) = app_with(dir.path().to_str().expect("utf8 path")).await;
        let (status, body) = send(&app, Method::GET, "/anything", None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert!(parse(&body)["message"].is_string());
    }
}

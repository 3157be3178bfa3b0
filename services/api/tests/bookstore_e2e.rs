//! End-to-end tests for the bookstore HTTP surface (catalog, accounts, reviews).

use api_lib::{
    config::Config,
    web::{build_router, AppState},
};
use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        log_level: tracing::Level::DEBUG,
        token_secret: "e2e-secret".to_string(),
        token_ttl: chrono::Duration::hours(1),
        cors_origin: "http://localhost:3000".to_string(),
    }
}

fn create_test_app() -> Router {
    let state = AppState::in_memory(Arc::new(test_config()));
    build_router(Arc::new(state))
}

async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn post_raw(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", token);
    }
    builder.body(Body::empty()).unwrap()
}

async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/users/register",
            json!({ "username": username, "password": password }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json(
            "/users/login",
            json!({ "username": username, "password": password }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

// ==================== Catalog Tests ====================

#[tokio::test]
async fn test_list_books() {
    let app = create_test_app();

    let response = app.oneshot(get("/books")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let books = json_body(response).await;
    let books = books.as_array().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["isbn"], "12345");
    assert_eq!(books[0]["title"], "Book One");
    assert_eq!(books[0]["author"], "Author A");
    assert_eq!(books[0]["reviews"], json!([]));
    assert_eq!(books[1]["isbn"], "67890");
}

#[tokio::test]
async fn test_get_book_by_isbn() {
    let app = create_test_app();

    let response = app.clone().oneshot(get("/books/67890")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let book = json_body(response).await;
    assert_eq!(book["title"], "Book Two");

    let response = app.oneshot(get("/books/00000")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Book not found");
}

#[tokio::test]
async fn test_search_by_author_ignores_case() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(get("/books/author/author%20a"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let lower = json_body(response).await;

    let response = app
        .clone()
        .oneshot(get("/books/author/Author%20A"))
        .await
        .unwrap();
    let exact = json_body(response).await;

    assert_eq!(lower, exact);
    assert_eq!(lower.as_array().unwrap().len(), 1);
    assert_eq!(lower[0]["isbn"], "12345");

    let response = app.oneshot(get("/books/author/Nobody")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_search_by_title_substring() {
    let app = create_test_app();

    let response = app.clone().oneshot(get("/books/title/book")).await.unwrap();
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);

    let response = app.oneshot(get("/books/title/TWO")).await.unwrap();
    let books = json_body(response).await;
    assert_eq!(books.as_array().unwrap().len(), 1);
    assert_eq!(books[0]["isbn"], "67890");
}

#[tokio::test]
async fn test_reviews_of_unknown_book() {
    let app = create_test_app();

    let response = app.oneshot(get("/books/00000/reviews")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

// ==================== Account Tests ====================

#[tokio::test]
async fn test_register_rejects_duplicates_and_missing_fields() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/users/register",
            json!({ "username": "u", "password": "p" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "User registered successfully");

    let response = app
        .clone()
        .oneshot(post_json(
            "/users/register",
            json!({ "username": "u", "password": "p" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "User already exists");

    let response = app
        .clone()
        .oneshot(post_json(
            "/users/register",
            json!({ "username": "", "password": "p" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json("/users/register", json!({ "username": "v" }), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_bad_credentials() {
    let app = create_test_app();
    register_and_login(&app, "carol", "right").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/users/login",
            json!({ "username": "carol", "password": "wrong" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(response).await, "Invalid credentials");

    let response = app
        .oneshot(post_json(
            "/users/login",
            json!({ "username": "ghost", "password": "right" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unreadable_account_bodies_get_the_usual_errors() {
    let app = create_test_app();

    // No content type
    let response = app
        .clone()
        .oneshot(post_raw(
            "/users/register",
            None,
            r#"{"username":"u","password":"p"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Username and password are required");

    // Wrongly typed field
    let response = app
        .clone()
        .oneshot(post_raw(
            "/users/register",
            Some("application/json"),
            r#"{"username":5,"password":"p"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Not JSON at all
    let response = app
        .clone()
        .oneshot(post_raw("/users/login", Some("application/json"), "{username"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(response).await, "Invalid credentials");

    let response = app
        .oneshot(post_raw("/users/login", None, ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ==================== Review Tests ====================

#[tokio::test]
async fn test_review_lifecycle() {
    let app = create_test_app();
    let token = register_and_login(&app, "bob", "pw1").await;

    // Post a review
    let response = app
        .clone()
        .oneshot(post_json(
            "/books/12345/reviews",
            json!({ "review": "Loved it" }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Review added");

    // It shows up under bob's name
    let response = app.clone().oneshot(get("/books/12345/reviews")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let reviews = json_body(response).await;
    assert_eq!(reviews.as_array().unwrap().len(), 1);
    assert_eq!(reviews[0]["username"], "bob");
    assert_eq!(reviews[0]["review"], "Loved it");

    // Delete it by position
    let response = app
        .clone()
        .oneshot(delete("/books/12345/reviews/0", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Review deleted");

    let response = app.oneshot(get("/books/12345/reviews")).await.unwrap();
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_review_endpoints_require_a_token() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/books/12345/reviews",
            json!({ "review": "anonymous" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(response).await, "Access denied");

    let response = app
        .clone()
        .oneshot(post_json(
            "/books/12345/reviews",
            json!({ "review": "forged" }),
            Some("not-a-token"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Invalid token");

    let response = app
        .clone()
        .oneshot(delete("/books/12345/reviews/0", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Nothing was written
    let response = app.oneshot(get("/books/12345/reviews")).await.unwrap();
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_bearer_prefix_is_accepted() {
    let app = create_test_app();
    let token = register_and_login(&app, "dave", "pw").await;

    let response = app
        .oneshot(post_json(
            "/books/67890/reviews",
            json!({ "review": "ok" }),
            Some(&format!("Bearer {}", token)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_add_review_validation() {
    let app = create_test_app();
    let token = register_and_login(&app, "erin", "pw").await;

    let response = app
        .clone()
        .oneshot(post_json("/books/12345/reviews", json!({}), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json(
            "/books/00000/reviews",
            json!({ "review": "lost" }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Book not found");
}

#[tokio::test]
async fn test_unreadable_review_body_is_a_bad_request() {
    let app = create_test_app();
    let token = register_and_login(&app, "gina", "pw").await;

    for (content_type, body) in [
        (None, r#"{"review":"no content type"}"#),
        (Some("application/json"), r#"{"review":42}"#),
        (Some("application/json"), "not json"),
    ] {
        let mut request = post_raw("/books/12345/reviews", content_type, body);
        request
            .headers_mut()
            .insert(header::AUTHORIZATION, HeaderValue::from_str(&token).unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Review text is required");
    }

    let response = app.oneshot(get("/books/12345/reviews")).await.unwrap();
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_non_ascii_authorization_header_is_an_invalid_token() {
    let app = create_test_app();

    let mut request = post_json("/books/12345/reviews", json!({ "review": "x" }), None);
    request.headers_mut().insert(
        header::AUTHORIZATION,
        HeaderValue::from_bytes(&[0xff, b'a', b'b']).unwrap(),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Invalid token");

    let mut request = delete("/books/12345/reviews/0", None);
    request.headers_mut().insert(
        header::AUTHORIZATION,
        HeaderValue::from_bytes("Bearer café".as_bytes()).unwrap(),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_users_cannot_delete_each_others_reviews() {
    let app = create_test_app();
    let alice = register_and_login(&app, "alice", "a").await;
    let mallory = register_and_login(&app, "mallory", "m").await;

    app.clone()
        .oneshot(post_json(
            "/books/12345/reviews",
            json!({ "review": "great" }),
            Some(&alice),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(delete("/books/12345/reviews/0", Some(&mallory)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Review not found");

    let response = app
        .clone()
        .oneshot(delete("/books/12345/reviews/3", Some(&alice)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(delete("/books/12345/reviews/first", Some(&alice)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get("/books/12345/reviews")).await.unwrap();
    let reviews = json_body(response).await;
    assert_eq!(reviews.as_array().unwrap().len(), 1);
    assert_eq!(reviews[0]["username"], "alice");
}

#[tokio::test]
async fn test_delete_review_by_stable_id() {
    let app = create_test_app();
    let token = register_and_login(&app, "frank", "pw").await;

    for text in ["one", "two"] {
        app.clone()
            .oneshot(post_json(
                "/books/67890/reviews",
                json!({ "review": text }),
                Some(&token),
            ))
            .await
            .unwrap();
    }

    let response = app.clone().oneshot(get("/books/67890/reviews")).await.unwrap();
    let reviews = json_body(response).await;
    let second_id = reviews[1]["id"].as_str().unwrap().to_string();

    // Removing the first review shifts positions but not ids.
    app.clone()
        .oneshot(delete("/books/67890/reviews/0", Some(&token)))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(delete(
            &format!("/books/67890/reviews/{}", second_id),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/books/67890/reviews")).await.unwrap();
    assert_eq!(json_body(response).await, json!([]));
}

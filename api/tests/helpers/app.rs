#![allow(dead_code)]

use api::routes::routes;
use axum::{Router, body::Body, http::Request};
use headers::{Authorization, HeaderMapExt};
use serde_json::Value;
use util::{config::AdminCredential, state::AppState};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "test-password";

/// Router over a fresh in-memory database, plus the state for tests that
/// need to reach the store directly.
pub async fn make_test_app() -> (Router, AppState) {
    let db = db::test_utils::setup_test_db().await;
    let state = AppState::new(
        db,
        AdminCredential {
            username: ADMIN_USERNAME.into(),
            password: ADMIN_PASSWORD.into(),
        },
    );
    let app = Router::new().nest("/api", routes(state.clone()));
    (app, state)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Attaches the test admin's Basic credentials.
pub fn with_admin_auth(req: &mut Request<Body>) {
    req.headers_mut()
        .typed_insert(Authorization::basic(ADMIN_USERNAME, ADMIN_PASSWORD));
}

pub fn with_basic_auth(req: &mut Request<Body>, username: &str, password: &str) {
    req.headers_mut()
        .typed_insert(Authorization::basic(username, password));
}

pub async fn get_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&body).expect("Body was not valid JSON")
}

pub async fn get_text_body(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(body.to_vec()).expect("Body was not valid UTF-8")
}

/// Multipart upload of one CSV file under the `file` field, the shape the
/// import endpoint expects.
pub fn multipart_csv_request(uri: &str, csv: &str) -> Request<Body> {
    let boundary = "logbook-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"students.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{boundary}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("Failed to build request")
}

/// Registers a student through the API, as the admin dashboard would.
pub async fn create_student(app: &Router, register_number: &str, name: &str, year: &str) {
    use tower::ServiceExt;

    let mut req = json_request(
        "POST",
        "/api/students",
        &serde_json::json!({
            "register_number": register_number,
            "name": name,
            "year": year,
        }),
    );
    with_admin_auth(&mut req);
    let response = app.clone().oneshot(req).await.expect("request failed");
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
}

mod helpers;

use axum::http::StatusCode;
use helpers::app::{
    empty_request, get_json_body, get_text_body, make_test_app, multipart_csv_request,
    with_admin_auth,
};
use tower::ServiceExt;

const IMPORT_URI: &str = "/api/students/import";

#[tokio::test]
async fn import_creates_students_from_csv() {
    let (app, _state) = make_test_app().await;

    let csv = "register_number,name,year\n\
               21CS101,John Doe,1st Year\n\
               21CS102,Jane Smith,2nd Year\n";
    let mut req = multipart_csv_request(IMPORT_URI, csv);
    with_admin_auth(&mut req);
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = get_json_body(response).await;
    assert_eq!(body["data"]["created"], 2);
    assert!(body["data"]["errors"].as_array().unwrap().is_empty());
    assert_eq!(body["message"], "Successfully imported 2 students");

    let response = app
        .oneshot(empty_request("GET", "/api/students/21CS102"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = get_json_body(response).await;
    assert_eq!(body["data"]["name"], "Jane Smith");
}

#[tokio::test]
async fn import_is_duplicate_safe() {
    let (app, _state) = make_test_app().await;

    let csv = "register_number,name,year\n\
               21CS101,John Doe,1st Year\n\
               21CS102,Jane Smith,2nd Year\n";

    let mut req = multipart_csv_request(IMPORT_URI, csv);
    with_admin_auth(&mut req);
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(get_json_body(response).await["data"]["created"], 2);

    // The second pass creates nothing and reports no errors for the
    // duplicate rows; existing students are never overwritten.
    let mut req = multipart_csv_request(IMPORT_URI, csv);
    with_admin_auth(&mut req);
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = get_json_body(response).await;
    assert_eq!(body["data"]["created"], 0);
    assert!(body["data"]["errors"].as_array().unwrap().is_empty());

    let mut req = empty_request("GET", "/api/students");
    with_admin_auth(&mut req);
    let response = app.oneshot(req).await.unwrap();
    let body = get_json_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn import_skips_unusable_rows_silently_and_reports_malformed_ones() {
    let (app, _state) = make_test_app().await;

    // Row 2: fine. Row 3: no name, silent skip. Row 4: no register number,
    // silent skip. Row 5: too few columns, collected as an error. Row 6:
    // whitespace only, silent skip.
    let csv = "register_number,name,year\n\
               21CS101,John Doe,1st Year\n\
               21CS102,,2nd Year\n\
               ,Jane Smith,2nd Year\n\
               21CS103\n\
               \n";
    let mut req = multipart_csv_request(IMPORT_URI, csv);
    with_admin_auth(&mut req);
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = get_json_body(response).await;
    assert_eq!(body["data"]["created"], 1);
    let errors = body["data"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().contains("Row 5"));
}

#[tokio::test]
async fn import_accepts_any_column_order_and_quoted_fields() {
    let (app, _state) = make_test_app().await;

    let csv = "year,name,register_number\n\
               1st Year,\"Doe, John\",21CS101\n";
    let mut req = multipart_csv_request(IMPORT_URI, csv);
    with_admin_auth(&mut req);
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_json_body(response).await["data"]["created"], 1);

    let response = app
        .oneshot(empty_request("GET", "/api/students/21CS101"))
        .await
        .unwrap();
    let body = get_json_body(response).await;
    assert_eq!(body["data"]["name"], "Doe, John");
    assert_eq!(body["data"]["year"], "1st Year");
}

#[tokio::test]
async fn import_rejects_missing_required_headers() {
    let (app, _state) = make_test_app().await;

    let csv = "register_number,full_name\n21CS101,John Doe\n";
    let mut req = multipart_csv_request(IMPORT_URI, csv);
    with_admin_auth(&mut req);
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = get_json_body(response).await;
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("register_number, name, year")
    );
}

#[tokio::test]
async fn import_requires_admin_and_a_file() {
    let (app, _state) = make_test_app().await;

    let req = multipart_csv_request(IMPORT_URI, "register_number,name,year\n");
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Multipart without a `file` field.
    let boundary = "logbook-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"other\"\r\n\r\n\
         hello\r\n\
         --{boundary}--\r\n"
    );
    let mut req = axum::http::Request::builder()
        .method("POST")
        .uri(IMPORT_URI)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(axum::body::Body::from(body))
        .unwrap();
    with_admin_auth(&mut req);
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = get_json_body(response).await;
    assert_eq!(body["message"], "Missing file upload");
}

#[tokio::test]
async fn template_download_matches_required_headers() {
    let (app, _state) = make_test_app().await;

    let mut req = empty_request("GET", "/api/students/template");
    with_admin_auth(&mut req);
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=student_import_template.csv"
    );
    let body = get_text_body(response).await;
    assert!(body.starts_with("register_number,name,year\n"));
}

//! Router-level tests driving the HTTP surface with oneshot requests

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use basta::api::{self, AppState};
use basta::config::AppConfig;
use basta::db::Database;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

fn test_app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().expect("failed to create temp directory");
    let path = dir.path().join("test.db");
    let db = Database::new(path.to_str().expect("utf-8 path"), 2).expect("failed to open database");

    let state = AppState {
        db: Arc::new(db),
        config: Arc::new(AppConfig::default()),
    };
    (dir, api::router(state))
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn multipart_request(uri: &str, filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let boundary = "basta-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn health_endpoint_responds() {
    let (_dir, app) = test_app();
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn customer_crud_over_http() {
    let (_dir, app) = test_app();

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/customers",
            serde_json::json!({ "full_name": "רות כהן", "phone": "0521234567" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    let id = created["id"].as_i64().expect("id");
    assert_eq!(created["in_neighborhood"], true);

    // List
    let response = app
        .clone()
        .oneshot(
            Request::get("/api/customers")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let listed = response_json(response).await;
    assert_eq!(listed.as_array().expect("array").len(), 1);

    // Update
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/customers/{id}"),
            serde_json::json!({ "address": "רחוב הרצל 12" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = response_json(response).await;
    assert_eq!(updated["address"], "רחוב הרצל 12");
    assert_eq!(updated["full_name"], "רות כהן");

    // Delete
    let response = app
        .clone()
        .oneshot(
            Request::delete(format!("/api/customers/{id}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone
    let response = app
        .oneshot(
            Request::get(format!("/api/customers/{id}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_customer_is_404() {
    let (_dir, app) = test_app();
    let response = app
        .oneshot(
            Request::get("/api/customers/999")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["error"], "customer 999 not found");
}

#[tokio::test]
async fn empty_customer_name_is_rejected() {
    let (_dir, app) = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/customers",
            serde_json::json!({ "full_name": "  " }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bulk_create_items_reports_count() {
    let (_dir, app) = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/items/bulk",
            serde_json::json!([
                { "name": "חלה", "cost_price": 8.0, "sale_price": 12.0 },
                { "name": "עגבניות", "cost_price": 5.0, "sale_price": 7.0, "measurement_type": "weight" }
            ]),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["created"], 2);
}

#[tokio::test]
async fn upload_without_file_field_is_a_client_error() {
    let (_dir, app) = test_app();

    let boundary = "basta-test-boundary";
    let request = Request::builder()
        .method("POST")
        .uri("/api/orders/upload-sheet")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(format!("--{boundary}--\r\n")))
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "no file uploaded");
}

#[tokio::test]
async fn order_sheet_upload_creates_orders() {
    let (_dir, app) = test_app();
    let bytes = include_bytes!("fixtures/week_orders.xlsx");

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/api/orders/upload-sheet",
            "week_orders.xlsx",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            bytes,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["orders_created"], 2);
    assert_eq!(body["order_items_created"], 3);

    let response = app
        .oneshot(
            Request::get("/api/orders")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let orders = response_json(response).await;
    assert_eq!(orders.as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn customer_csv_upload_creates_customers() {
    let (_dir, app) = test_app();
    let csv = "חרות,אביטן,525649463,שלב ב כצנלסון 5\nא,ב,501234567,מחוץ לשכונה\n";

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/api/customers/upload-csv",
            "customers.csv",
            "text/csv",
            csv.as_bytes(),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["customers_created"], 2);

    let response = app
        .oneshot(
            Request::get("/api/customers")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let customers = response_json(response).await;
    let phones: Vec<_> = customers
        .as_array()
        .expect("array")
        .iter()
        .map(|c| c["phone"].as_str().expect("phone").to_string())
        .collect();
    assert!(phones.contains(&"0525649463".to_string()));
    assert!(phones.contains(&"0501234567".to_string()));
}

#[tokio::test]
async fn customer_listing_page_renders_html() {
    let (_dir, app) = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/customers",
            serde_json::json!({ "full_name": "רות כהן" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(
            Request::get("/customers")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let html = String::from_utf8(bytes.to_vec()).expect("utf-8");
    assert!(html.contains("רות כהן"));
    assert!(html.contains("/edit"));
}

#[tokio::test]
async fn week_order_rejects_malformed_key() {
    let (_dir, app) = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/weekorders",
            serde_json::json!({ "week_key": "sometime" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

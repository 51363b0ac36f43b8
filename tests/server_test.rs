//! HTTP Service Tests
//!
//! axumのルーターを`tower::ServiceExt::oneshot`で直接呼び出して検証します。

#![cfg(feature = "server")]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use shiftgrid::server::{router, AppState};
use shiftgrid::{Extractor, ExtractorBuilder, ScheduleResult, ScheduleStore, ShiftRecord};
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "shiftgrid-test-boundary";

const SCHEDULE_TXT: &str = "\tMES\tFEBRERO\nPLANTILLA\nDía\t1\t2\n\nAlice Bob\tAM\tPM\n\tM\tM\n";

struct TestApp {
    app: Router,
    state: AppState,
    upload_dir: TempDir,
}

fn test_app_with(extractor: Extractor, store: ScheduleStore) -> TestApp {
    let upload_dir = tempfile::tempdir().unwrap();
    let state = AppState::new(extractor, store, upload_dir.path());
    TestApp {
        app: router(state.clone()),
        state,
        upload_dir,
    }
}

fn test_app() -> TestApp {
    test_app_with(Extractor::default(), ScheduleStore::new())
}

/// multipartボディを組み立てる
fn multipart_body(field: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let test = test_app();
    let (status, body) = send(&test.app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_shifts_before_any_upload_is_sentinel() {
    let test = test_app();
    let (status, body) = send(&test.app, get("/shifts")).await;

    assert_eq!(status, StatusCode::OK);
    let result: ScheduleResult = serde_json::from_value(body).unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_shifts_returns_preloaded_result() {
    let preloaded = ScheduleResult {
        month: "ENERO".to_string(),
        day_numbers: vec!["1".to_string()],
        shifts: vec![ShiftRecord::new("Eva", vec!["N".to_string()])],
    };
    let test = test_app_with(Extractor::default(), ScheduleStore::with_result(preloaded));

    let (_, body) = send(&test.app, get("/shifts")).await;
    assert_eq!(body["month"], "ENERO");
    assert_eq!(body["shifts"][0]["name"], "Eva");
}

#[tokio::test]
async fn test_upload_text_schedule() {
    let test = test_app();
    let request = upload_request(multipart_body("file", "febrero.txt", SCHEDULE_TXT.as_bytes()));

    let (status, body) = send(&test.app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["month"], "FEBRERO");
    assert_eq!(body["day_numbers"], serde_json::json!(["1", "2"]));
    assert_eq!(body["shifts"].as_array().unwrap().len(), 2);
    assert_eq!(body["shifts"][0]["name"], "Alice");
    assert_eq!(body["shifts"][1]["name"], "Bob");
    assert_eq!(body["shifts"][1]["shifts"], serde_json::json!(["AM", "PM"]));

    // ストアが置き換えられ、一時ファイルは残らない
    assert_eq!(test.state.store.snapshot().month, "FEBRERO");
    assert_eq!(std::fs::read_dir(test.upload_dir.path()).unwrap().count(), 0);

    let (_, shifts) = send(&test.app, get("/shifts")).await;
    assert_eq!(shifts, body);
}

#[tokio::test]
async fn test_upload_long_filename() {
    let test = test_app();
    let file_name = format!("{}.txt", "a".repeat(300));
    let request = upload_request(multipart_body("file", &file_name, SCHEDULE_TXT.as_bytes()));

    let (status, body) = send(&test.app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["month"], "FEBRERO");
    assert_eq!(body["shifts"].as_array().unwrap().len(), 2);
    assert_eq!(std::fs::read_dir(test.upload_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_upload_workbook() {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "PLANTILLA").unwrap();
    worksheet.write_string(1, 1, "1").unwrap();
    worksheet.write_string(2, 0, "Ana").unwrap();
    worksheet.write_string(2, 1, "M").unwrap();
    let data = workbook.save_to_buffer().unwrap();

    let test = test_app();
    let (status, body) = send(&test.app, upload_request(multipart_body("file", "Turnos Marzo.XLSX", &data))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shifts"][0]["name"], "Ana");
    assert_eq!(body["shifts"][0]["shifts"], serde_json::json!(["M"]));
}

#[tokio::test]
async fn test_upload_without_anchor_replaces_store_with_sentinel() {
    let preloaded = ScheduleResult {
        month: "ENERO".to_string(),
        day_numbers: Vec::new(),
        shifts: vec![ShiftRecord::new("Eva", Vec::new())],
    };
    let test = test_app_with(Extractor::default(), ScheduleStore::with_result(preloaded));

    let request = upload_request(multipart_body("file", "notes.txt", b"nothing to see here\n"));
    let (status, body) = send(&test.app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["month"], "");
    assert!(test.state.store.snapshot().is_empty());
}

#[tokio::test]
async fn test_upload_missing_file_part() {
    let test = test_app();
    let request = upload_request(multipart_body("document", "febrero.txt", b"PLANTILLA"));

    let (status, body) = send(&test.app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file part");
}

#[tokio::test]
async fn test_upload_empty_filename() {
    let test = test_app();
    let request = upload_request(multipart_body("file", "", b""));

    let (status, body) = send(&test.app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No selected file");
}

#[tokio::test]
async fn test_upload_disallowed_extension() {
    let test = test_app();
    let request = upload_request(multipart_body("file", "schedule.pdf", b"%PDF-1.4"));

    let (status, body) = send(&test.app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "File type not allowed");
    assert!(test.state.store.snapshot().is_empty());
}

#[tokio::test]
async fn test_upload_corrupt_workbook_is_server_error() {
    let test = test_app();
    let request = upload_request(multipart_body("file", "broken.xlsx", b"not a workbook"));

    let (status, body) = send(&test.app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Source unreadable"));
    assert_eq!(std::fs::read_dir(test.upload_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_upload_over_size_limit() {
    let extractor = ExtractorBuilder::new().with_max_input_size(16).build().unwrap();
    let test = test_app_with(extractor, ScheduleStore::new());

    let request = upload_request(multipart_body("file", "big.txt", SCHEDULE_TXT.as_bytes()));
    let (status, body) = send(&test.app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("exceeds maximum"));
}

//! End-to-end tests for the upload/convert/download flow, driven
//! in-process with a mock converter.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestFixture;
use mediaconv_core::JobState;

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_status_reports_formats_and_availability() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/status").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ffmpeg_available"], true);
    let audio = response.body["supported_formats"]["audio"]
        .as_array()
        .unwrap();
    let video = response.body["supported_formats"]["video"]
        .as_array()
        .unwrap();
    assert_eq!(audio.len(), 6);
    assert_eq!(video.len(), 5);
    assert_eq!(audio[0], "mp3");
    assert_eq!(video[0], "mp4");
}

#[tokio::test]
async fn test_status_reports_unavailable_tool() {
    let fixture = TestFixture::new().await;
    fixture.converter.set_available(false).await;

    let response = fixture.get("/status").await;
    assert_eq!(response.body["ffmpeg_available"], false);
}

#[tokio::test]
async fn test_index_serves_status_document() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["supported_formats"].is_object());
}

#[tokio::test]
async fn test_upload_returns_metadata() {
    let fixture = TestFixture::new().await;
    let response = fixture.upload("song.flac", b"flac bytes").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["original_name"], "song.flac");
    assert_eq!(response.body["file_info"]["size"], 10);
    assert_eq!(response.body["file_info"]["type"], "audio");

    let file_id = response.body["file_id"].as_str().unwrap();
    let filename = response.body["filename"].as_str().unwrap();
    assert_eq!(filename, format!("{}.flac", file_id));
}

#[tokio::test]
async fn test_upload_disallowed_extension_stores_nothing() {
    let fixture = TestFixture::new().await;
    let response = fixture.upload("malware.exe", b"nope").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());

    let mut entries = tokio::fs::read_dir(fixture.store.uploads_dir())
        .await
        .unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let fixture = TestFixture::new().await;
    let response = fixture.post("/upload", json!({})).await;
    // Not a multipart request at all
    assert!(response.status.is_client_error());
}

#[tokio::test]
async fn test_convert_flow() {
    let fixture = TestFixture::new().await;
    let upload = fixture.upload("song.flac", b"flac bytes").await;
    let file_id = upload.body["file_id"].as_str().unwrap().to_string();

    let response = fixture
        .post(
            "/convert",
            json!({ "file_id": file_id, "format": "mp3", "quality": "320k" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(
        response.body["output_file"],
        format!("{}_converted.mp3", file_id)
    );
    assert_eq!(
        response.body["download_url"],
        format!("/download/{}_converted.mp3", file_id)
    );
    assert_eq!(response.body["output_info"]["type"], "audio");

    // The invoker saw the stored upload and the downloads output path
    let requests = fixture.converter.recorded_requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .input_path
        .ends_with(format!("uploads/{}.flac", file_id)));
    assert!(requests[0]
        .output_path
        .ends_with(format!("downloads/{}_converted.mp3", file_id)));

    let record = fixture.store.get_upload(&file_id).await.unwrap();
    assert_eq!(record.state, JobState::Done);
}

#[tokio::test]
async fn test_convert_same_upload_twice() {
    let fixture = TestFixture::new().await;
    let upload = fixture.upload("song.flac", b"flac bytes").await;
    let file_id = upload.body["file_id"].as_str().unwrap().to_string();

    let first = fixture
        .post("/convert", json!({ "file_id": file_id, "format": "mp3" }))
        .await;
    assert_eq!(first.status, StatusCode::OK);

    // A completed upload can be converted again to another target
    let second = fixture
        .post("/convert", json!({ "file_id": file_id, "format": "ogg" }))
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(
        second.body["output_file"],
        format!("{}_converted.ogg", file_id)
    );

    assert_eq!(fixture.converter.request_count().await, 2);
    let record = fixture.store.get_upload(&file_id).await.unwrap();
    assert_eq!(record.state, JobState::Done);
}

#[tokio::test]
async fn test_convert_defaults_quality() {
    let fixture = TestFixture::new().await;
    let upload = fixture.upload("song.wav", b"wav").await;
    let file_id = upload.body["file_id"].as_str().unwrap().to_string();

    let response = fixture
        .post("/convert", json!({ "file_id": file_id, "format": "mp3" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_convert_unknown_file_id() {
    let fixture = TestFixture::new().await;
    let response = fixture
        .post(
            "/convert",
            json!({ "file_id": "does-not-exist", "format": "mp3" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body["error"].is_string());
    assert_eq!(fixture.converter.request_count().await, 0);
}

#[tokio::test]
async fn test_convert_missing_parameters() {
    let fixture = TestFixture::new().await;
    let response = fixture.post("/convert", json!({ "format": "mp3" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Missing parameters");
}

#[tokio::test]
async fn test_convert_unknown_format() {
    let fixture = TestFixture::new().await;
    let upload = fixture.upload("song.mp3", b"mp3").await;
    let file_id = upload.body["file_id"].as_str().unwrap().to_string();

    let response = fixture
        .post("/convert", json!({ "file_id": file_id, "format": "avi" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_convert_invalid_quality() {
    let fixture = TestFixture::new().await;
    let upload = fixture.upload("clip.mp4", b"mp4").await;
    let file_id = upload.body["file_id"].as_str().unwrap().to_string();

    // Bitrate quality against a video target
    let response = fixture
        .post(
            "/convert",
            json!({ "file_id": file_id, "format": "webm", "quality": "192k" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_convert_failure_marks_job_failed() {
    let fixture = TestFixture::new().await;
    let upload = fixture.upload("song.flac", b"flac").await;
    let file_id = upload.body["file_id"].as_str().unwrap().to_string();

    fixture.converter.fail_next("encoder exploded").await;
    let response = fixture
        .post("/convert", json!({ "file_id": file_id, "format": "ogg" }))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("encoder exploded"));

    let record = fixture.store.get_upload(&file_id).await.unwrap();
    assert_eq!(record.state, JobState::Failed);
}

#[tokio::test]
async fn test_download_converted_file() {
    let fixture = TestFixture::new().await;
    let upload = fixture.upload("song.flac", b"flac").await;
    let file_id = upload.body["file_id"].as_str().unwrap().to_string();

    fixture
        .post("/convert", json!({ "file_id": file_id, "format": "mp3" }))
        .await;

    let (status, bytes, headers) = fixture
        .get_raw(&format!("/download/{}_converted.mp3", file_id))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"mock output");
    assert_eq!(
        headers["content-disposition"],
        "attachment; filename=\"converted.mp3\""
    );
}

#[tokio::test]
async fn test_download_body_is_streamed_with_length() {
    let fixture = TestFixture::new().await;
    let upload = fixture.upload("song.flac", b"flac").await;
    let file_id = upload.body["file_id"].as_str().unwrap().to_string();

    fixture
        .post("/convert", json!({ "file_id": file_id, "format": "mp3" }))
        .await;

    let (status, bytes, headers) = fixture
        .get_raw(&format!("/download/{}_converted.mp3", file_id))
        .await;

    // File serving announces the size up front and delivers the bytes
    // in chunks rather than as a single buffered body
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers["content-length"].to_str().unwrap(),
        bytes.len().to_string()
    );
    assert!(headers.contains_key("accept-ranges"));
}

#[tokio::test]
async fn test_download_missing_file() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/download/ghost_converted.mp3").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cleanup_removes_uploads() {
    let fixture = TestFixture::new().await;
    fixture.upload("a.mp3", b"a").await;
    fixture.upload("b.wav", b"b").await;

    let response = fixture.post("/cleanup", json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(response.body["message"]
        .as_str()
        .unwrap()
        .contains("2"));

    let mut entries = tokio::fs::read_dir(fixture.store.uploads_dir())
        .await
        .unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new().await;
    fixture.get("/status").await;

    let (status, bytes, _) = fixture.get_raw("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("mediaconv_http_requests_total"));
}

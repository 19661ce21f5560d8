use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use converter_backend::app::create_app;
use converter_backend::config::settings::AppConfig;
use converter_backend::infrastructure::storage::local::StorageService;
use converter_backend::infrastructure::transcode::ffmpeg::Transcoder;
use converter_backend::state::AppState;
use http_body_util::BodyExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tower::util::ServiceExt;

const BOUNDARY: &str = "----converter-test-boundary";

/// Stand-in engine: copies the input (the argument after `-i`) to the output
/// (the final argument), mimicking a successful transcode.
const OK_ENGINE: &str = r#"
in=""
prev=""
out=""
for a in "$@"; do
  [ "$prev" = "-i" ] && in="$a"
  prev="$a"
  out="$a"
done
cp "$in" "$out"
"#;

/// Stand-in engine that fails the way ffmpeg does: diagnostics on stderr,
/// nonzero exit, no output written.
const FAILING_ENGINE: &str = r#"
echo "Unsupported codec: boom" >&2
exit 1
"#;

fn write_stub(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("engine.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn test_app(engine_body: &str) -> (TempDir, Router) {
    let tmp = tempfile::tempdir().unwrap();
    let engine = write_stub(tmp.path(), engine_body);

    let config = AppConfig {
        server_port: 0,
        upload_dir: tmp.path().join("uploads"),
        output_dir: tmp.path().join("outputs"),
        ffmpeg_path: engine,
        transcode_timeout: Duration::from_secs(10),
        max_upload_bytes: 16 * 1024 * 1024,
    };

    let storage = StorageService::new(&config.upload_dir, &config.output_dir).unwrap();
    let transcoder = Transcoder::new(config.ffmpeg_path.clone(), config.transcode_timeout);
    let app = create_app(AppState::new(config, storage, transcoder));

    (tmp, app)
}

fn multipart_body(file: Option<(&str, &[u8])>, fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some((name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    for (key, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{key}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn post_job(
    app: Router,
    path: &str,
    file: Option<(&str, &[u8])>,
    fields: &[(&str, &str)],
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(file, fields)))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_download(app: Router, artifact: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/download/{artifact}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, disposition, bytes.to_vec())
}

#[tokio::test]
async fn convert_round_trips_through_download() {
    let (_tmp, app) = test_app(OK_ENGINE);

    let (status, body) = post_job(
        app.clone(),
        "/convert",
        Some(("clip.mp4", b"fake video bytes")),
        &[("format", "mkv"), ("bitrate", "2M")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let artifact = body["output_file"].as_str().unwrap();
    assert!(artifact.ends_with(".mkv"), "got {artifact}");

    let (status, disposition, bytes) = get_download(app, artifact).await;
    assert_eq!(status, StatusCode::OK);
    assert!(disposition.unwrap().contains(&format!("filename=\"{artifact}\"")));
    assert_eq!(bytes, b"fake video bytes");
}

#[tokio::test]
async fn audio_only_target_uses_requested_extension() {
    let (_tmp, app) = test_app(OK_ENGINE);

    let (status, body) = post_job(
        app.clone(),
        "/convert",
        Some(("clip.mp4", b"fake")),
        &[("format", "MP3")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let artifact = body["output_file"].as_str().unwrap();
    assert!(artifact.ends_with(".mp3"), "format is lowercased: {artifact}");
}

#[tokio::test]
async fn extract_audio_defaults_to_mp3() {
    let (_tmp, app) = test_app(OK_ENGINE);

    let (status, body) = post_job(
        app,
        "/extract-audio",
        Some(("clip.mp4", b"fake")),
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["output_file"].as_str().unwrap().ends_with(".mp3"));
}

#[tokio::test]
async fn thumbnail_is_always_a_jpg() {
    let (_tmp, app) = test_app(OK_ENGINE);

    let (status, body) = post_job(
        app,
        "/thumbnail",
        Some(("clip.mp4", b"fake")),
        &[("time", "99:59:59")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["output_file"].as_str().unwrap().ends_with(".jpg"));
}

#[tokio::test]
async fn missing_file_is_rejected_before_any_work() {
    let (tmp, app) = test_app(OK_ENGINE);

    for path in ["/convert", "/extract-audio", "/extract-video", "/thumbnail"] {
        let (status, body) = post_job(app.clone(), path, None, &[("format", "mp4")]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body["error"], "No file uploaded", "{path}");
    }

    let outputs: Vec<_> = std::fs::read_dir(tmp.path().join("outputs"))
        .unwrap()
        .collect();
    assert!(outputs.is_empty(), "no artifact may be created");
}

#[tokio::test]
async fn engine_diagnostics_pass_through_verbatim() {
    let (tmp, app) = test_app(FAILING_ENGINE);

    let (status, body) = post_job(
        app,
        "/extract-video",
        Some(("clip.mp4", b"fake")),
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("Unsupported codec: boom")
    );

    let outputs: Vec<_> = std::fs::read_dir(tmp.path().join("outputs"))
        .unwrap()
        .collect();
    assert!(outputs.is_empty(), "failed job must not leave an artifact");
}

#[tokio::test]
async fn concurrent_identical_requests_get_distinct_artifacts() {
    let (_tmp, app) = test_app(OK_ENGINE);

    let file = Some(("same.mp4", b"same bytes" as &[u8]));
    let (first, second) = tokio::join!(
        post_job(app.clone(), "/convert", file, &[]),
        post_job(app.clone(), "/convert", file, &[]),
    );

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(second.0, StatusCode::OK);
    let a = first.1["output_file"].as_str().unwrap().to_string();
    let b = second.1["output_file"].as_str().unwrap().to_string();
    assert_ne!(a, b);

    assert_eq!(get_download(app.clone(), &a).await.0, StatusCode::OK);
    assert_eq!(get_download(app, &b).await.0, StatusCode::OK);
}

#[tokio::test]
async fn unknown_artifact_is_404() {
    let (_tmp, app) = test_app(OK_ENGINE);

    let (status, _, bytes) =
        get_download(app, "7f1d6d38-0000-0000-0000-000000000000.mp4").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "File not found");
}

#[tokio::test]
async fn traversal_artifact_refs_never_resolve() {
    let (tmp, app) = test_app(OK_ENGINE);
    std::fs::write(tmp.path().join("secret.txt"), b"top secret").unwrap();

    let (status, _, _) = get_download(app, "..%2Fsecret.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

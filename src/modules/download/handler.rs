use crate::common::error::AppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

/// Stream a produced artifact back as an attachment, byte-for-byte.
#[utoipa::path(
    get,
    path = "/download/{artifact}",
    params(
        ("artifact" = String, Path, description = "Artifact reference returned by a job endpoint")
    ),
    responses(
        (status = 200, description = "Artifact bytes"),
        (status = 404, description = "File not found", body = crate::common::response::ErrorBody)
    ),
    tag = "Download"
)]
pub async fn download(
    State(state): State<AppState>,
    Path(artifact): Path<String>,
) -> Result<Response, AppError> {
    let path = state
        .storage
        .resolve_output(&artifact)
        .ok_or(AppError::NotFound)?;

    // The file can disappear between resolve and open (e.g. a purge).
    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|_| AppError::NotFound)?;

    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    let headers = [
        (header::CONTENT_TYPE, mime.as_ref().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{artifact}\""),
        ),
    ];

    Ok((headers, Body::from_stream(ReaderStream::new(file))).into_response())
}

use crate::common::error::AppError;
use crate::common::upload::UploadForm;
use crate::modules::jobs::dto::{ConvertForm, ExtractForm, JobResponse, ThumbnailForm};
use crate::modules::jobs::service::JobService;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Multipart, State},
};

#[utoipa::path(
    post,
    path = "/convert",
    request_body(content = ConvertForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Conversion complete", body = JobResponse),
        (status = 400, description = "No file uploaded", body = crate::common::response::ErrorBody),
        (status = 500, description = "Engine or storage failure", body = crate::common::response::ErrorBody)
    ),
    tag = "Jobs"
)]
pub async fn convert(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<JobResponse>, AppError> {
    let form = UploadForm::collect(multipart).await?;
    let format = form.field_or("format", "mp4").to_lowercase();
    let bitrate = form.field_or("bitrate", "1M");
    let (filename, data) = form.require_file()?;

    let res = JobService::convert(state, filename, data, &format, &bitrate).await?;
    Ok(Json(res))
}

#[utoipa::path(
    post,
    path = "/extract-audio",
    request_body(content = ExtractForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Audio extracted", body = JobResponse),
        (status = 400, description = "No file uploaded", body = crate::common::response::ErrorBody),
        (status = 500, description = "Engine or storage failure", body = crate::common::response::ErrorBody)
    ),
    tag = "Jobs"
)]
pub async fn extract_audio(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<JobResponse>, AppError> {
    let form = UploadForm::collect(multipart).await?;
    let format = form.field_or("format", "mp3").to_lowercase();
    let (filename, data) = form.require_file()?;

    let res = JobService::extract_audio(state, filename, data, &format).await?;
    Ok(Json(res))
}

#[utoipa::path(
    post,
    path = "/extract-video",
    request_body(content = ExtractForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video extracted", body = JobResponse),
        (status = 400, description = "No file uploaded", body = crate::common::response::ErrorBody),
        (status = 500, description = "Engine or storage failure", body = crate::common::response::ErrorBody)
    ),
    tag = "Jobs"
)]
pub async fn extract_video(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<JobResponse>, AppError> {
    let form = UploadForm::collect(multipart).await?;
    let format = form.field_or("format", "mp4").to_lowercase();
    let (filename, data) = form.require_file()?;

    let res = JobService::extract_video(state, filename, data, &format).await?;
    Ok(Json(res))
}

#[utoipa::path(
    post,
    path = "/thumbnail",
    request_body(content = ThumbnailForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Thumbnail captured", body = JobResponse),
        (status = 400, description = "No file uploaded", body = crate::common::response::ErrorBody),
        (status = 500, description = "Engine or storage failure", body = crate::common::response::ErrorBody)
    ),
    tag = "Jobs"
)]
pub async fn thumbnail(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<JobResponse>, AppError> {
    let form = UploadForm::collect(multipart).await?;
    let time = form.field_or("time", "00:00:01");
    let (filename, data) = form.require_file()?;

    let res = JobService::thumbnail(state, filename, data, &time).await?;
    Ok(Json(res))
}

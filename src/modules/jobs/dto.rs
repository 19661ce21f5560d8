use serde::Serialize;
use utoipa::ToSchema;

/// Multipart form consumed by `/convert`.
#[derive(ToSchema)]
pub struct ConvertForm {
    #[schema(value_type = String, format = Binary)]
    pub file: String,
    /// Target format, default "mp4". Passed to the engine unvalidated.
    pub format: Option<String>,
    /// Target bitrate, default "1M".
    pub bitrate: Option<String>,
}

/// Multipart form consumed by `/extract-audio` and `/extract-video`.
#[derive(ToSchema)]
pub struct ExtractForm {
    #[schema(value_type = String, format = Binary)]
    pub file: String,
    pub format: Option<String>,
}

/// Multipart form consumed by `/thumbnail`.
#[derive(ToSchema)]
pub struct ThumbnailForm {
    #[schema(value_type = String, format = Binary)]
    pub file: String,
    /// Seek position, default "00:00:01".
    pub time: Option<String>,
}

/// Successful job result: the artifact reference is the sole handle the
/// caller gets back, and the sole key for later download.
#[derive(Debug, Serialize, ToSchema)]
pub struct JobResponse {
    pub status: String,
    pub output_file: String,
}

impl JobResponse {
    pub fn success(output_file: String) -> Self {
        Self {
            status: "success".to_string(),
            output_file,
        }
    }
}

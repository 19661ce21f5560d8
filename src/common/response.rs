use serde::Serialize;
use utoipa::ToSchema;

/// Error body shared by every endpoint: `{"error": "..."}`.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: String) -> Self {
        Self { error }
    }
}

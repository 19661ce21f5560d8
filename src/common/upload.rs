use crate::common::error::AppError;
use axum::extract::Multipart;
use bytes::Bytes;
use std::collections::HashMap;

/// A fully collected multipart form: at most one uploaded file plus its
/// accompanying text fields. Jobs are small enough that buffering the upload
/// in memory before staging keeps the handlers simple.
pub struct UploadForm {
    file: Option<(String, Bytes)>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn collect(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut file = None;
        let mut fields = HashMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == "file" {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file = Some((filename, data));
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read field: {e}")))?;
                fields.insert(name, value);
            }
        }

        Ok(Self { file, fields })
    }

    /// The uploaded file is the only fatal-if-absent input.
    pub fn require_file(&self) -> Result<(&str, &Bytes), AppError> {
        self.file
            .as_ref()
            .map(|(name, data)| (name.as_str(), data))
            .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))
    }

    /// Trimmed field value, falling back to `default` when absent or blank.
    pub fn field_or(&self, name: &str, default: &str) -> String {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    }
}

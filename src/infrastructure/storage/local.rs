use crate::common::error::AppError;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::info;
use uuid::Uuid;

/// Staged name used when the client-supplied one is empty or unusable.
const FALLBACK_BASENAME: &str = "upload.bin";

/// Owns the two durable directories of the service: the inbound staging area
/// for uploads and the outbound area for produced artifacts. Every call
/// reflects current on-disk state; there is no caching layer.
#[derive(Clone)]
pub struct StorageService {
    upload_dir: PathBuf,
    output_dir: PathBuf,
}

impl StorageService {
    pub fn new(upload_dir: &Path, output_dir: &Path) -> Result<Self, AppError> {
        for dir in [upload_dir, output_dir] {
            fs::create_dir_all(dir).map_err(|e| {
                AppError::Storage(format!("Failed to create directory {}: {e}", dir.display()))
            })?;
        }

        info!(
            "📁 Storage ready (uploads: {}, outputs: {})",
            upload_dir.display(),
            output_dir.display()
        );

        Ok(Self {
            upload_dir: upload_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Write an upload into the staging area under a name derived from the
    /// client-supplied one. Collisions overwrite silently; no versioning.
    pub fn stage(&self, display_name: &str, bytes: &[u8]) -> Result<PathBuf, AppError> {
        let path = self.upload_dir.join(sanitize_filename(display_name));
        fs::write(&path, bytes).map_err(|e| {
            AppError::Storage(format!("Failed to stage upload {}: {e}", path.display()))
        })?;
        Ok(path)
    }

    /// Allocate a fresh artifact reference and its writable output path.
    /// A 128-bit random identifier makes collisions negligible without locks.
    pub fn allocate_output(&self, format: &str) -> (String, PathBuf) {
        let artifact = format!("{}.{}", Uuid::new_v4(), format);
        let path = self.output_dir.join(&artifact);
        (artifact, path)
    }

    /// Look up an existing artifact by its exact reference string. References
    /// that are not plain file names never resolve.
    pub fn resolve_output(&self, artifact: &str) -> Option<PathBuf> {
        if !is_plain_name(artifact) {
            return None;
        }
        let path = self.output_dir.join(artifact);
        path.is_file().then_some(path)
    }

    /// Retention hook: remove staged uploads and artifacts whose mtime is
    /// older than `max_age`. Returns how many files were removed. Nothing
    /// calls this on a schedule; retention policy is left to the operator.
    pub fn purge_older_than(&self, max_age: Duration) -> Result<usize, AppError> {
        let Some(cutoff) = SystemTime::now().checked_sub(max_age) else {
            return Ok(0);
        };

        let mut removed = 0;
        for dir in [&self.upload_dir, &self.output_dir] {
            let entries = fs::read_dir(dir).map_err(|e| {
                AppError::Storage(format!("Failed to read directory {}: {e}", dir.display()))
            })?;
            for entry in entries.flatten() {
                let Ok(meta) = entry.metadata() else { continue };
                if !meta.is_file() {
                    continue;
                }
                let expired = meta.modified().is_ok_and(|mtime| mtime < cutoff);
                if expired && fs::remove_file(entry.path()).is_ok() {
                    removed += 1;
                }
            }
        }

        if removed > 0 {
            info!("🧹 Purged {} expired file(s)", removed);
        }
        Ok(removed)
    }
}

/// Reduce a client-supplied display name to a safe basename: surrounding
/// whitespace trimmed, path components stripped so crafted names cannot
/// escape the staging directory.
fn sanitize_filename(display_name: &str) -> String {
    let trimmed = display_name.trim();
    let base = Path::new(trimmed)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    let cleaned: String = base.chars().filter(|c| !matches!(c, '\\' | '\0')).collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        FALLBACK_BASENAME.to_string()
    } else {
        cleaned
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

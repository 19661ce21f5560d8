use crate::config::env::{self, EnvKey};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
    pub ffmpeg_path: PathBuf,
    pub transcode_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 8080),
            upload_dir: PathBuf::from(env::get_or(EnvKey::UploadDir, "uploads")),
            output_dir: PathBuf::from(env::get_or(EnvKey::OutputDir, "outputs")),
            ffmpeg_path: PathBuf::from(env::get_or(EnvKey::FfmpegPath, "ffmpeg")),
            transcode_timeout: Duration::from_secs(env::get_parsed(
                EnvKey::TranscodeTimeoutSecs,
                300,
            )),
            max_upload_bytes: env::get_parsed(EnvKey::MaxUploadBytes, 512 * 1024 * 1024),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

use crate::config::settings::AppConfig;
use crate::infrastructure::storage::local::StorageService;
use crate::infrastructure::transcode::ffmpeg::Transcoder;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub storage: StorageService,
    pub transcoder: Transcoder,
}

impl AppState {
    pub fn new(config: AppConfig, storage: StorageService, transcoder: Transcoder) -> Self {
        Self {
            config,
            storage,
            transcoder,
        }
    }
}

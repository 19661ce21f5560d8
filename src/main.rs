use converter_backend::app;
use converter_backend::config::settings::AppConfig;
use converter_backend::infrastructure::storage::local::StorageService;
use converter_backend::infrastructure::transcode::ffmpeg::Transcoder;
use converter_backend::state::AppState;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting server...");

    let config = AppConfig::new();

    let storage = StorageService::new(&config.upload_dir, &config.output_dir)?;
    let transcoder = Transcoder::new(config.ffmpeg_path.clone(), config.transcode_timeout);

    let state = AppState::new(config.clone(), storage, transcoder);
    let app = app::create_app(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

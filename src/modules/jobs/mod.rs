use crate::state::AppState;
use axum::Router;
use axum::routing::post;

pub mod dto;
pub mod handler;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/convert", post(handler::convert))
        .route("/extract-audio", post(handler::extract_audio))
        .route("/extract-video", post(handler::extract_video))
        .route("/thumbnail", post(handler::thumbnail))
}

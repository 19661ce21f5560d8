use crate::state::AppState;
use axum::Router;
use axum::routing::get;

pub mod handler;

pub fn router() -> Router<AppState> {
    Router::new().route("/download/{artifact}", get(handler::download))
}

use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/prayer-times", get(handlers::get_prayer_times))
        .route(
            "/api/dark-mode",
            get(handlers::get_dark_mode).post(handlers::set_dark_mode),
        )
        .with_state(state)
}

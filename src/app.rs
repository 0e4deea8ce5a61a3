use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/news", get(handlers::news))
        .route("/results", get(handlers::results))
        .route("/taikai", get(handlers::taikai))
        .with_state(state)
}

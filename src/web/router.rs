use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// GET 與 POST 共用根路徑
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::show_form).post(handlers::submit_form))
        .layer(DefaultBodyLimit::max(handlers::MAX_FORM_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

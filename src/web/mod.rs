// src/web/mod.rs
// Web server layer: the form page plus a small JSON API

pub mod api;
pub mod controller;
pub mod error;
pub mod page;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::web::state::AppState;

/// Create the web server router
pub fn create_router(state: AppState) -> Router {
    // API routes (JSON)
    let api_router = Router::new()
        .route("/personas", get(api::list_personas))
        .route("/ask", post(api::ask));

    Router::new()
        // The form page
        .route("/", get(controller::index).post(controller::submit))
        .route("/health", get(api::health))
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

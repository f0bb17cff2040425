//! preventivo-server
//!
//! HTTP delivery of quote PDFs: picks the domain key from the request, runs
//! resolve → populate → render, and streams back the PDF or a JSON error.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod pipeline;
pub mod routes;
pub mod state;

use state::AppState;

/// The service's router. Every historical endpoint path serves the same
/// handler.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let quote = get(routes::preventivo::generate_preventivo)
        .post(routes::preventivo::generate_preventivo);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/", quote.clone())
        .route("/generate-pdf", quote.clone())
        .route("/api/generate-pdf", quote)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}

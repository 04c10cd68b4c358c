//! HTTP Routes
//!
//! - `/` - The single-page UI
//! - `/api/research` - Run the research and writing pipeline
//! - `/api/health` - Health check

pub mod health;
pub mod research;
pub mod ui;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let allowed_origins = state.config.server.cors_allowed_origins.clone();

    let router = Router::new()
        .merge(ui::router(state.clone()))
        .merge(research::router(state.clone()))
        .merge(health::router(state));

    apply_cors(router, &allowed_origins).layer(TraceLayer::new_for_http())
}

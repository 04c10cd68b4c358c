// Research Scribe - two-agent research and blog writing pipeline behind a small web UI

pub mod config;
pub mod credentials;
pub mod models;
pub mod types;
pub mod agents;
pub mod orchestrator;
pub mod pipeline;
pub mod split;
pub mod render;
pub mod llm;
pub mod search;    // Web search (Serper)
pub mod routes;
pub mod middleware;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use pipeline::{PipelineRunner, RunOutcome};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}

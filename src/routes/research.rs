use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use tracing::{info, warn};

use crate::models::{AppState, ResearchRequest};
use crate::pipeline::RunOutcome;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/research", post(start_research))
        .with_state(state)
}

/// Blocks until the whole pipeline has finished or failed
async fn start_research(
    State(state): State<AppState>,
    payload: Result<Json<ResearchRequest>, JsonRejection>,
) -> AppResult<Json<RunOutcome>> {
    // Malformed bodies get the same JSON error shape as every other failure
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected research request body");
        AppError::from(rejection)
    })?;

    info!(topic = %request.topic, "Received research request");

    let credentials = request.credentials();
    let outcome = state.runner.run_split(&request.topic, &credentials).await?;

    Ok(Json(outcome))
}

use std::sync::Arc;

use crate::config::Config;
use crate::credentials::Credentials;
use crate::pipeline::PipelineRunner;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub runner: Arc<PipelineRunner>,
}

// API Request/Response types

/// Body of `POST /api/research`. Missing keys deserialize as empty strings
/// so the credential check, not the JSON extractor, rejects them.
#[derive(serde::Deserialize)]
pub struct ResearchRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub serper_api_key: String,
}

impl ResearchRequest {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.openai_api_key.clone(), self.serper_api_key.clone())
    }
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub model: String,
}

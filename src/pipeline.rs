//! Pipeline Runner
//!
//! Checks credentials, builds the crew for a topic and hands it to the
//! orchestrator once. Nothing is retried and nothing is kept after the run.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::agents;
use crate::credentials::Credentials;
use crate::orchestrator::{ExecuteOptions, Orchestrator};
use crate::render::markdown_to_html;
use crate::split::split;
use crate::types::{AppError, AppResult};

/// Download file names offered by the UI
pub const RESEARCH_FILE_NAME: &str = "research_report.txt";
pub const BLOG_FILE_NAME: &str = "blog_post.txt";

#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub run_id: Uuid,
    /// Raw section text, used for downloads
    pub research: String,
    pub blog: String,
    /// Sections rendered from markdown for display
    pub research_html: String,
    pub blog_html: String,
    pub marker_found: bool,
    pub research_file: &'static str,
    pub blog_file: &'static str,
}

pub struct PipelineRunner {
    orchestrator: Arc<dyn Orchestrator>,
    verbose: bool,
    search_result_count: usize,
}

impl PipelineRunner {
    pub fn new(orchestrator: Arc<dyn Orchestrator>) -> Self {
        Self {
            orchestrator,
            verbose: true,
            search_result_count: agents::analyst::SEARCH_RESULT_COUNT,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_search_result_count(mut self, count: usize) -> Self {
        self.search_result_count = count;
        self
    }

    /// Run both stages and return the raw combined text
    pub async fn run(&self, topic: &str, credentials: &Credentials) -> AppResult<String> {
        credentials.validate()?;

        let crew = agents::configure_with_search(topic, self.search_result_count).into_crew();
        let options = ExecuteOptions::new(self.verbose).with_input("topic", topic);

        self.orchestrator
            .execute(&crew, &options, credentials)
            .await
            .map_err(|e| match e {
                AppError::Orchestration(_) => e,
                other => AppError::Orchestration(other.to_string()),
            })
    }

    /// Run, then split the result into its research and blog sections
    pub async fn run_split(&self, topic: &str, credentials: &Credentials) -> AppResult<RunOutcome> {
        let run_id = Uuid::new_v4();
        info!(run_id = %run_id, topic_len = topic.len(), "Starting research run");

        let text = self.run(topic, credentials).await.map_err(|e| {
            error!(run_id = %run_id, error = %e, "Research run failed");
            e
        })?;

        let sections = split(&text);
        info!(
            run_id = %run_id,
            research_len = sections.research.len(),
            blog_len = sections.blog.len(),
            marker_found = sections.marker_found,
            "Research run complete"
        );

        Ok(RunOutcome {
            run_id,
            research_html: markdown_to_html(&sections.research),
            blog_html: markdown_to_html(&sections.blog),
            research: sections.research,
            blog: sections.blog,
            marker_found: sections.marker_found,
            research_file: RESEARCH_FILE_NAME,
            blog_file: BLOG_FILE_NAME,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StubOrchestrator;
    use super::*;

    fn runner(stub: &Arc<StubOrchestrator>) -> PipelineRunner {
        PipelineRunner::new(stub.clone())
    }

    #[tokio::test]
    async fn test_missing_credentials_skip_orchestrator() {
        let stub = Arc::new(StubOrchestrator::replying("unused"));
        let runner = runner(&stub);

        for creds in [
            Credentials::new("", "serper"),
            Credentials::new("sk", ""),
            Credentials::new("", ""),
        ] {
            let err = runner.run("topic", &creds).await.unwrap_err();
            assert!(matches!(err, AppError::MissingCredentials));
        }
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_is_orchestration_error() {
        let stub = Arc::new(StubOrchestrator::failing("quota exceeded"));
        let err = runner(&stub)
            .run_split("topic", &Credentials::new("sk", "serper"))
            .await
            .unwrap_err();

        match err {
            AppError::Orchestration(message) => assert!(message.contains("quota exceeded")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_run_split() {
        let stub = Arc::new(StubOrchestrator::replying("Findings BLOG POST: Post"));
        let outcome = runner(&stub)
            .run_split("Medical AI", &Credentials::new("sk", "serper"))
            .await
            .unwrap();

        assert_eq!(outcome.research, "Findings ");
        assert_eq!(outcome.blog, " Post");
        assert_eq!(outcome.research_html, "<p>Findings</p>\n");
        assert_eq!(outcome.blog_html, "<p>Post</p>\n");
        assert!(outcome.marker_found);
        assert_eq!(outcome.research_file, "research_report.txt");
        assert_eq!(outcome.blog_file, "blog_post.txt");
        assert_eq!(stub.last_topic.lock().unwrap().as_deref(), Some("Medical AI"));
    }

    #[tokio::test]
    async fn test_missing_marker_is_not_an_error() {
        let stub = Arc::new(StubOrchestrator::replying("only research"));
        let outcome = runner(&stub)
            .run_split("topic", &Credentials::new("sk", "serper"))
            .await
            .unwrap();

        assert_eq!(outcome.research, "only research");
        assert!(outcome.blog.is_empty());
        assert!(outcome.blog_html.is_empty());
        assert!(!outcome.marker_found);
    }
}

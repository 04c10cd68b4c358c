//! Sequential Orchestrator
//!
//! Runs tasks one after another. Each task sees every earlier task's output
//! as context, and roles with web search get fresh results before their
//! model call. The final text is every task output joined by a blank line.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{ExecuteOptions, Orchestrator};
use crate::agents::{Crew, RoleDescriptor, TaskDescriptor};
use crate::config::{LLMConfig, SearchConfig};
use crate::credentials::Credentials;
use crate::llm::provider::{LLMProviderConfig, LLM};
use crate::search::{format_results, SerperClient};
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest};

/// Logs at info when the run is verbose, debug otherwise
macro_rules! step_log {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!($($arg)+);
        } else {
            debug!($($arg)+);
        }
    };
}

struct TaskOutput {
    role: String,
    text: String,
}

pub struct SequentialOrchestrator {
    llm: LLMConfig,
    search: SearchConfig,
}

impl SequentialOrchestrator {
    pub fn new(llm: LLMConfig, search: SearchConfig) -> Self {
        Self { llm, search }
    }

    /// Query for a searching role: the `topic` input, or the task itself
    fn search_query(task: &TaskDescriptor, options: &ExecuteOptions) -> String {
        options
            .inputs
            .get("topic")
            .filter(|topic| !topic.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| task.description.clone())
    }

    fn task_prompt(
        task: &TaskDescriptor,
        previous: &[TaskOutput],
        search_results: Option<&str>,
    ) -> String {
        let mut prompt = format!(
            "Current Task: {}\n\nThis is the expected criteria for your final answer: {}\n\
             You MUST return the actual complete content as the final answer, not a summary.\n",
            task.description, task.expected_output
        );

        if !previous.is_empty() {
            prompt.push_str("\nThis is the context you're working with:\n");
            for output in previous {
                prompt.push_str(&output.text);
                prompt.push_str("\n\n");
            }
        }

        if let Some(results) = search_results {
            prompt.push_str("\nWeb search results:\n");
            prompt.push_str(results);
            prompt.push('\n');
        }

        prompt.push_str("\nBegin! Give your best final answer.");
        prompt
    }

    async fn run_task(
        &self,
        llm: &LLM,
        role: &RoleDescriptor,
        task: &TaskDescriptor,
        previous: &[TaskOutput],
        options: &ExecuteOptions,
        credentials: &Credentials,
    ) -> AppResult<String> {
        let search_results = match role.search_result_count() {
            Some(count) => {
                let query = Self::search_query(task, options);
                let client = SerperClient::new(
                    credentials.search_api_key.clone(),
                    &self.search.base_url,
                    count,
                );
                let results = client.search(&query).await?;
                step_log!(options.verbose, role = %role.name, count = results.len(), "Web search finished");
                Some(format_results(&results))
            }
            None => None,
        };

        let request = LLMRequest {
            model: self.llm.model.clone(),
            messages: vec![LLMMessage::user(Self::task_prompt(
                task,
                previous,
                search_results.as_deref(),
            ))],
            max_tokens: Some(self.llm.max_tokens),
            temperature: Some(self.llm.temperature),
            system_instruction: Some(role.system_prompt()),
        };

        let response = llm.create_chat_completion(&request).await?;
        step_log!(
            options.verbose,
            role = %role.name,
            output_len = response.content.len(),
            total_tokens = response.usage.total_tokens,
            "Task finished"
        );
        Ok(response.content)
    }
}

#[async_trait]
impl Orchestrator for SequentialOrchestrator {
    async fn execute(
        &self,
        crew: &Crew,
        options: &ExecuteOptions,
        credentials: &Credentials,
    ) -> AppResult<String> {
        let llm = LLM::new(LLMProviderConfig {
            name: self.llm.provider.clone(),
            api_key: credentials.llm_api_key.clone(),
            base_url: self.llm.base_url.clone(),
        })?;

        let mut outputs: Vec<TaskOutput> = Vec::with_capacity(crew.tasks.len());

        for (index, task) in crew.tasks.iter().enumerate() {
            let role = crew.role_for(task).ok_or_else(|| {
                AppError::Orchestration(format!(
                    "Task {} is assigned to unknown role '{}'",
                    index + 1,
                    task.assigned_role
                ))
            })?;

            step_log!(
                options.verbose,
                task = index + 1,
                of = crew.tasks.len(),
                role = %role.name,
                delegation = role.allow_delegation,
                "Starting task"
            );

            let text = self
                .run_task(&llm, role, task, &outputs, options, credentials)
                .await?;
            outputs.push(TaskOutput {
                role: role.name.clone(),
                text,
            });
        }

        step_log!(
            options.verbose,
            roles = ?outputs.iter().map(|o| o.role.as_str()).collect::<Vec<_>>(),
            "Crew finished"
        );

        Ok(outputs
            .iter()
            .map(|o| o.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::configure;
    use mockito::Matcher;

    fn orchestrator(url: &str) -> SequentialOrchestrator {
        SequentialOrchestrator::new(
            LLMConfig {
                base_url: url.to_string(),
                ..LLMConfig::default()
            },
            SearchConfig {
                base_url: url.to_string(),
                result_count: 5,
            },
        )
    }

    fn completion(content: &str) -> String {
        serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }],
            "usage": { "prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2 }
        })
        .to_string()
    }

    #[test]
    fn test_task_prompt_includes_context_and_results() {
        let setup = configure("biotech");
        let previous = vec![TaskOutput {
            role: "Senior Research Analyst".to_string(),
            text: "Earlier findings".to_string(),
        }];
        let prompt = SequentialOrchestrator::task_prompt(
            &setup.writing_task,
            &previous,
            Some("1. A result"),
        );
        assert!(prompt.starts_with("Current Task: Using the research brief provided"));
        assert!(prompt.contains("This is the context you're working with:\nEarlier findings"));
        assert!(prompt.contains("Web search results:\n1. A result"));
    }

    #[test]
    fn test_search_query_falls_back_to_description() {
        let task = configure("").research_task;
        let with_topic = ExecuteOptions::new(true).with_input("topic", "fusion");
        assert_eq!(SequentialOrchestrator::search_query(&task, &with_topic), "fusion");
        let blank = ExecuteOptions::new(true).with_input("topic", " ");
        assert_eq!(SequentialOrchestrator::search_query(&task, &blank), task.description);
    }

    #[tokio::test]
    async fn test_runs_tasks_in_order() {
        let mut server = mockito::Server::new_async().await;

        let search = server
            .mock("POST", "/search")
            .match_header("x-api-key", "serper-key")
            .match_body(Matcher::PartialJson(serde_json::json!({ "q": "AI in medicine", "num": 5 })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"organic":[{"title":"Study","link":"https://study.example","snippet":"rising"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let research = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r"You are Senior Research Analyst\.".to_string()),
                Matcher::Regex("https://study.example".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion("Research findings: adoption is rising"))
            .expect(1)
            .create_async()
            .await;

        let writing = server
            .mock("POST", "/chat/completions")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r"You are Content Writer\.".to_string()),
                Matcher::Regex("adoption is rising".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion("BLOG POST:\n# AI in medicine"))
            .expect(1)
            .create_async()
            .await;

        let crew = configure("AI in medicine").into_crew();
        let options = ExecuteOptions::new(true).with_input("topic", "AI in medicine");
        let result = orchestrator(&server.url())
            .execute(&crew, &options, &Credentials::new("sk-test", "serper-key"))
            .await
            .unwrap();

        assert_eq!(
            result,
            "Research findings: adoption is rising\n\nBLOG POST:\n# AI in medicine"
        );
        search.assert_async().await;
        research.assert_async().await;
        writing.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_failure_stops_run() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/search")
            .with_status(403)
            .with_body("Unauthorized.")
            .create_async()
            .await;
        let llm = server
            .mock("POST", "/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let crew = configure("topic").into_crew();
        let err = orchestrator(&server.url())
            .execute(&crew, &ExecuteOptions::new(false), &Credentials::new("sk", "bad"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Search(_)));
        llm.assert_async().await;
    }

    #[tokio::test]
    async fn test_model_failure_stops_run() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/search")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"organic":[]}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#)
            .expect(1)
            .create_async()
            .await;

        let crew = configure("topic").into_crew();
        let err = orchestrator(&server.url())
            .execute(&crew, &ExecuteOptions::new(true), &Credentials::new("sk", "serper"))
            .await
            .unwrap_err();

        match err {
            AppError::LLMApi(message) => assert!(message.contains("Rate limit reached")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_configured_provider_must_be_supported() {
        let orchestrator = SequentialOrchestrator::new(
            LLMConfig {
                provider: "anthropic".to_string(),
                ..LLMConfig::default()
            },
            SearchConfig::default(),
        );

        let err = orchestrator
            .execute(
                &configure("topic").into_crew(),
                &ExecuteOptions::new(false),
                &Credentials::new("sk", "serper"),
            )
            .await
            .unwrap_err();

        match err {
            AppError::InvalidRequest(message) => assert!(message.contains("anthropic")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_role() {
        let mut crew = configure("topic").into_crew();
        crew.tasks[0].assigned_role = "Ghostwriter".to_string();

        let err = orchestrator("http://127.0.0.1:9")
            .execute(&crew, &ExecuteOptions::new(true), &Credentials::new("sk", "serper"))
            .await
            .unwrap_err();

        match err {
            AppError::Orchestration(message) => assert!(message.contains("Ghostwriter")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

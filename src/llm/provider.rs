use async_trait::async_trait;
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Configuration for building an LLM handle for one run
pub struct LLMProviderConfig {
    pub name: String,
    pub api_key: String,
    pub base_url: String,
}

pub struct LLM {
    adapter: Box<dyn LLMAdapter>,
}

impl LLM {
    pub fn new(provider: LLMProviderConfig) -> AppResult<Self> {
        let adapter: Box<dyn LLMAdapter> = match provider.name.as_str() {
            // Any OpenAI-compatible endpoint works through base_url
            "openai" => Box::new(crate::llm::openai::OpenAIAdapter::with_base_url(
                &provider.api_key,
                &provider.base_url,
            )),
            other => {
                return Err(AppError::InvalidRequest(format!(
                    "Unsupported provider: {}",
                    other
                )))
            }
        };

        Ok(Self { adapter })
    }

    pub async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.adapter.create_chat_completion(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_is_rejected() {
        let result = LLM::new(LLMProviderConfig {
            name: "carrier-pigeon".to_string(),
            api_key: "key".to_string(),
            base_url: "http://localhost".to_string(),
        });
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn test_openai_provider() {
        let llm = LLM::new(LLMProviderConfig {
            name: "openai".to_string(),
            api_key: "key".to_string(),
            base_url: "http://localhost".to_string(),
        });
        assert!(llm.is_ok());
    }
}

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::env;

pub const DEFAULT_TOPIC: &str = "Medical Industry using Generative AI";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub search: SearchConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

/// Model settings. The API key is never part of configuration; it arrives
/// with each run request.
#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub provider: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub base_url: String,
    pub result_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub default_topic: String,
    pub verbose: bool,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            max_tokens: 2048,
            temperature: 0.7,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://google.serper.dev".to_string(),
            result_count: 5,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_topic: DEFAULT_TOPIC.to_string(),
            verbose: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 3000,
                host: "0.0.0.0".to_string(),
                cors_allowed_origins: vec!["http://localhost:3000".to_string()],
            },
            llm: LLMConfig::default(),
            search: SearchConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; missing keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let llm_defaults = defaults.llm;
        let search_defaults = defaults.search;
        let pipeline_defaults = defaults.pipeline;

        Ok(Self {
            server: ServerConfig {
                port: match lookup("PORT") {
                    Some(port) => port
                        .parse()
                        .with_context(|| format!("Invalid PORT: {}", port))?,
                    None => defaults.server.port,
                },
                host: lookup("HOST").unwrap_or(defaults.server.host),
                cors_allowed_origins: match lookup("ALLOWED_ORIGINS") {
                    Some(origins) => origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect(),
                    None => defaults.server.cors_allowed_origins,
                },
            },
            llm: LLMConfig {
                provider: lookup("LLM_PROVIDER").unwrap_or(llm_defaults.provider),
                model: lookup("LLM_MODEL").unwrap_or(llm_defaults.model),
                base_url: lookup("OPENAI_BASE_URL").unwrap_or(llm_defaults.base_url),
                max_tokens: match lookup("LLM_MAX_TOKENS") {
                    Some(value) => value
                        .parse()
                        .with_context(|| format!("Invalid LLM_MAX_TOKENS: {}", value))?,
                    None => llm_defaults.max_tokens,
                },
                temperature: match lookup("LLM_TEMPERATURE") {
                    Some(value) => value
                        .parse()
                        .with_context(|| format!("Invalid LLM_TEMPERATURE: {}", value))?,
                    None => llm_defaults.temperature,
                },
            },
            search: SearchConfig {
                base_url: lookup("SERPER_BASE_URL").unwrap_or(search_defaults.base_url),
                result_count: match lookup("SEARCH_RESULT_COUNT") {
                    Some(value) => value
                        .parse()
                        .with_context(|| format!("Invalid SEARCH_RESULT_COUNT: {}", value))?,
                    None => search_defaults.result_count,
                },
            },
            pipeline: PipelineConfig {
                default_topic: lookup("DEFAULT_TOPIC").unwrap_or(pipeline_defaults.default_topic),
                verbose: match lookup("PIPELINE_VERBOSE") {
                    Some(value) => parse_bool(&value)
                        .with_context(|| format!("Invalid PIPELINE_VERBOSE: {}", value))?,
                    None => pipeline_defaults.verbose,
                },
            },
        })
    }
}

/// Accepts true/false, 1/0, yes/no and on/off in any case
fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(anyhow!("expected a boolean, got '{}'", other)),
    }
}

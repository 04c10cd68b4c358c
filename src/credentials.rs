//! User-supplied API keys
//!
//! Keys live only as long as the request that carried them. They are handed
//! to the orchestrator explicitly and never copied into the process
//! environment.

use crate::types::{AppError, AppResult};

#[derive(Clone)]
pub struct Credentials {
    /// Model provider (OpenAI) key
    pub llm_api_key: String,
    /// Web search provider (Serper) key
    pub search_api_key: String,
}

impl Credentials {
    pub fn new(llm_api_key: impl Into<String>, search_api_key: impl Into<String>) -> Self {
        Self {
            llm_api_key: llm_api_key.into(),
            search_api_key: search_api_key.into(),
        }
    }

    /// Both keys must be present. Their correctness is only discovered by
    /// the upstream services.
    pub fn validate(&self) -> AppResult<()> {
        if self.llm_api_key.is_empty() || self.search_api_key.is_empty() {
            return Err(AppError::MissingCredentials);
        }
        Ok(())
    }
}

/// Keys shorter than this are fully masked
const HINT_MIN_LEN: usize = 8;

/// Masked form of a key (last 4 chars only, and only for long keys)
pub fn key_hint(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() >= HINT_MIN_LEN {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("••••{}", tail)
    } else {
        "••••".to_string()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("llm_api_key", &key_hint(&self.llm_api_key))
            .field("search_api_key", &key_hint(&self.search_api_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Credentials::new("sk-abc", "serper").validate().is_ok());
        assert!(matches!(
            Credentials::new("", "serper").validate(),
            Err(AppError::MissingCredentials)
        ));
        assert!(matches!(
            Credentials::new("sk-abc", "").validate(),
            Err(AppError::MissingCredentials)
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let creds = Credentials::new("sk-secret-123456", "serper-secret-9876");
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("••••3456"));
        assert!(printed.contains("••••9876"));
    }

    #[test]
    fn test_short_key_hint() {
        assert_eq!(key_hint("abc"), "••••");
        assert_eq!(key_hint("sk-ab"), "••••");
        assert_eq!(key_hint("sk-abcd"), "••••");
        assert_eq!(key_hint("sk-abcde"), "••••bcde");
    }
}

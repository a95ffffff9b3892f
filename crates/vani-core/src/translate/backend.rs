use std::time::Duration;

use vani_llm::LlmProvider;
use vani_llm::any::AnyProvider;

use super::prompt::build_messages;
use crate::error::TranslateError;

/// One entry of the ordered LLM backend chain.
#[derive(Debug, Clone)]
pub struct LlmBackend {
    name: String,
    provider: AnyProvider,
    timeout: Duration,
    priority: u32,
}

impl LlmBackend {
    #[must_use]
    pub fn new(name: impl Into<String>, provider: AnyProvider, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            provider,
            timeout,
            priority: 0,
        }
    }

    /// Lower values are attempted first.
    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn priority(&self) -> u32 {
        self.priority
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ask the backend for a translation, bounded by its own deadline.
    ///
    /// The in-flight request is dropped when the deadline elapses.
    ///
    /// # Errors
    ///
    /// `BackendTimeout` on deadline expiry; `BackendFailure` on provider errors or
    /// blank output.
    pub async fn translate_via_llm(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        let messages = build_messages(text, source_lang, target_lang);

        let reply = tokio::time::timeout(self.timeout, self.provider.chat(&messages))
            .await
            .map_err(|_| TranslateError::BackendTimeout {
                backend: self.name.clone(),
                timeout: self.timeout,
            })?
            .map_err(|e| TranslateError::BackendFailure {
                backend: self.name.clone(),
                message: e.to_string(),
            })?;

        let trimmed = reply.trim();
        if trimmed.is_empty() {
            return Err(TranslateError::BackendFailure {
                backend: self.name.clone(),
                message: "empty response".into(),
            });
        }
        Ok(trimmed.to_owned())
    }
}

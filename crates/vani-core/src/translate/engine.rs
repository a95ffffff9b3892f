use super::backend::LlmBackend;
use super::deterministic::DeterministicTranslator;
use super::{LlmPreference, TranslationRequest, TranslationResult, word_count};

/// Auto mode attempts the LLM chain only above this many words.
pub const DEFAULT_AUTO_WORD_THRESHOLD: usize = 2;

/// Chooses between the LLM chain and the deterministic translator.
///
/// `decide` is total: every path yields text, at worst the original input.
#[derive(Debug)]
pub struct TranslationEngine {
    backends: Vec<LlmBackend>,
    deterministic: DeterministicTranslator,
    auto_word_threshold: usize,
}

impl TranslationEngine {
    /// Backends are attempted in ascending priority; ties keep insertion order.
    #[must_use]
    pub fn new(mut backends: Vec<LlmBackend>, deterministic: DeterministicTranslator) -> Self {
        backends.sort_by_key(LlmBackend::priority);
        Self {
            backends,
            deterministic,
            auto_word_threshold: DEFAULT_AUTO_WORD_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_auto_word_threshold(mut self, threshold: usize) -> Self {
        self.auto_word_threshold = threshold;
        self
    }

    #[must_use]
    pub fn has_llm(&self) -> bool {
        !self.backends.is_empty()
    }

    #[must_use]
    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(LlmBackend::name).collect()
    }

    #[must_use]
    pub fn should_use_llm(&self, text: &str, preference: LlmPreference) -> bool {
        if !self.has_llm() {
            return false;
        }
        match preference {
            LlmPreference::ForceOn => true,
            LlmPreference::ForceOff => false,
            LlmPreference::Auto => word_count(text) > self.auto_word_threshold,
        }
    }

    pub async fn decide(&self, request: &TranslationRequest) -> TranslationResult {
        let text = request.text.as_str();
        let source = request.source_lang.as_str();
        let target = request.target_lang.as_str();

        if text.trim().is_empty() {
            return TranslationResult::plain(String::new());
        }
        if source == target {
            return TranslationResult::plain(text);
        }

        if self.should_use_llm(text, request.preference) {
            for backend in &self.backends {
                match backend.translate_via_llm(text, source, target).await {
                    Ok(translated) => {
                        tracing::debug!(backend = backend.name(), source, target, "llm translation");
                        return TranslationResult {
                            translated_text: translated,
                            llm_used: true,
                            backend_used: Some(backend.name().to_owned()),
                        };
                    }
                    Err(e) => {
                        tracing::warn!(backend = backend.name(), error = %e, "llm fallback");
                    }
                }
            }
            tracing::warn!(source, target, "all llm backends failed, using deterministic translator");
        } else if request.preference == LlmPreference::ForceOn {
            tracing::debug!("llm requested but no backend configured");
        }

        TranslationResult::plain(self.deterministic.translate(text, source, target).await)
    }

    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        preference: LlmPreference,
    ) -> TranslationResult {
        self.decide(&TranslationRequest::new(
            text,
            source_lang,
            target_lang,
            preference,
        ))
        .await
    }
}

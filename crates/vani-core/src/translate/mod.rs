//! Translation decision engine and the backends it coordinates.

pub mod backend;
pub mod deterministic;
pub mod engine;
pub mod google;
pub mod prompt;

pub use backend::LlmBackend;
pub use deterministic::{DeterministicTranslator, PhraseTranslator, PhraseTranslatorFactory};
pub use engine::TranslationEngine;

/// Caller's stance on LLM translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmPreference {
    ForceOn,
    ForceOff,
    #[default]
    Auto,
}

impl From<Option<bool>> for LlmPreference {
    fn from(v: Option<bool>) -> Self {
        match v {
            Some(true) => Self::ForceOn,
            Some(false) => Self::ForceOff,
            None => Self::Auto,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub preference: LlmPreference,
}

impl TranslationRequest {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        preference: LlmPreference,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            preference,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub translated_text: String,
    pub llm_used: bool,
    pub backend_used: Option<String>,
}

impl TranslationResult {
    pub(crate) fn plain(text: impl Into<String>) -> Self {
        Self {
            translated_text: text.into(),
            llm_used: false,
            backend_used: None,
        }
    }
}

/// Whitespace-delimited token count.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_from_option() {
        assert_eq!(LlmPreference::from(Some(true)), LlmPreference::ForceOn);
        assert_eq!(LlmPreference::from(Some(false)), LlmPreference::ForceOff);
        assert_eq!(LlmPreference::from(None), LlmPreference::Auto);
        assert_eq!(LlmPreference::default(), LlmPreference::Auto);
    }

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t"), 0);
        assert_eq!(word_count("Hello"), 1);
        assert_eq!(word_count("  good\tmorning \n farmer "), 3);
        assert_eq!(word_count("धान की फसल"), 3);
    }
}

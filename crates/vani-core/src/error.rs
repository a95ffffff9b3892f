use std::time::Duration;

use thiserror::Error;

/// Failures inside the translation path. Backend variants never escape the engine.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("unknown language code '{0}'")]
    UnknownLanguage(String),

    #[error("backend '{backend}' timed out after {}s", timeout.as_secs_f32())]
    BackendTimeout { backend: String, timeout: Duration },

    #[error("backend '{backend}' failed: {message}")]
    BackendFailure { backend: String, message: String },
}

/// Failures surfaced to callers of the transcription path.
#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("speech could not be understood")]
    Unintelligible,

    #[error("speech service unavailable: {0}")]
    SpeechUnavailable(String),

    #[error("could not process audio format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Language(#[from] TranslateError),
}

impl From<vani_llm::LlmError> for TranscribeError {
    fn from(e: vani_llm::LlmError) -> Self {
        match e {
            vani_llm::LlmError::Unintelligible => Self::Unintelligible,
            other => Self::SpeechUnavailable(other.to_string()),
        }
    }
}

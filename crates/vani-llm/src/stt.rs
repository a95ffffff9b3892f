use std::future::Future;
use std::pin::Pin;

use crate::error::LlmError;

#[derive(Debug, Clone)]
pub struct Transcription {
    pub text: String,
    pub language: Option<String>,
    pub duration_secs: Option<f32>,
}

/// Async trait for speech-to-text backends.
pub trait SpeechToText: Send + Sync {
    /// Transcribe audio bytes into text.
    ///
    /// `locale` is a recognition locale tag such as `hi-IN`; backends that only
    /// take a language hint use its primary subtag.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Unintelligible` when the audio yields no speech, and
    /// `LlmError::TranscriptionFailed` or a transport error if the backend rejects the request.
    fn transcribe(
        &self,
        audio: &[u8],
        filename: Option<&str>,
        locale: Option<&str>,
    ) -> Pin<Box<dyn Future<Output = Result<Transcription, LlmError>> + Send + '_>>;
}

/// Primary language subtag of a locale tag: `hi-IN` -> `hi`.
#[must_use]
pub fn primary_subtag(locale: &str) -> &str {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
}

//! Speech-to-text orchestration: recognizer output in, native and English text out.

use std::sync::Arc;

use vani_llm::SpeechToText;

use crate::audio::AudioTranscoder;
use crate::error::TranscribeError;
use crate::language::{self, ENGLISH};
use crate::translate::{LlmPreference, TranslationEngine};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TranscriptionOutput {
    pub native_text: String,
    pub english_text: String,
    pub language: String,
}

pub struct Transcriber {
    stt: Option<Arc<dyn SpeechToText>>,
    transcoder: Arc<dyn AudioTranscoder>,
    engine: Arc<TranslationEngine>,
}

impl Transcriber {
    #[must_use]
    pub fn new(
        stt: Option<Arc<dyn SpeechToText>>,
        transcoder: Arc<dyn AudioTranscoder>,
        engine: Arc<TranslationEngine>,
    ) -> Self {
        Self {
            stt,
            transcoder,
            engine,
        }
    }

    #[must_use]
    pub fn has_stt(&self) -> bool {
        self.stt.is_some()
    }

    /// Pair recognized text with its English rendering.
    ///
    /// English input is copied verbatim and the engine is not consulted.
    pub async fn transcribe(
        &self,
        native_text: &str,
        spoken_lang: &str,
        preference: LlmPreference,
    ) -> TranscriptionOutput {
        let english_text = if spoken_lang == ENGLISH {
            native_text.to_owned()
        } else {
            self.engine
                .translate(native_text, spoken_lang, ENGLISH, preference)
                .await
                .translated_text
        };
        TranscriptionOutput {
            native_text: native_text.to_owned(),
            english_text,
            language: spoken_lang.to_owned(),
        }
    }

    /// Full path from uploaded audio bytes.
    ///
    /// # Errors
    ///
    /// `Language` for unregistered codes, `UnsupportedFormat` when the audio is
    /// rejected, `Unintelligible` for empty recognition and `SpeechUnavailable`
    /// when no recognizer is configured or it fails.
    pub async fn transcribe_audio(
        &self,
        audio: Vec<u8>,
        spoken_lang: &str,
        preference: LlmPreference,
    ) -> Result<TranscriptionOutput, TranscribeError> {
        let locale = language::resolve_locale(spoken_lang)?;
        let stt = self
            .stt
            .as_ref()
            .ok_or_else(|| TranscribeError::SpeechUnavailable("no recognizer configured".into()))?;

        let prepared = self.transcoder.prepare(audio)?;
        let filename = prepared.filename();
        let recognized = stt
            .transcribe(&prepared.bytes, Some(&filename), Some(locale))
            .await?;

        let native_text = recognized.text.trim();
        if native_text.is_empty() {
            return Err(TranscribeError::Unintelligible);
        }
        tracing::info!(lang = spoken_lang, chars = native_text.len(), "speech recognized");

        Ok(self.transcribe(native_text, spoken_lang, preference).await)
    }
}

impl std::fmt::Debug for Transcriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcriber")
            .field("has_stt", &self.stt.is_some())
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

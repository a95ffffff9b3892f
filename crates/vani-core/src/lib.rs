//! Translation decision engine, transcription orchestrator, configuration loading.

pub mod audio;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod language;
pub mod transcribe;
pub mod translate;
pub mod vault;

pub use error::{TranscribeError, TranslateError};
pub use transcribe::{TranscriptionOutput, Transcriber};
pub use translate::{LlmPreference, TranslationEngine, TranslationRequest, TranslationResult};

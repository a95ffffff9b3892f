//! LLM and speech-to-text provider abstraction and backend implementations.

pub mod any;
pub mod compatible;
pub mod error;
pub mod gemini;
pub mod http;
#[cfg(feature = "mock")]
pub mod mock;
pub mod openai;
pub mod provider;
pub(crate) mod retry;
pub mod stt;
pub mod whisper;

pub use error::LlmError;
pub use provider::LlmProvider;
pub use stt::SpeechToText;

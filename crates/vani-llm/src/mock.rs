//! Test-only mock providers.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::LlmError;
use crate::provider::{LlmProvider, Message};
use crate::stt::{SpeechToText, Transcription};

#[derive(Debug, Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<String>>>,
    calls: Arc<AtomicUsize>,
    last_messages: Arc<Mutex<Vec<Message>>>,
    pub provider_name: String,
    pub default_response: String,
    pub fail_chat: bool,
    /// Milliseconds to sleep before returning a response.
    pub delay_ms: u64,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
            last_messages: Arc::new(Mutex::new(Vec::new())),
            provider_name: "mock".into(),
            default_response: "mock response".into(),
            fail_chat: false,
            delay_ms: 0,
        }
    }
}

impl MockProvider {
    #[must_use]
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_chat: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    #[must_use]
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }

    #[must_use]
    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    /// Number of `chat` invocations so far, shared across clones.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn last_messages(&self) -> Vec<Message> {
        self.last_messages.lock().unwrap().clone()
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages.to_vec();
        if self.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        }
        if self.fail_chat {
            return Err(LlmError::Other("mock LLM error".into()));
        }
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(self.default_response.clone())
        } else {
            Ok(responses.remove(0))
        }
    }
}

#[derive(Debug, Clone)]
enum SttOutcome {
    Text(String),
    Unintelligible,
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct MockSpeechToText {
    outcome: SttOutcome,
    calls: Arc<AtomicUsize>,
    last_locale: Arc<Mutex<Option<String>>>,
}

impl MockSpeechToText {
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(SttOutcome::Text(text.into()))
    }

    #[must_use]
    pub fn unintelligible() -> Self {
        Self::new(SttOutcome::Unintelligible)
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(SttOutcome::Unavailable)
    }

    fn new(outcome: SttOutcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
            last_locale: Arc::new(Mutex::new(None)),
        }
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn last_locale(&self) -> Option<String> {
        self.last_locale.lock().unwrap().clone()
    }
}

impl SpeechToText for MockSpeechToText {
    fn transcribe(
        &self,
        _audio: &[u8],
        _filename: Option<&str>,
        locale: Option<&str>,
    ) -> Pin<Box<dyn Future<Output = Result<Transcription, LlmError>> + Send + '_>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_locale.lock().unwrap() = locale.map(str::to_owned);
        let result = match &self.outcome {
            SttOutcome::Text(text) => Ok(Transcription {
                text: text.clone(),
                language: None,
                duration_secs: None,
            }),
            SttOutcome::Unintelligible => Err(LlmError::Unintelligible),
            SttOutcome::Unavailable => Err(LlmError::Unavailable),
        };
        Box::pin(async move { result })
    }
}

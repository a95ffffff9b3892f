use crate::compatible::CompatibleProvider;
use crate::gemini::GeminiProvider;
#[cfg(feature = "mock")]
use crate::mock::MockProvider;
use crate::openai::OpenAiProvider;
use crate::provider::{LlmProvider, Message};

/// Generates a match over all `AnyProvider` variants, binding the inner provider
/// and evaluating the given expression for each arm.
macro_rules! delegate_provider {
    ($self:expr, |$p:ident| $expr:expr) => {
        match $self {
            AnyProvider::Gemini($p) => $expr,
            AnyProvider::OpenAi($p) => $expr,
            AnyProvider::Compatible($p) => $expr,
            #[cfg(feature = "mock")]
            AnyProvider::Mock($p) => $expr,
        }
    };
}

#[derive(Debug, Clone)]
pub enum AnyProvider {
    Gemini(GeminiProvider),
    OpenAi(OpenAiProvider),
    Compatible(CompatibleProvider),
    #[cfg(feature = "mock")]
    Mock(MockProvider),
}

impl LlmProvider for AnyProvider {
    async fn chat(&self, messages: &[Message]) -> Result<String, crate::LlmError> {
        delegate_provider!(self, |p| p.chat(messages).await)
    }

    fn name(&self) -> &str {
        delegate_provider!(self, |p| p.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_gemini_name() {
        let provider = AnyProvider::Gemini(GeminiProvider::new(
            "key".into(),
            crate::gemini::DEFAULT_BASE_URL.into(),
            "gemini-2.0-flash".into(),
            1024,
        ));
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn any_openai_name() {
        let provider = AnyProvider::OpenAi(OpenAiProvider::new(
            "key".into(),
            "https://api.openai.com/v1".into(),
            "gpt-4o-mini".into(),
            1024,
        ));
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn any_compatible_name() {
        let provider = AnyProvider::Compatible(CompatibleProvider::new(
            "groq".into(),
            "key".into(),
            "https://api.groq.com/openai/v1".into(),
            "llama".into(),
            1024,
        ));
        assert_eq!(provider.name(), "groq");
    }

    #[test]
    fn any_provider_debug_redacts() {
        let provider = AnyProvider::Gemini(GeminiProvider::new(
            "top-secret".into(),
            crate::gemini::DEFAULT_BASE_URL.into(),
            "m".into(),
            16,
        ));
        assert!(!format!("{provider:?}").contains("top-secret"));
    }

    #[tokio::test]
    async fn any_chat_delegates_and_fails_when_unreachable() {
        let provider = AnyProvider::OpenAi(OpenAiProvider::new(
            "key".into(),
            "http://127.0.0.1:1".into(),
            "m".into(),
            16,
        ));
        assert!(provider.chat(&[Message::user("hello")]).await.is_err());
    }
}

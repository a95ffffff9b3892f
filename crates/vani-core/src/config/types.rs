use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::vault::Secret;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stt: Option<SttConfig>,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(skip)]
    pub secrets: ResolvedSecrets,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_bind")]
    pub bind: String,
    #[serde(default = "default_gateway_port")]
    pub port: u16,
    #[serde(default = "default_gateway_max_body")]
    pub max_body_size: usize,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_gateway_bind() -> String {
    "0.0.0.0".into()
}

fn default_gateway_port() -> u16 {
    8001
}

fn default_gateway_max_body() -> usize {
    25 * 1024 * 1024
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_gateway_bind(),
            port: default_gateway_port(),
            max_body_size: default_gateway_max_body(),
            cors_origins: default_cors_origins(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslationConfig {
    /// Auto mode tries the LLM chain only when the word count exceeds this.
    #[serde(default = "default_auto_word_threshold")]
    pub auto_word_threshold: usize,
    #[serde(default)]
    pub deterministic: DeterministicConfig,
}

pub(crate) fn default_auto_word_threshold() -> usize {
    2
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            auto_word_threshold: default_auto_word_threshold(),
            deterministic: DeterministicConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeterministicConfig {
    #[serde(default = "default_deterministic_base_url")]
    pub base_url: String,
    #[serde(default = "default_deterministic_timeout")]
    pub timeout_secs: u64,
}

fn default_deterministic_base_url() -> String {
    "https://translate.googleapis.com".into()
}

fn default_deterministic_timeout() -> u64 {
    10
}

impl Default for DeterministicConfig {
    fn default() -> Self {
        Self {
            base_url: default_deterministic_base_url(),
            timeout_secs: default_deterministic_timeout(),
        }
    }
}

/// LLM backend protocol selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Gemini,
    OpenAi,
    Compatible,
}

impl BackendKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Compatible => "compatible",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub backends: Vec<BackendConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    pub name: String,
    pub kind: BackendKind,
    #[serde(default)]
    pub base_url: Option<String>,
    pub model: String,
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
    /// Lower ranks are tried first.
    #[serde(default)]
    pub priority: u32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_requires_api_key")]
    pub requires_api_key: bool,
}

fn default_backend_timeout() -> u64 {
    10
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_requires_api_key() -> bool {
    true
}

impl BackendConfig {
    /// Env/vault key holding this backend's credential: `VANI_<NAME>_API_KEY`.
    #[must_use]
    pub fn secret_key(&self) -> String {
        let name: String = self
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("VANI_{name}_API_KEY")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SttConfig {
    #[serde(default = "default_stt_provider")]
    pub provider: String,
    #[serde(default = "default_stt_base_url")]
    pub base_url: String,
    #[serde(default = "default_stt_model")]
    pub model: String,
}

pub(crate) fn default_stt_provider() -> String {
    "whisper".into()
}

pub(crate) fn default_stt_base_url() -> String {
    "https://api.openai.com/v1".into()
}

pub(crate) fn default_stt_model() -> String {
    "whisper-1".into()
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            provider: default_stt_provider(),
            base_url: default_stt_base_url(),
            model: default_stt_model(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default)]
    pub exporter: String,
    #[serde(default = "default_otlp_endpoint")]
    pub endpoint: String,
}

fn default_otlp_endpoint() -> String {
    "http://localhost:4317".into()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            exporter: String::new(),
            endpoint: default_otlp_endpoint(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ResolvedSecrets {
    pub backend_api_keys: HashMap<String, Secret>,
    pub stt_api_key: Option<Secret>,
}

//! Application bootstrap: config resolution and engine/recognizer construction.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use vani_llm::SpeechToText;
use vani_llm::any::AnyProvider;
use vani_llm::compatible::CompatibleProvider;
use vani_llm::gemini::{self, GeminiProvider};
use vani_llm::openai::OpenAiProvider;
use vani_llm::whisper::WhisperProvider;

use crate::audio::ContainerSniffer;
use crate::config::{BackendConfig, BackendKind, Config};
use crate::transcribe::Transcriber;
use crate::translate::google::GoogleTranslatorFactory;
use crate::translate::{DeterministicTranslator, LlmBackend, TranslationEngine};
use crate::vault::{EnvVaultProvider, VaultProvider};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub struct AppBuilder {
    config: Config,
    config_path: PathBuf,
    client: reqwest::Client,
}

impl AppBuilder {
    /// Resolve config path, load it, validate, resolve secrets from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be parsed, fails validation, or the
    /// vault backend fails.
    pub async fn from_env() -> anyhow::Result<Self> {
        let config_path = resolve_config_path();
        Self::load(&config_path, &EnvVaultProvider).await
    }

    /// # Errors
    ///
    /// See [`AppBuilder::from_env`].
    pub async fn load(path: &Path, vault: &dyn VaultProvider) -> anyhow::Result<Self> {
        let mut config = Config::load(path)?;
        config.validate()?;
        config.resolve_secrets(vault).await?;
        Ok(Self::from_config(config, path.to_path_buf()))
    }

    #[must_use]
    pub fn from_config(config: Config, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
            client: vani_llm::http::default_client(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// LLM backends that have the credentials they need, in priority order.
    #[must_use]
    pub fn build_backends(&self) -> Vec<LlmBackend> {
        self.config
            .backends_by_priority()
            .into_iter()
            .filter_map(|cfg| self.build_backend(cfg))
            .collect()
    }

    fn build_backend(&self, cfg: &BackendConfig) -> Option<LlmBackend> {
        let api_key = match self.config.secrets.backend_api_keys.get(&cfg.name) {
            Some(secret) => secret.expose().to_owned(),
            None if cfg.requires_api_key => {
                tracing::warn!(
                    backend = %cfg.name,
                    key = %cfg.secret_key(),
                    "llm backend skipped: api key not set"
                );
                return None;
            }
            None => String::new(),
        };

        let provider = match cfg.kind {
            BackendKind::Gemini => AnyProvider::Gemini(
                GeminiProvider::new(
                    api_key,
                    cfg.base_url
                        .clone()
                        .unwrap_or_else(|| gemini::DEFAULT_BASE_URL.into()),
                    cfg.model.clone(),
                    cfg.max_tokens,
                )
                .with_client(self.client.clone()),
            ),
            BackendKind::OpenAi => AnyProvider::OpenAi(
                OpenAiProvider::new(
                    api_key,
                    cfg.base_url.clone().unwrap_or_else(|| OPENAI_BASE_URL.into()),
                    cfg.model.clone(),
                    cfg.max_tokens,
                )
                .with_client(self.client.clone()),
            ),
            BackendKind::Compatible => {
                let Some(base_url) = cfg.base_url.clone() else {
                    tracing::warn!(backend = %cfg.name, "compatible backend skipped: base_url not set");
                    return None;
                };
                AnyProvider::Compatible(CompatibleProvider::new(
                    cfg.name.clone(),
                    api_key,
                    base_url,
                    cfg.model.clone(),
                    cfg.max_tokens,
                ))
            }
        };

        tracing::info!(
            backend = %cfg.name,
            kind = %cfg.kind,
            model = %cfg.model,
            timeout_secs = cfg.timeout_secs,
            "llm backend enabled"
        );
        Some(
            LlmBackend::new(cfg.name.clone(), provider, Duration::from_secs(cfg.timeout_secs))
                .with_priority(cfg.priority),
        )
    }

    #[must_use]
    pub fn build_deterministic(&self) -> DeterministicTranslator {
        let det = &self.config.translation.deterministic;
        let factory = GoogleTranslatorFactory::new(self.client.clone(), det.base_url.clone());
        DeterministicTranslator::new(Arc::new(factory), Duration::from_secs(det.timeout_secs))
    }

    #[must_use]
    pub fn build_engine(&self) -> TranslationEngine {
        let engine = TranslationEngine::new(self.build_backends(), self.build_deterministic())
            .with_auto_word_threshold(self.config.translation.auto_word_threshold);
        if !engine.has_llm() {
            tracing::warn!("no llm backend available, translations use the deterministic path");
        }
        engine
    }

    /// Speech recognizer, if configured and credentialed.
    #[must_use]
    pub fn build_stt(&self) -> Option<Arc<dyn SpeechToText>> {
        let stt = self.config.stt.as_ref()?;
        if stt.provider != "whisper" {
            tracing::warn!(provider = %stt.provider, "unsupported stt provider, speech disabled");
            return None;
        }
        let Some(key) = self.config.secrets.stt_api_key.as_ref() else {
            tracing::warn!("stt disabled: VANI_STT_API_KEY not set");
            return None;
        };
        tracing::info!(model = %stt.model, "whisper stt enabled");
        Some(Arc::new(WhisperProvider::new(
            self.client.clone(),
            key.expose(),
            stt.base_url.clone(),
            stt.model.clone(),
        )))
    }

    /// Build the engine and the transcriber that shares it.
    #[must_use]
    pub fn build(&self) -> (Arc<TranslationEngine>, Arc<Transcriber>) {
        let engine = Arc::new(self.build_engine());
        let transcriber = Arc::new(Transcriber::new(
            self.build_stt(),
            Arc::new(ContainerSniffer),
            Arc::clone(&engine),
        ));
        (engine, transcriber)
    }
}

/// Priority: CLI `--config` > `VANI_CONFIG` env > `config/default.toml`.
#[must_use]
pub fn resolve_config_path() -> PathBuf {
    let args: Vec<String> = std::env::args().collect();
    if let Some(path) = args.windows(2).find(|w| w[0] == "--config").map(|w| &w[1]) {
        return PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("VANI_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}

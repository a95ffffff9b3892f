use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::error::TranslateError;

pub type TranslateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, TranslateError>> + Send + 'a>>;

/// A phrase translator bound to one (source, target) pair.
pub trait PhraseTranslator: Send + Sync {
    fn translate<'a>(&'a self, text: &'a str) -> TranslateFuture<'a>;
}

/// Builds pair-bound translators on first use of a pair.
pub trait PhraseTranslatorFactory: Send + Sync {
    fn create(&self, source: &str, target: &str) -> Arc<dyn PhraseTranslator>;
}

type PairKey = (String, String);

/// Terminal fallback: never fails, returns the input when the backend does.
pub struct DeterministicTranslator {
    factory: Arc<dyn PhraseTranslatorFactory>,
    cache: RwLock<HashMap<PairKey, Arc<dyn PhraseTranslator>>>,
    timeout: Duration,
}

impl DeterministicTranslator {
    #[must_use]
    pub fn new(factory: Arc<dyn PhraseTranslatorFactory>, timeout: Duration) -> Self {
        Self {
            factory,
            cache: RwLock::new(HashMap::new()),
            timeout,
        }
    }

    /// Translate `text`, returning it unchanged on any backend failure.
    pub async fn translate(&self, text: &str, source: &str, target: &str) -> String {
        match self.try_translate(text, source, target).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::error!(source, target, error = %e, "deterministic translation failed");
                text.to_owned()
            }
        }
    }

    /// # Errors
    ///
    /// Returns `BackendTimeout` when the deadline elapses and `BackendFailure`
    /// when the backend rejects the request.
    pub async fn try_translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        // Some backends reject identical pairs outright.
        if source == target || text.trim().is_empty() {
            return Ok(text.to_owned());
        }

        let translator = self.translator_for(source, target).await;
        match tokio::time::timeout(self.timeout, translator.translate(text)).await {
            Ok(result) => result,
            Err(_) => Err(TranslateError::BackendTimeout {
                backend: "deterministic".into(),
                timeout: self.timeout,
            }),
        }
    }

    async fn translator_for(&self, source: &str, target: &str) -> Arc<dyn PhraseTranslator> {
        let key = (source.to_owned(), target.to_owned());
        {
            let cache = self.cache.read().await;
            if let Some(t) = cache.get(&key) {
                return Arc::clone(t);
            }
        }
        let mut cache = self.cache.write().await;
        let entry = cache
            .entry(key)
            .or_insert_with(|| self.factory.create(source, target));
        Arc::clone(entry)
    }

    /// Number of language pairs with a live translator.
    pub async fn cached_pairs(&self) -> usize {
        self.cache.read().await.len()
    }
}

impl std::fmt::Debug for DeterministicTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeterministicTranslator")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

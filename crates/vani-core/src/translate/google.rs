//! Google web-translate backend for the deterministic fallback.

use std::sync::Arc;

use super::deterministic::{PhraseTranslator, PhraseTranslatorFactory, TranslateFuture};
use crate::error::TranslateError;

pub const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

const BACKEND_NAME: &str = "google";

/// Creates one [`GoogleTranslator`] per language pair, all sharing a client.
#[derive(Debug, Clone)]
pub struct GoogleTranslatorFactory {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslatorFactory {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl PhraseTranslatorFactory for GoogleTranslatorFactory {
    fn create(&self, source: &str, target: &str) -> Arc<dyn PhraseTranslator> {
        tracing::debug!(source, target, "creating google translator");
        Arc::new(GoogleTranslator {
            client: self.client.clone(),
            base_url: self.base_url.trim_end_matches('/').to_owned(),
            source: source.to_owned(),
            target: target.to_owned(),
        })
    }
}

#[derive(Debug)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
    source: String,
    target: String,
}

impl GoogleTranslator {
    async fn request(&self, text: &str) -> Result<String, TranslateError> {
        let endpoint = format!("{}/translate_a/single", self.base_url);
        let url = reqwest::Url::parse_with_params(
            &endpoint,
            &[
                ("client", "gtx"),
                ("sl", self.source.as_str()),
                ("tl", self.target.as_str()),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| failure(e.to_string()))?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| failure(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(failure(format!("HTTP {}", status.as_u16())));
        }

        let body: serde_json::Value = resp.json().await.map_err(|e| failure(e.to_string()))?;
        parse_segments(&body).ok_or_else(|| failure("unexpected response shape".into()))
    }
}

impl PhraseTranslator for GoogleTranslator {
    fn translate<'a>(&'a self, text: &'a str) -> TranslateFuture<'a> {
        Box::pin(self.request(text))
    }
}

fn failure(message: String) -> TranslateError {
    TranslateError::BackendFailure {
        backend: BACKEND_NAME.into(),
        message,
    }
}

/// The payload is `[[["out", "in", ...], ...], ...]`; output segments are concatenated.
fn parse_segments(body: &serde_json::Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let mut out = String::new();
    for segment in segments {
        if let Some(part) = segment.get(0).and_then(serde_json::Value::as_str) {
            out.push_str(part);
        }
    }
    if out.is_empty() { None } else { Some(out) }
}

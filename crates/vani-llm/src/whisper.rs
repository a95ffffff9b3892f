use std::future::Future;
use std::pin::Pin;

use crate::error::LlmError;
use crate::stt::{SpeechToText, Transcription, primary_subtag};

pub struct WhisperProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl WhisperProvider {
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }
}

impl std::fmt::Debug for WhisperProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[derive(serde::Deserialize)]
struct WhisperResponse {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    duration: Option<f32>,
}

impl SpeechToText for WhisperProvider {
    fn transcribe(
        &self,
        audio: &[u8],
        filename: Option<&str>,
        locale: Option<&str>,
    ) -> Pin<Box<dyn Future<Output = Result<Transcription, LlmError>> + Send + '_>> {
        let audio = audio.to_vec();
        let fname = filename.unwrap_or("audio.webm").to_string();
        let language = locale.map(|l| primary_subtag(l).to_owned());
        Box::pin(async move {
            let part = reqwest::multipart::Part::bytes(audio)
                .file_name(fname)
                .mime_str("application/octet-stream")
                .map_err(|e| LlmError::TranscriptionFailed(e.to_string()))?;

            let mut form = reqwest::multipart::Form::new()
                .text("model", self.model.clone())
                .text("response_format", "json")
                .part("file", part);
            if let Some(language) = language {
                form = form.text("language", language);
            }

            let url = format!(
                "{}/audio/transcriptions",
                self.base_url.trim_end_matches('/')
            );
            let resp = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .multipart(form)
                .send()
                .await?;

            if !resp.status().is_success() {
                let status = resp.status();
                let body: String = resp
                    .text()
                    .await
                    .unwrap_or_default()
                    .chars()
                    .take(500)
                    .collect();
                return Err(LlmError::TranscriptionFailed(format!("{status}: {body}")));
            }

            let parsed: WhisperResponse = resp.json().await?;
            let text = parsed.text.trim();
            if text.is_empty() {
                return Err(LlmError::Unintelligible);
            }
            Ok(Transcription {
                text: text.to_owned(),
                language: parsed.language,
                duration_secs: parsed.duration,
            })
        })
    }
}

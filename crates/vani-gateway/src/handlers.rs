use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use vani_core::language::{ENGLISH, is_supported};
use vani_core::{LlmPreference, TranscriptionOutput};

use super::error::ApiError;
use super::server::AppState;

const SERVICE_NAME: &str = "speech-translation-service";

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    uptime_secs: u64,
}

pub(crate) async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

fn default_source_lang() -> String {
    ENGLISH.to_owned()
}

#[derive(serde::Deserialize)]
pub(crate) struct TranslatePayload {
    pub text: String,
    pub target_lang: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default)]
    pub use_llm: Option<bool>,
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct TranslateResponse {
    pub original_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub llm_used: bool,
    pub backend: Option<String>,
}

pub(crate) async fn translate_handler(
    State(state): State<AppState>,
    payload: Result<Json<TranslatePayload>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let Json(payload) = payload?;
    for code in [&payload.source_lang, &payload.target_lang] {
        if !is_supported(code) {
            return Err(ApiError::unsupported_language(code));
        }
    }

    let result = state
        .engine
        .translate(
            &payload.text,
            &payload.source_lang,
            &payload.target_lang,
            LlmPreference::from(payload.use_llm),
        )
        .await;

    Ok(Json(TranslateResponse {
        original_text: payload.text,
        translated_text: result.translated_text,
        source_lang: payload.source_lang,
        target_lang: payload.target_lang,
        llm_used: result.llm_used,
        backend: result.backend_used,
    }))
}

/// Form checkbox style: empty or absent means "let the engine decide".
fn parse_use_llm(raw: &str) -> Result<Option<bool>, ApiError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        other => Err(ApiError::bad_request(format!("invalid use_llm value: {other}"))),
    }
}

#[derive(Default)]
struct TranscribeForm {
    audio: Option<Vec<u8>>,
    lang: Option<String>,
    chat_id: Option<String>,
    use_llm: Option<bool>,
}

async fn read_form(mut multipart: Multipart) -> Result<TranscribeForm, ApiError> {
    let mut form = TranscribeForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed form: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        let bad = |e: axum::extract::multipart::MultipartError| {
            ApiError::bad_request(format!("malformed field '{name}': {e}"))
        };
        match name.as_str() {
            "file" => form.audio = Some(field.bytes().await.map_err(bad)?.to_vec()),
            "lang" => form.lang = Some(field.text().await.map_err(bad)?),
            "chat_id" => form.chat_id = Some(field.text().await.map_err(bad)?),
            "use_llm" => form.use_llm = parse_use_llm(&field.text().await.map_err(bad)?)?,
            _ => {}
        }
    }
    Ok(form)
}

pub(crate) async fn transcribe_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TranscriptionOutput>, ApiError> {
    let form = read_form(multipart).await?;
    let audio = form
        .audio
        .ok_or_else(|| ApiError::bad_request("missing 'file' field"))?;
    let lang = form
        .lang
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(default_source_lang);

    tracing::info!(
        lang = %lang,
        chat_id = form.chat_id.as_deref().unwrap_or("-"),
        bytes = audio.len(),
        "transcription request"
    );

    let output = state
        .transcriber
        .transcribe_audio(audio, &lang, LlmPreference::from(form.use_llm))
        .await?;
    Ok(Json(output))
}

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use vani_core::{TranscribeError, TranslateError};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to bind {0}: {1}")]
    Bind(String, std::io::Error),
    #[error("server error: {0}")]
    Server(String),
}

/// Request-level failure rendered as `{"detail": ...}`.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub(crate) fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub(crate) fn unsupported_language(code: &str) -> Self {
        Self::bad_request(format!("Unsupported language: {code}"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::bad_request(e.body_text())
    }
}

impl From<TranscribeError> for ApiError {
    fn from(e: TranscribeError) -> Self {
        let (status, detail) = match &e {
            TranscribeError::Unintelligible => (
                StatusCode::BAD_REQUEST,
                "Could not understand audio. Please speak clearly.".to_owned(),
            ),
            TranscribeError::UnsupportedFormat(reason) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Audio format error: {reason}"),
            ),
            TranscribeError::SpeechUnavailable(reason) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Speech recognition service error: {reason}"),
            ),
            TranscribeError::Language(TranslateError::UnknownLanguage(code)) => {
                return Self::unsupported_language(code);
            }
            TranscribeError::Language(other) => {
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };
        if status.is_server_error() {
            tracing::error!(error = %e, "transcription failed");
        } else {
            tracing::info!(error = %e, "transcription rejected");
        }
        Self { status, detail }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "detail": self.detail })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcribe_errors_map_to_status() {
        let cases = [
            (TranscribeError::Unintelligible, StatusCode::BAD_REQUEST),
            (
                TranscribeError::UnsupportedFormat("x".into()),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (
                TranscribeError::SpeechUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                TranscribeError::Language(TranslateError::UnknownLanguage("fr".into())),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }

    #[test]
    fn unknown_language_detail_names_code() {
        let e = ApiError::from(TranscribeError::Language(TranslateError::UnknownLanguage(
            "fr".into(),
        )));
        assert_eq!(e.detail, "Unsupported language: fr");
    }
}

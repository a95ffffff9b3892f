use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{health_handler, transcribe_handler, translate_handler};
use super::server::AppState;

pub(crate) fn build_router(state: AppState, max_body_size: usize, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/translate", post(translate_handler))
        .route("/transcribe", post(transcribe_handler))
        .route("/speech-to-text", post(transcribe_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid cors origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(parsed))
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use vani_core::audio::ContainerSniffer;
    use vani_core::translate::deterministic::TranslateFuture;
    use vani_core::translate::{
        DeterministicTranslator, LlmBackend, PhraseTranslator, PhraseTranslatorFactory,
    };
    use vani_core::{Transcriber, TranslationEngine};
    use vani_llm::SpeechToText;
    use vani_llm::any::AnyProvider;
    use vani_llm::mock::{MockProvider, MockSpeechToText};

    use super::*;

    struct Tagged {
        source: String,
        target: String,
    }

    impl PhraseTranslator for Tagged {
        fn translate<'a>(&'a self, text: &'a str) -> TranslateFuture<'a> {
            Box::pin(async move { Ok(format!("[{}->{}] {text}", self.source, self.target)) })
        }
    }

    struct TaggedFactory;

    impl PhraseTranslatorFactory for TaggedFactory {
        fn create(&self, source: &str, target: &str) -> Arc<dyn PhraseTranslator> {
            Arc::new(Tagged {
                source: source.into(),
                target: target.into(),
            })
        }
    }

    pub(crate) fn state_with(llm: Option<MockProvider>, stt: Option<MockSpeechToText>) -> AppState {
        let det = DeterministicTranslator::new(Arc::new(TaggedFactory), Duration::from_secs(1));
        let backends = llm
            .map(|m| {
                vec![LlmBackend::new(
                    "mock",
                    AnyProvider::Mock(m),
                    Duration::from_millis(500),
                )]
            })
            .unwrap_or_default();
        let engine = Arc::new(TranslationEngine::new(backends, det));
        let transcriber = Arc::new(Transcriber::new(
            stt.map(|s| Arc::new(s) as Arc<dyn SpeechToText>),
            Arc::new(ContainerSniffer),
            Arc::clone(&engine),
        ));
        AppState {
            engine,
            transcriber,
            started_at: Instant::now(),
        }
    }

    pub(crate) fn test_state() -> AppState {
        state_with(None, None)
    }

    pub(crate) fn make_router(state: AppState) -> Router {
        build_router(state, 1_048_576, &["*".to_owned()])
    }

    pub(crate) async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    pub(crate) fn json_request(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_returns_service_status() {
        let app = make_router(test_state());
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "speech-translation-service");
        assert!(json["uptime_secs"].is_u64());
    }

    #[tokio::test]
    async fn translate_route_wired() {
        let app = make_router(test_state());
        let body = serde_json::json!({"text": "Hello", "target_lang": "hi"});
        let resp = app.oneshot(json_request("/translate", &body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn speech_alias_wired() {
        let app = make_router(test_state());
        let req = Request::builder()
            .method("POST")
            .uri("/speech-to-text")
            .header("content-type", "multipart/form-data; boundary=X")
            .body(Body::from("--X--\r\n"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_ne!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_preflight_allows_any_origin() {
        let app = make_router(test_state());
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/translate")
            .header("origin", "https://farmer.example")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn cors_restricted_origin_list() {
        let app = build_router(test_state(), 1024, &["https://kisan.example".to_owned()]);
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/translate")
            .header("origin", "https://kisan.example")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "https://kisan.example"
        );
    }

    #[tokio::test]
    async fn body_size_limit() {
        let app = build_router(test_state(), 64, &[]);
        let text = "a".repeat(256);
        let body = serde_json::json!({"text": text, "target_lang": "hi"});
        let resp = app.oneshot(json_request("/translate", &body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}

use std::collections::HashMap;
use std::future::Future;
use std::io::Write;
use std::pin::Pin;

use serial_test::serial;

use super::*;
use crate::vault::VaultProvider;

struct MapVault(HashMap<&'static str, &'static str>);

impl VaultProvider for MapVault {
    fn get_secret(
        &self,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Option<String>>> + Send + '_>> {
        let val = self.0.get(key).map(|v| (*v).to_owned());
        Box::pin(async move { Ok(val) })
    }
}

const ENV_KEYS: [&str; 6] = [
    "VANI_GATEWAY_BIND",
    "VANI_GATEWAY_PORT",
    "VANI_TRANSLATION_AUTO_WORD_THRESHOLD",
    "VANI_DETERMINISTIC_BASE_URL",
    "VANI_STT_MODEL",
    "VANI_GATEWAY_CORS_ORIGINS",
];

fn clear_env() {
    for key in ENV_KEYS {
        unsafe { std::env::remove_var(key) };
    }
}

fn backend(name: &str, kind: BackendKind, priority: u32) -> BackendConfig {
    BackendConfig {
        name: name.into(),
        kind,
        base_url: None,
        model: "m".into(),
        timeout_secs: 10,
        priority,
        max_tokens: 256,
        requires_api_key: true,
    }
}

#[test]
fn defaults_when_file_missing() {
    let config = Config::default();
    assert_eq!(config.gateway.bind, "0.0.0.0");
    assert_eq!(config.gateway.port, 8001);
    assert_eq!(config.gateway.cors_origins, vec!["*".to_owned()]);
    assert_eq!(config.translation.auto_word_threshold, 2);
    assert_eq!(config.translation.deterministic.timeout_secs, 10);
    assert!(config.llm.backends.is_empty());
    assert!(config.stt.is_none());
}

#[test]
#[serial]
fn load_missing_path_uses_defaults() {
    clear_env();
    let config = Config::load(Path::new("/nonexistent/vani.toml")).unwrap();
    assert_eq!(config.gateway.port, 8001);
}

#[test]
#[serial]
fn parse_valid_toml() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vani.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(
        f,
        r#"
[gateway]
bind = "127.0.0.1"
port = 9000

[translation]
auto_word_threshold = 4

[translation.deterministic]
base_url = "http://localhost:7000"
timeout_secs = 3

[[llm.backends]]
name = "gemini"
kind = "gemini"
model = "gemini-2.0-flash"
timeout_secs = 10

[[llm.backends]]
name = "groq"
kind = "compatible"
base_url = "https://api.groq.com/openai/v1"
model = "llama-3.3-70b-versatile"
timeout_secs = 25
priority = 1

[stt]
model = "whisper-large-v3"
"#
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.gateway.bind, "127.0.0.1");
    assert_eq!(config.gateway.port, 9000);
    assert_eq!(config.translation.auto_word_threshold, 4);
    assert_eq!(config.translation.deterministic.base_url, "http://localhost:7000");
    assert_eq!(config.llm.backends.len(), 2);
    assert_eq!(config.llm.backends[0].kind, BackendKind::Gemini);
    assert_eq!(config.llm.backends[0].priority, 0);
    assert!(config.llm.backends[0].requires_api_key);
    assert_eq!(config.llm.backends[1].kind, BackendKind::Compatible);
    assert_eq!(config.llm.backends[1].timeout_secs, 25);
    let stt = config.stt.unwrap();
    assert_eq!(stt.provider, "whisper");
    assert_eq!(stt.model, "whisper-large-v3");
}

#[test]
#[serial]
fn invalid_toml_errors() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[gateway\nport = ").unwrap();
    assert!(Config::load(&path).is_err());
}

#[test]
#[serial]
fn env_overrides() {
    clear_env();
    let mut config = Config::default();
    unsafe {
        std::env::set_var("VANI_GATEWAY_PORT", "8123");
        std::env::set_var("VANI_TRANSLATION_AUTO_WORD_THRESHOLD", "5");
        std::env::set_var("VANI_STT_MODEL", "whisper-large-v3");
        std::env::set_var("VANI_GATEWAY_CORS_ORIGINS", "http://a.test, http://b.test");
    }
    config.apply_env_overrides();
    clear_env();

    assert_eq!(config.gateway.port, 8123);
    assert_eq!(config.translation.auto_word_threshold, 5);
    assert_eq!(config.stt.unwrap().model, "whisper-large-v3");
    assert_eq!(
        config.gateway.cors_origins,
        vec!["http://a.test".to_owned(), "http://b.test".to_owned()]
    );
}

#[test]
#[serial]
fn invalid_env_values_are_ignored() {
    clear_env();
    let mut config = Config::default();
    unsafe {
        std::env::set_var("VANI_GATEWAY_PORT", "not-a-port");
        std::env::set_var("VANI_TRANSLATION_AUTO_WORD_THRESHOLD", "-1");
    }
    config.apply_env_overrides();
    clear_env();

    assert_eq!(config.gateway.port, 8001);
    assert_eq!(config.translation.auto_word_threshold, 2);
}

#[test]
fn validate_accepts_defaults() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn validate_rejects_duplicate_backend_names() {
    let mut config = Config::default();
    config.llm.backends = vec![
        backend("gemini", BackendKind::Gemini, 0),
        backend("gemini", BackendKind::Gemini, 1),
    ];
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn validate_rejects_zero_timeout() {
    let mut config = Config::default();
    let mut b = backend("gemini", BackendKind::Gemini, 0);
    b.timeout_secs = 0;
    config.llm.backends = vec![b];
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_blank_name() {
    let mut config = Config::default();
    config.llm.backends = vec![backend("  ", BackendKind::Compatible, 0)];
    assert!(config.validate().is_err());
}

#[test]
fn backends_sorted_by_priority_stable() {
    let mut config = Config::default();
    config.llm.backends = vec![
        backend("c", BackendKind::Compatible, 2),
        backend("a", BackendKind::Gemini, 0),
        backend("b", BackendKind::OpenAi, 2),
    ];
    let names: Vec<&str> = config
        .backends_by_priority()
        .iter()
        .map(|b| b.name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "c", "b"]);
}

#[test]
fn secret_key_is_uppercased_and_sanitized() {
    let b = backend("oss-llama.primary", BackendKind::Compatible, 0);
    assert_eq!(b.secret_key(), "VANI_OSS_LLAMA_PRIMARY_API_KEY");
}

#[tokio::test]
async fn resolve_secrets_uses_backend_specific_key() {
    let mut config = Config::default();
    config.llm.backends = vec![
        backend("gemini", BackendKind::Gemini, 0),
        backend("groq", BackendKind::Compatible, 1),
    ];
    let vault = MapVault(HashMap::from([
        ("VANI_GEMINI_API_KEY", "g-key"),
        ("VANI_GROQ_API_KEY", "q-key"),
        ("VANI_STT_API_KEY", "s-key"),
    ]));
    config.resolve_secrets(&vault).await.unwrap();

    assert_eq!(config.secrets.backend_api_keys["gemini"].expose(), "g-key");
    assert_eq!(config.secrets.backend_api_keys["groq"].expose(), "q-key");
    assert_eq!(config.secrets.stt_api_key.unwrap().expose(), "s-key");
}

#[tokio::test]
async fn resolve_secrets_gemini_falls_back_to_google_aliases() {
    let mut config = Config::default();
    config.llm.backends = vec![backend("primary", BackendKind::Gemini, 0)];
    let vault = MapVault(HashMap::from([("GEMINI_API_KEY", "alias-key")]));
    config.resolve_secrets(&vault).await.unwrap();
    assert_eq!(
        config.secrets.backend_api_keys["primary"].expose(),
        "alias-key"
    );
}

#[tokio::test]
async fn resolve_secrets_aliases_do_not_apply_to_compatible() {
    let mut config = Config::default();
    config.llm.backends = vec![backend("groq", BackendKind::Compatible, 0)];
    let vault = MapVault(HashMap::from([("GOOGLE_API_KEY", "alias-key")]));
    config.resolve_secrets(&vault).await.unwrap();
    assert!(config.secrets.backend_api_keys.is_empty());
}

#[tokio::test]
async fn resolve_secrets_ignores_empty_values() {
    let mut config = Config::default();
    config.llm.backends = vec![backend("gemini", BackendKind::Gemini, 0)];
    let vault = MapVault(HashMap::from([("VANI_GEMINI_API_KEY", "")]));
    config.resolve_secrets(&vault).await.unwrap();
    assert!(config.secrets.backend_api_keys.is_empty());
}

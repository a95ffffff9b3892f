use super::{Config, SttConfig};

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("VANI_GATEWAY_BIND") {
            self.gateway.bind = v;
        }
        if let Ok(v) = std::env::var("VANI_GATEWAY_PORT") {
            match v.parse::<u16>() {
                Ok(port) => self.gateway.port = port,
                Err(_) => tracing::warn!("ignoring invalid VANI_GATEWAY_PORT value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("VANI_GATEWAY_MAX_BODY_SIZE")
            && let Ok(size) = v.parse::<usize>()
        {
            self.gateway.max_body_size = size;
        }
        if let Ok(v) = std::env::var("VANI_GATEWAY_CORS_ORIGINS") {
            self.gateway.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = std::env::var("VANI_TRANSLATION_AUTO_WORD_THRESHOLD") {
            match v.parse::<usize>() {
                Ok(n) => self.translation.auto_word_threshold = n,
                Err(_) => tracing::warn!(
                    "ignoring invalid VANI_TRANSLATION_AUTO_WORD_THRESHOLD value: {v}"
                ),
            }
        }
        if let Ok(v) = std::env::var("VANI_DETERMINISTIC_BASE_URL") {
            self.translation.deterministic.base_url = v;
        }
        if let Ok(v) = std::env::var("VANI_DETERMINISTIC_TIMEOUT")
            && let Ok(secs) = v.parse::<u64>()
        {
            self.translation.deterministic.timeout_secs = secs;
        }
        if let Ok(v) = std::env::var("VANI_STT_BASE_URL") {
            self.stt.get_or_insert_with(SttConfig::default).base_url = v;
        }
        if let Ok(v) = std::env::var("VANI_STT_MODEL") {
            self.stt.get_or_insert_with(SttConfig::default).model = v;
        }
        if let Ok(v) = std::env::var("VANI_OBSERVABILITY_EXPORTER") {
            self.observability.exporter = v;
        }
    }
}

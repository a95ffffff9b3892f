mod env;
mod types;

#[cfg(test)]
mod tests;

pub use types::*;

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, bail};

use crate::vault::{Secret, VaultProvider};

/// Key aliases accepted for Gemini backends when the backend-specific key is absent.
const GEMINI_KEY_ALIASES: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to sensible defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Reject configurations the service cannot run with.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.gateway.port == 0 {
            bail!("gateway.port must be non-zero");
        }
        if self.translation.deterministic.timeout_secs == 0 {
            bail!("translation.deterministic.timeout_secs must be greater than zero");
        }
        let mut seen = HashSet::new();
        for backend in &self.llm.backends {
            if backend.name.trim().is_empty() {
                bail!("llm.backends entries require a non-empty name");
            }
            if !seen.insert(backend.name.as_str()) {
                bail!("duplicate llm backend name '{}'", backend.name);
            }
            if backend.timeout_secs == 0 {
                bail!(
                    "llm backend '{}' timeout_secs must be greater than zero",
                    backend.name
                );
            }
            if backend.model.trim().is_empty() {
                bail!("llm backend '{}' requires a model", backend.name);
            }
        }
        Ok(())
    }

    /// Resolve sensitive configuration values through the vault.
    ///
    /// # Errors
    ///
    /// Returns an error if the vault backend fails.
    pub async fn resolve_secrets(&mut self, vault: &dyn VaultProvider) -> anyhow::Result<()> {
        for backend in &self.llm.backends {
            let mut value = vault.get_secret(&backend.secret_key()).await?;
            if value.is_none() && backend.kind == BackendKind::Gemini {
                for alias in GEMINI_KEY_ALIASES {
                    if let Some(v) = vault.get_secret(alias).await? {
                        value = Some(v);
                        break;
                    }
                }
            }
            if let Some(val) = value.filter(|v| !v.is_empty()) {
                self.secrets
                    .backend_api_keys
                    .insert(backend.name.clone(), Secret::new(val));
            }
        }
        if let Some(val) = vault.get_secret("VANI_STT_API_KEY").await? {
            self.secrets.stt_api_key = Some(Secret::new(val));
        } else if let Some(val) = vault.get_secret("OPENAI_API_KEY").await? {
            self.secrets.stt_api_key = Some(Secret::new(val));
        }
        Ok(())
    }

    /// Backends in the order the engine tries them: ascending priority, ties keep file order.
    #[must_use]
    pub fn backends_by_priority(&self) -> Vec<&BackendConfig> {
        let mut backends: Vec<&BackendConfig> = self.llm.backends.iter().collect();
        backends.sort_by_key(|b| b.priority);
        backends
    }
}

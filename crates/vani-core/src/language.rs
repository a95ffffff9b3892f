//! Static registry of supported languages.

use crate::error::TranslateError;

pub const ENGLISH: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    /// Human-readable name, used inside LLM prompts.
    pub name: &'static str,
    /// Speech recognition locale tag.
    pub locale: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language {
        code: "en",
        name: "English",
        locale: "en-US",
    },
    Language {
        code: "hi",
        name: "Hindi",
        locale: "hi-IN",
    },
    Language {
        code: "te",
        name: "Telugu",
        locale: "te-IN",
    },
];

/// Look up a registry entry by its short code.
///
/// # Errors
///
/// Returns [`TranslateError::UnknownLanguage`] when the code is not registered.
pub fn lookup(code: &str) -> Result<&'static Language, TranslateError> {
    LANGUAGES
        .iter()
        .find(|l| l.code == code)
        .ok_or_else(|| TranslateError::UnknownLanguage(code.to_owned()))
}

/// # Errors
///
/// Returns [`TranslateError::UnknownLanguage`] when the code is not registered.
pub fn resolve_name(code: &str) -> Result<&'static str, TranslateError> {
    lookup(code).map(|l| l.name)
}

/// # Errors
///
/// Returns [`TranslateError::UnknownLanguage`] when the code is not registered.
pub fn resolve_locale(code: &str) -> Result<&'static str, TranslateError> {
    lookup(code).map(|l| l.locale)
}

/// Display name for prompts; unknown codes pass through verbatim.
#[must_use]
pub fn display_name(code: &str) -> &str {
    resolve_name(code).unwrap_or(code)
}

#[must_use]
pub fn is_supported(code: &str) -> bool {
    lookup(code).is_ok()
}

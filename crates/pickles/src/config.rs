//! Parser configuration.
//!
//! Settings default to English keywords with Markdown-style fenced doc
//! strings enabled, and can be overridden through environment variables
//! prefixed with `PICKLES_`.

use std::env;

use pickles_dialect::DEFAULT_LANGUAGE;

use crate::error::ConfigError;

const LANGUAGE_VAR: &str = "PICKLES_LANGUAGE";
const FENCED_DOC_STRINGS_VAR: &str = "PICKLES_FENCED_DOC_STRINGS";

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "Yes" | "on" | "ON" | "On" => Some(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "No" | "off" | "OFF" | "Off" => {
            Some(false)
        }
        _ => None,
    }
}

/// Configuration shared by the lexer and parser.
///
/// # Environment Variables
///
/// - `PICKLES_LANGUAGE`: dialect used when a document has no
///   `# language:` header
/// - `PICKLES_FENCED_DOC_STRINGS`: whether `` ``` `` opens a doc string
///   alongside `"""`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Language code of the default dialect.
    pub language: String,
    /// Accept `` ``` `` as a doc string delimiter.
    pub fenced_doc_strings: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            fenced_doc_strings: true,
        }
    }
}

impl ParserConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable holds an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// [`from_env`](Self::from_env) passes the process environment; tests and
    /// embedding hosts can pass their own source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable holds an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(language) = lookup(LANGUAGE_VAR) {
            let language = language.trim();
            if language.is_empty() {
                return Err(ConfigError(format!("{LANGUAGE_VAR} must not be empty")));
            }
            config.language = language.to_string();
        }

        if let Some(value) = lookup(FENCED_DOC_STRINGS_VAR) {
            config.fenced_doc_strings = parse_env_bool(&value).ok_or_else(|| {
                ConfigError(format!(
                    "invalid {FENCED_DOC_STRINGS_VAR} value '{value}', expected true or false"
                ))
            })?;
        }

        Ok(config)
    }

    /// Apply optional overrides that take precedence over environment
    /// defaults.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        language: Option<String>,
        fenced_doc_strings: Option<bool>,
    ) -> Self {
        if let Some(language) = language {
            self.language = language;
        }

        if let Some(fenced) = fenced_doc_strings {
            self.fenced_doc_strings = fenced;
        }

        self
    }

    /// Use a different default language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Enable or disable fenced doc strings.
    #[must_use]
    pub fn with_fenced_doc_strings(mut self, enabled: bool) -> Self {
        self.fenced_doc_strings = enabled;
        self
    }
}

//! Registry of dialects keyed by language code.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::dialect::Dialect;
use crate::errors::DialectError;

/// Language used when a document does not declare one.
pub const DEFAULT_LANGUAGE: &str = "en";

const BUILTIN_LANGUAGES: &str = include_str!("../languages.json");

static BUILTIN: LazyLock<Dialects> = LazyLock::new(|| {
    Dialects::from_json(BUILTIN_LANGUAGES)
        .unwrap_or_else(|error| unreachable!("bundled languages.json is valid: {error}"))
});

/// A set of dialects addressable by language code (`en`, `fr`, ...).
///
/// # Examples
/// ```
/// use pickles_dialect::{Dialects, StepKeyword};
///
/// let french = Dialects::builtin().get("fr").unwrap();
/// assert!(french.step_keywords(StepKeyword::Given).iter().any(|kw| kw == "Soit "));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialects {
    dialects: HashMap<String, Dialect>,
}

impl Dialects {
    /// The dialects bundled with the crate: `en`, `fr`, `de` and `es`.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Parse a keyword table shaped like Cucumber's `gherkin-languages.json`:
    /// an object mapping language codes to keyword lists.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Json`] for malformed input and
    /// [`DialectError::MissingKeywords`] when a dialect leaves a mandatory
    /// category empty.
    pub fn from_json(json: &str) -> Result<Self, DialectError> {
        let raw: HashMap<String, Dialect> = serde_json::from_str(json)?;
        let mut dialects = Self::default();
        for (language, dialect) in raw {
            dialects.insert(language, dialect)?;
        }
        Ok(dialects)
    }

    /// Add or replace a dialect.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::MissingKeywords`] when the dialect leaves a
    /// mandatory category empty.
    pub fn insert(
        &mut self,
        language: impl Into<String>,
        mut dialect: Dialect,
    ) -> Result<(), DialectError> {
        let language = language.into();
        dialect.normalise();
        dialect.validate(&language)?;
        self.dialects.insert(language, dialect);
        Ok(())
    }

    /// Look up a dialect by language code.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<&Dialect> {
        self.dialects.get(language)
    }

    /// Look up a dialect, reporting unknown languages as an error.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnknownLanguage`] when `language` is absent.
    pub fn require(&self, language: &str) -> Result<&Dialect, DialectError> {
        self.get(language)
            .ok_or_else(|| DialectError::UnknownLanguage(language.to_string()))
    }

    /// The English dialect of the bundled registry.
    #[must_use]
    pub fn english(&self) -> &Dialect {
        self.get(DEFAULT_LANGUAGE).unwrap_or_else(|| {
            BUILTIN
                .dialects
                .get(DEFAULT_LANGUAGE)
                .unwrap_or_else(|| unreachable!("bundled registry contains English"))
        })
    }

    /// Language codes present in the registry, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<_> = self.dialects.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Number of dialects in the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dialects.len()
    }

    /// Returns `true` when the registry holds no dialect.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dialects.is_empty()
    }
}

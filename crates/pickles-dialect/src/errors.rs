//! Error types raised while loading dialects.

use thiserror::Error;

/// Errors surfaced while building a dialect registry.
///
/// # Examples
/// ```
/// use pickles_dialect::{DialectError, Dialects};
/// let err = Dialects::from_json("not json").unwrap_err();
/// assert!(matches!(err, DialectError::Json(_)));
/// ```
#[derive(Debug, Error)]
pub enum DialectError {
    /// The keyword table is not valid JSON or does not have the expected shape.
    #[error("invalid dialect table: {0}")]
    Json(#[from] serde_json::Error),
    /// A dialect lists no surface keyword for one of its categories.
    #[error("dialect `{language}` defines no `{category}` keywords")]
    MissingKeywords {
        /// Language code of the offending dialect.
        language: String,
        /// Keyword category left empty, e.g. `scenarioOutline`.
        category: &'static str,
    },
    /// A language code was requested that the registry does not contain.
    #[error("unknown dialect `{0}`")]
    UnknownLanguage(String),
}

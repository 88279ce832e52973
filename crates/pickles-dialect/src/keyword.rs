//! Semantic keyword types shared by the lexer, parser and compiler.
//!
//! Surface keywords differ per dialect; these enums name what a keyword
//! *means* so downstream stages never compare literal text.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Keyword introducing a step.
///
/// The enum includes `And` and `But` for completeness, but feature parsing
/// resolves them against the preceding `Given`/`When`/`Then` using
/// [`resolve`](Self::resolve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action when testing behaviour.
    When,
    /// Assert the expected outcome of a scenario.
    Then,
    /// Additional conditions that share context with the previous step.
    And,
    /// Negative or contrasting conditions.
    But,
}

impl StepKeyword {
    /// Return the keyword as a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use pickles_dialect::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::Given.as_str(), "Given");
    /// assert_eq!(StepKeyword::And.as_str(), "And");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }

    /// Return `true` for the connectives `And` and `But`.
    #[must_use]
    pub const fn is_conjunction(&self) -> bool {
        matches!(self, Self::And | Self::But)
    }

    /// Resolve conjunctions to the semantic keyword of the previous step.
    ///
    /// For primary keywords (`Given`/`When`/`Then`), updates `prev` and
    /// returns the keyword. For `And`/`But`, returns the value stored in
    /// `prev`, or `None` when no primary keyword has been seen yet. Callers
    /// start each block with `prev` set to `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pickles_dialect::StepKeyword;
    ///
    /// let mut prev = None;
    /// assert_eq!(StepKeyword::And.resolve(&mut prev), None);
    /// assert_eq!(StepKeyword::Given.resolve(&mut prev), Some(StepKeyword::Given));
    /// assert_eq!(StepKeyword::But.resolve(&mut prev), Some(StepKeyword::Given));
    /// ```
    #[must_use]
    pub fn resolve(self, prev: &mut Option<Self>) -> Option<Self> {
        if self.is_conjunction() {
            *prev
        } else {
            *prev = Some(self);
            Some(self)
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`StepKeyword`] from a string fails.
///
/// Contains the unrecognised keyword text for diagnostic purposes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid step keyword: {0}")]
pub struct StepKeywordParseError(pub String);

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        [Self::Given, Self::When, Self::Then, Self::And, Self::But]
            .into_iter()
            .find(|kw| trimmed.eq_ignore_ascii_case(kw.as_str()))
            .ok_or_else(|| StepKeywordParseError(trimmed.to_string()))
    }
}

/// Keyword opening a structural block. In source it is followed by a colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StructuralKeyword {
    /// `Feature:`, the document root.
    Feature,
    /// `Rule:`, a named group of scenarios.
    Rule,
    /// `Background:`, steps shared by every scenario in scope.
    Background,
    /// `Scenario:` or `Example:`.
    Scenario,
    /// `Scenario Outline:`, a step template expanded per example row.
    ScenarioOutline,
    /// `Examples:`, the table feeding an outline.
    Examples,
}

impl StructuralKeyword {
    /// Canonical English spelling, used in diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "Feature",
            Self::Rule => "Rule",
            Self::Background => "Background",
            Self::Scenario => "Scenario",
            Self::ScenarioOutline => "Scenario Outline",
            Self::Examples => "Examples",
        }
    }
}

impl fmt::Display for StructuralKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

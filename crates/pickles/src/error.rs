//! Error types for each pipeline stage.
//!
//! Every stage fails fast on its first error. Errors are structured values
//! carrying the source line (and column where one exists) so callers can
//! render them however they like.

use thiserror::Error;

/// Errors raised while turning text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// Input ended inside a doc string.
    #[error("line {line}: doc string opened here is never closed")]
    UnterminatedDocString {
        /// Line of the opening delimiter.
        line: usize,
    },
    /// A table row does not end with a pipe.
    #[error("line {line}: table row is missing its closing `|`")]
    UnterminatedTableRow {
        /// Line of the row.
        line: usize,
    },
    /// A word on a tag line does not start with `@`.
    #[error("line {line}, column {column}: expected a tag, found `{found}`")]
    IllegalTagCharacter {
        /// Line of the tag line.
        line: usize,
        /// Column of the offending word.
        column: usize,
        /// The offending word.
        found: String,
    },
    /// A `# language:` header names a dialect that is not available.
    #[error("line {line}: unknown language `{language}`")]
    UnknownLanguage {
        /// Line of the header, or 0 when the language came from configuration.
        line: usize,
        /// The requested language code.
        language: String,
    },
}

impl LexError {
    /// Source line where the failing construct began.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::UnterminatedDocString { line }
            | Self::UnterminatedTableRow { line }
            | Self::IllegalTagCharacter { line, .. }
            | Self::UnknownLanguage { line, .. } => *line,
        }
    }

    /// Column of the failure, when meaningful.
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::IllegalTagCharacter { column, .. } => Some(*column),
            _ => None,
        }
    }
}

/// A token appeared where the grammar does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: expected {expected}, found {found}")]
pub struct SyntaxError {
    /// Line of the offending token.
    pub line: usize,
    /// Column of the offending token.
    pub column: usize,
    /// What the grammar allowed at this position.
    pub expected: String,
    /// What was actually there.
    pub found: String,
}

impl SyntaxError {
    /// Build a syntax error at the given position.
    #[must_use]
    pub fn new(
        line: usize,
        column: usize,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self {
            line,
            column,
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Errors surfaced by [`Parser::parse`](crate::Parser::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer rejected the input.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The token stream does not match the grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    /// Source line of the failure.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Lex(err) => err.line(),
            Self::Syntax(err) => err.line,
        }
    }
}

/// A scenario outline references a placeholder its Examples table lacks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "line {line}, column {column}: placeholder '<{placeholder}>' not found in Examples table. \
     Available columns: [{available_columns_display}]"
)]
pub struct CompileError {
    /// The placeholder name that was not found.
    pub placeholder: String,
    /// Line of the step, table row or doc string holding the placeholder.
    pub line: usize,
    /// Column of that construct.
    pub column: usize,
    /// The column headers of the Examples table.
    pub available_columns: Vec<String>,
    available_columns_display: String,
}

impl CompileError {
    /// Build an unresolved-placeholder error.
    #[must_use]
    pub fn unresolved(
        placeholder: impl Into<String>,
        line: usize,
        column: usize,
        available_columns: &[String],
    ) -> Self {
        Self {
            placeholder: placeholder.into(),
            line,
            column,
            available_columns: available_columns.to_vec(),
            available_columns_display: available_columns.join(", "),
        }
    }
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(pub String);

/// Umbrella error for [`parse_and_compile`](crate::parse_and_compile).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Lexing or parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Outline expansion failed.
    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl Error {
    /// Source line of the failure.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Parse(err) => err.line(),
            Self::Compile(err) => err.line,
        }
    }
}

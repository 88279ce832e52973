//! Tokens produced by the lexer.

use std::fmt;

/// Kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `Feature:` keyword, colon included.
    Feature,
    /// `Rule:` keyword.
    Rule,
    /// `Background:` keyword.
    Background,
    /// `Scenario:` keyword.
    Scenario,
    /// `Scenario Outline:` keyword.
    ScenarioOutline,
    /// `Examples:` keyword.
    Examples,
    /// Step keyword including its trailing separator, e.g. `"Given "`.
    Step,
    /// Text following a keyword on the same line.
    Name,
    /// Free text line inside a description block.
    DescriptionLine,
    /// One raw line of a doc string, newline included.
    DocStringLine,
    /// A single `@tag`.
    Tag,
    /// A table separator plus any whitespace absorbed after it.
    Pipe,
    /// Raw text between two pipes.
    Cell,
    /// End of a tag line or table row.
    Eol,
    /// A `#` comment line.
    Comment,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Human readable description used in syntax errors.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Feature => "`Feature:`",
            Self::Rule => "`Rule:`",
            Self::Background => "`Background:`",
            Self::Scenario => "`Scenario:`",
            Self::ScenarioOutline => "`Scenario Outline:`",
            Self::Examples => "`Examples:`",
            Self::Step => "a step",
            Self::Name => "a name",
            Self::DescriptionLine => "a description line",
            Self::DocStringLine => "a doc string",
            Self::Tag => "a tag",
            Self::Pipe => "`|`",
            Self::Cell => "a table cell",
            Self::Eol => "end of line",
            Self::Comment => "a comment",
            Self::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token with its text and 1-based source position.
///
/// For [`TokenKind::DocStringLine`] the column is that of the opening
/// delimiter of the enclosing block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What the token is.
    pub kind: TokenKind,
    /// The literal source text of the token.
    pub text: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Token {
    /// Construct a token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// Returns `true` when the token has the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

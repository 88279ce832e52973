//! Core library for `pickles`.
//!
//! Feature documents flow through three stages: the [`Lexer`] turns text
//! into [`Token`]s, the [`Parser`] assembles them into a [`Feature`] tree,
//! and [`compile`] lowers the tree into [`ExecutableUnit`]s with backgrounds
//! merged in and scenario outlines expanded. Each stage fails fast with a
//! structured error carrying the source line.
//!
//! # Examples
//!
//! ```
//! let source = concat!(
//!     "Feature: Cucumbers\n",
//!     "  Background:\n",
//!     "    Given a basket\n",
//!     "  Scenario: eating\n",
//!     "    When I eat 3 cukes\n",
//! );
//! let units = pickles::parse_and_compile(source).unwrap();
//! assert_eq!(units.len(), 1);
//! let steps: Vec<_> = units[0].steps.iter().map(|s| s.name.as_str()).collect();
//! assert_eq!(steps, ["a basket", "I eat 3 cukes"]);
//! ```

pub mod ast;
pub mod compiler;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::Feature;
pub use compiler::{ExecutableUnit, TagSet, compile};
pub use config::ParserConfig;
pub use error::{CompileError, ConfigError, Error, LexError, ParseError, SyntaxError};
pub use lexer::{Condition, DocStringBlock, Lexer};
pub use parser::Parser;
pub use pickles_dialect::{Dialect, DialectError, Dialects, StepKeyword};
pub use token::{Token, TokenKind};

/// Parse a document with the bundled English keywords.
///
/// # Errors
///
/// Returns [`ParseError`] for lexical or syntax errors.
pub fn parse(text: &str) -> Result<Feature, ParseError> {
    Parser::new().parse(text)
}

/// Tokenize a whole document with the bundled English keywords.
///
/// # Errors
///
/// Returns the first [`LexError`].
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new().tokenize(text)
}

/// Parse and compile a document in one step.
///
/// # Errors
///
/// Returns [`Error::Parse`] or [`Error::Compile`] from the failing stage.
pub fn parse_and_compile(text: &str) -> Result<Vec<ExecutableUnit>, Error> {
    let feature = parse(text)?;
    Ok(compile(&feature)?)
}

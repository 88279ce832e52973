//! Keyword tables for the pickles Gherkin toolchain.
//!
//! The lexer never hard-codes keyword text. It asks a [`Dialect`] for the
//! surface keywords of each semantic keyword, and dialects live in a
//! [`Dialects`] registry keyed by language code so `# language:` headers can
//! switch between them.

mod dialect;
mod errors;
mod keyword;
mod registry;

pub use dialect::{Dialect, StepSurface};
pub use errors::DialectError;
pub use keyword::{StepKeyword, StepKeywordParseError, StructuralKeyword};
pub use registry::{DEFAULT_LANGUAGE, Dialects};

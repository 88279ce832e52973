//! Context-sensitive lexer for feature documents.
//!
//! The lexer reads one line at a time and classifies it according to the
//! state on top of its [`Condition`] stack. Lines that expand into several
//! tokens (keywords with names, tag lines, table rows) are queued and handed
//! out one per [`Lexer::next_token`] call, so the stack always reflects the
//! token just returned.

mod condition;
mod line;
mod table;

use std::collections::{BTreeMap, VecDeque};
use std::ops::Range;

use log::{debug, trace};
use pickles_dialect::{Dialect, Dialects, StepKeyword, StepSurface, StructuralKeyword};

use crate::config::ParserConfig;
use crate::error::LexError;
use crate::token::{Token, TokenKind};

pub use condition::Condition;
use condition::ConditionStack;
use line::Line;

const DOC_STRING_QUOTES: &str = "\"\"\"";
const DOC_STRING_FENCE: &str = "```";

/// A doc string block seen in the current input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocStringBlock {
    /// The opening delimiter, `"""` or `` ``` ``.
    pub delimiter: &'static str,
    /// Line of the opening delimiter.
    pub line: usize,
    /// Column of the opening delimiter.
    pub column: usize,
    /// Line of the closing delimiter, once it has been read.
    pub closing_line: Option<usize>,
}

/// Streaming tokenizer over a single document.
///
/// # Examples
/// ```
/// use pickles::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new();
/// lexer.set_input("Feature: Hello\n");
/// let token = lexer.next_token().unwrap();
/// assert_eq!((token.kind, token.text.as_str()), (TokenKind::Feature, "Feature:"));
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'d> {
    dialects: &'d Dialects,
    default_language: String,
    default_dialect: &'d Dialect,
    language: String,
    structural: Vec<(StructuralKeyword, &'d str)>,
    steps: Vec<StepSurface<'d>>,
    fenced_doc_strings: bool,
    input: String,
    pos: usize,
    line: usize,
    eof: (usize, usize),
    pending: VecDeque<Token>,
    conditions: ConditionStack,
    doc_strings: BTreeMap<usize, DocStringBlock>,
    open_doc_string: Option<usize>,
    header_allowed: bool,
}

impl Default for Lexer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer<'static> {
    /// A lexer using the bundled dialects and English keywords.
    #[must_use]
    pub fn new() -> Self {
        let dialects = Dialects::builtin();
        Self::build(dialects, dialects.english(), ParserConfig::default())
    }
}

impl<'d> Lexer<'d> {
    /// A lexer over a custom dialect registry.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::UnknownLanguage`] with line 0 when the configured
    /// language is not in `dialects`.
    pub fn with_config(dialects: &'d Dialects, config: &ParserConfig) -> Result<Self, LexError> {
        let dialect = dialects
            .get(&config.language)
            .ok_or_else(|| LexError::UnknownLanguage {
                line: 0,
                language: config.language.clone(),
            })?;
        Ok(Self::build(dialects, dialect, config.clone()))
    }

    fn build(dialects: &'d Dialects, dialect: &'d Dialect, config: ParserConfig) -> Self {
        Self {
            dialects,
            default_language: config.language.clone(),
            default_dialect: dialect,
            language: config.language,
            structural: dialect.structural_table(),
            steps: dialect.step_table(),
            fenced_doc_strings: config.fenced_doc_strings,
            input: String::new(),
            pos: 0,
            line: 0,
            eof: (1, 1),
            pending: VecDeque::new(),
            conditions: ConditionStack::new(),
            doc_strings: BTreeMap::new(),
            open_doc_string: None,
            header_allowed: true,
        }
    }

    /// Replace the input and reset every piece of lexing state, including a
    /// dialect selected by a previous document's `# language:` header.
    pub fn set_input(&mut self, text: &str) {
        text.clone_into(&mut self.input);
        self.pos = 0;
        self.line = 0;
        self.eof = (1, 1);
        self.pending.clear();
        self.conditions.reset();
        self.doc_strings.clear();
        self.open_doc_string = None;
        self.header_allowed = true;
        if self.language != self.default_language {
            self.language.clone_from(&self.default_language);
            self.use_dialect(self.default_dialect);
        }
    }

    /// The active states, bottom first. The bottom is always
    /// [`Condition::Initial`].
    #[must_use]
    pub fn condition_stack(&self) -> &[Condition] {
        self.conditions.as_slice()
    }

    /// Language code of the dialect currently in use.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Produce the next token. Once the input is exhausted every call returns
    /// an [`TokenKind::Eof`] token.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for unterminated doc strings and table rows,
    /// malformed tag lines and unknown `# language:` headers.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                if token.is(TokenKind::Eol) && !self.conditions.pop_if(Condition::Tags) {
                    self.conditions.pop_if(Condition::Table);
                }
                trace!("token {:?} {:?} at {}:{}", token.kind, token.text, token.line, token.column);
                return Ok(token);
            }

            let Some((line, next)) = line::next_line(&self.input, self.pos, self.line + 1) else {
                if let Some(line) = self.open_doc_string {
                    return Err(LexError::UnterminatedDocString { line });
                }
                let (line, column) = self.eof;
                return Ok(Token::new(TokenKind::Eof, "", line, column));
            };
            self.pos = next;
            self.line = line.number;
            self.eof = if line.terminator.is_empty() {
                (line.number, line.content.chars().count() + 1)
            } else {
                (line.number + 1, 1)
            };

            if self.open_doc_string.is_some() {
                self.lex_doc_string_line(&line);
            } else {
                self.classify(&line)?;
            }
        }
    }

    /// Tokenize a whole document, ending with the [`TokenKind::Eof`] token.
    ///
    /// # Errors
    ///
    /// Returns the first [`LexError`] encountered.
    pub fn tokenize(&mut self, text: &str) -> Result<Vec<Token>, LexError> {
        self.set_input(text);
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Semantic keyword of a step token's text in the active dialect.
    pub(crate) fn step_keyword(&self, text: &str) -> Option<StepKeyword> {
        let text = text.trim_end();
        self.steps
            .iter()
            .find(|surface| surface.text == text)
            .map(|surface| surface.keyword)
    }

    /// The first doc string block whose opening delimiter lies on one of
    /// `lines`. Only blocks the lexer has already reached are known.
    #[must_use]
    pub fn doc_string_opened_in(&self, lines: Range<usize>) -> Option<DocStringBlock> {
        if lines.start >= lines.end {
            return None;
        }
        self.doc_strings.range(lines).next().map(|(_, block)| *block)
    }

    /// The doc string block opened on `line`, if any.
    #[must_use]
    pub fn doc_string_at(&self, line: usize) -> Option<DocStringBlock> {
        self.doc_strings.get(&line).copied()
    }

    fn use_dialect(&mut self, dialect: &'d Dialect) {
        self.structural = dialect.structural_table();
        self.steps = dialect.step_table();
    }

    fn lex_doc_string_line(&mut self, line: &Line) {
        let Some(block) = self
            .open_doc_string
            .and_then(|opened| self.doc_strings.get_mut(&opened))
        else {
            return;
        };
        if delimiter_rest(line.trimmed(), block.delimiter).is_some() {
            block.closing_line = Some(line.number);
            self.open_doc_string = None;
            self.conditions.pop_if(Condition::DocString);
            return;
        }
        let column = block.column;
        self.pending.push_back(Token::new(
            TokenKind::DocStringLine,
            line.raw(),
            line.number,
            column,
        ));
    }

    fn classify(&mut self, line: &Line) -> Result<(), LexError> {
        if line.is_blank() {
            return Ok(());
        }
        let trimmed = line.trimmed();
        let column = line.column();

        if trimmed.starts_with('#') {
            return self.lex_comment(line);
        }
        self.header_allowed = false;

        if let Some(delimiter) = self.opening_delimiter(trimmed) {
            self.conditions.push(Condition::DocString);
            self.doc_strings.insert(
                line.number,
                DocStringBlock {
                    delimiter,
                    line: line.number,
                    column,
                    closing_line: None,
                },
            );
            self.open_doc_string = Some(line.number);
            return Ok(());
        }

        if trimmed.starts_with('|') {
            let tokens = table::lex_row(trimmed, line.number, column, &line.terminator)?;
            self.conditions.push(Condition::Table);
            self.pending.extend(tokens);
            return Ok(());
        }

        if trimmed.starts_with('@') {
            let tokens = line::lex_tags(line)?;
            self.conditions.push(Condition::Tags);
            self.pending.extend(tokens);
            return Ok(());
        }

        if let Some((kind, surface, rest)) = self.match_structural(trimmed) {
            self.pending
                .push_back(Token::new(kind, format!("{surface}:"), line.number, column));
            self.push_name(rest, line.number, column + surface.chars().count() + 1);
            return Ok(());
        }

        if let Some((surface, separator, rest)) = self.match_step(trimmed) {
            let mut text = surface.to_string();
            text.extend(separator);
            let offset = text.chars().count();
            self.pending
                .push_back(Token::new(TokenKind::Step, text, line.number, column));
            self.push_name(rest, line.number, column + offset);
            return Ok(());
        }

        self.pending.push_back(Token::new(
            TokenKind::DescriptionLine,
            trimmed,
            line.number,
            column,
        ));
        Ok(())
    }

    fn lex_comment(&mut self, line: &Line) -> Result<(), LexError> {
        let comment = line.content.trim();
        if self.header_allowed {
            if let Some(language) = line::language_header(comment) {
                let dialect =
                    self.dialects
                        .get(language)
                        .ok_or_else(|| LexError::UnknownLanguage {
                            line: line.number,
                            language: language.to_string(),
                        })?;
                debug!("line {}: switching to dialect `{language}`", line.number);
                language.clone_into(&mut self.language);
                self.use_dialect(dialect);
            }
        }
        self.pending.push_back(Token::new(
            TokenKind::Comment,
            comment,
            line.number,
            line.column(),
        ));
        Ok(())
    }

    fn opening_delimiter(&self, trimmed: &str) -> Option<&'static str> {
        if delimiter_rest(trimmed, DOC_STRING_QUOTES).is_some() {
            Some(DOC_STRING_QUOTES)
        } else if self.fenced_doc_strings && delimiter_rest(trimmed, DOC_STRING_FENCE).is_some() {
            Some(DOC_STRING_FENCE)
        } else {
            None
        }
    }

    fn match_structural<'t>(&self, trimmed: &'t str) -> Option<(TokenKind, &'d str, &'t str)> {
        self.structural.iter().find_map(|&(keyword, surface)| {
            let rest = trimmed.strip_prefix(surface)?.strip_prefix(':')?;
            Some((structural_kind(keyword), surface, rest))
        })
    }

    /// Match a step keyword, returning its text, the separator consumed
    /// after it and the rest of the line. Keywords without a separator run
    /// straight into the step text.
    fn match_step<'t>(&self, trimmed: &'t str) -> Option<(&'d str, Option<char>, &'t str)> {
        self.steps.iter().find_map(|surface| {
            let rest = trimmed.strip_prefix(surface.text)?;
            if !surface.separated {
                return Some((surface.text, None, rest));
            }
            let separator = rest.chars().next().filter(|c| c.is_whitespace())?;
            let rest = rest.strip_prefix(separator)?;
            Some((surface.text, Some(separator), rest))
        })
    }

    /// Queue a name token for the trimmed `rest`, which starts at `column`.
    fn push_name(&mut self, rest: &str, line: usize, column: usize) {
        let name = rest.trim();
        if name.is_empty() {
            return;
        }
        let leading = rest.chars().take_while(|c| c.is_whitespace()).count();
        self.pending
            .push_back(Token::new(TokenKind::Name, name, line, column + leading));
    }
}

/// What follows `delimiter` on a delimiter line, provided it is only
/// whitespace.
fn delimiter_rest<'t>(trimmed: &'t str, delimiter: &str) -> Option<&'t str> {
    trimmed
        .strip_prefix(delimiter)
        .filter(|rest| rest.trim().is_empty())
}

fn structural_kind(keyword: StructuralKeyword) -> TokenKind {
    match keyword {
        StructuralKeyword::Feature => TokenKind::Feature,
        StructuralKeyword::Rule => TokenKind::Rule,
        StructuralKeyword::Background => TokenKind::Background,
        StructuralKeyword::Scenario => TokenKind::Scenario,
        StructuralKeyword::ScenarioOutline => TokenKind::ScenarioOutline,
        StructuralKeyword::Examples => TokenKind::Examples,
    }
}

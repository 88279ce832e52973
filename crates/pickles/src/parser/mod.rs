//! Recursive-descent parser building a [`Feature`] from the token stream.
//!
//! The parser never recovers: the first token that does not fit the grammar
//! aborts parsing with a [`SyntaxError`] located at that token.

mod args;
mod cursor;

use std::collections::HashSet;

use log::debug;
use pickles_dialect::{Dialects, StepKeyword};

use crate::ast::{
    Background, DataTable, DocString, Examples, Feature, Location, Rule, Scenario,
    ScenarioDefinition, ScenarioOutline, Step, StepArgument, TableCell, TableRow, Tag,
};
use crate::config::ParserConfig;
use crate::error::{LexError, ParseError, SyntaxError};
use crate::lexer::{DocStringBlock, Lexer};
use crate::token::{Token, TokenKind};

use cursor::Cursor;

/// Parses feature documents into syntax trees.
///
/// A parser owns its lexer and can be reused for any number of documents.
///
/// # Examples
/// ```
/// use pickles::Parser;
///
/// let feature = Parser::new()
///     .parse("Feature: Eating\n  Scenario: lunch\n    Given I am hungry\n")
///     .unwrap();
/// assert_eq!(feature.name, "Eating");
/// assert_eq!(feature.children.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Parser<'d> {
    lexer: Lexer<'d>,
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<'static> {
    /// A parser using the bundled dialects and English keywords.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lexer: Lexer::new(),
        }
    }
}

impl<'d> Parser<'d> {
    /// A parser over a custom dialect registry.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::UnknownLanguage`] when the configured language is
    /// not in `dialects`.
    pub fn with_config(dialects: &'d Dialects, config: &ParserConfig) -> Result<Self, LexError> {
        Ok(Self {
            lexer: Lexer::with_config(dialects, config)?,
        })
    }

    /// Parse one document.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Lex`] when the text cannot be tokenised and
    /// [`ParseError::Syntax`] when the tokens do not form a feature.
    pub fn parse(&mut self, text: &str) -> Result<Feature, ParseError> {
        self.lexer.set_input(text);
        let mut grammar = Grammar {
            cursor: Cursor::new(&mut self.lexer),
        };
        let feature = grammar.document()?;
        debug!(
            "parsed feature `{}`: {} definitions, {} rules",
            feature.name,
            feature.children.len(),
            feature.rules.len()
        );
        Ok(feature)
    }
}

struct Grammar<'l, 'd> {
    cursor: Cursor<'l, 'd>,
}

fn location(token: &Token) -> Location {
    Location::new(token.line, token.column)
}

fn keyword(token: &Token) -> String {
    token
        .text
        .strip_suffix(':')
        .unwrap_or(&token.text)
        .to_string()
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof | TokenKind::Eol | TokenKind::DocStringLine => {
            token.kind.describe().to_string()
        }
        TokenKind::Name
        | TokenKind::DescriptionLine
        | TokenKind::Cell
        | TokenKind::Tag
        | TokenKind::Comment => format!("{} `{}`", token.kind, token.text),
        _ => format!("`{}`", token.text.trim_end()),
    }
}

fn unexpected(token: &Token, expected: &str) -> ParseError {
    SyntaxError::new(token.line, token.column, expected, describe(token)).into()
}

const DEFINITION_EXPECTED: &str = "`Scenario:`, `Scenario Outline:`, `Rule:` or end of input";

impl Grammar<'_, '_> {
    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        let token = self.cursor.advance()?;
        if token.is(kind) {
            Ok(token)
        } else {
            Err(unexpected(&token, expected))
        }
    }

    fn optional_name(&mut self) -> Result<String, ParseError> {
        Ok(self
            .cursor
            .take_if(TokenKind::Name)?
            .map(|token| token.text)
            .unwrap_or_default())
    }

    fn document(&mut self) -> Result<Feature, ParseError> {
        let tags = self.tags()?;
        let feature = self.expect(TokenKind::Feature, "`Feature:`")?;
        let name = self.expect(TokenKind::Name, "a feature name")?.text;
        let description = self.description()?;
        let background = self.background()?;
        let children = self.definitions()?;

        let mut rules = Vec::new();
        while self.cursor.kind_after_tags()? == TokenKind::Rule {
            rules.push(self.rule()?);
        }

        let end = self.cursor.advance()?;
        if !end.is(TokenKind::Eof) {
            return Err(unexpected(&end, DEFINITION_EXPECTED));
        }

        Ok(Feature {
            tags,
            keyword: keyword(&feature),
            name,
            description,
            background,
            children,
            rules,
            language: self.cursor.language().to_string(),
            location: location(&feature),
        })
    }

    fn rule(&mut self) -> Result<Rule, ParseError> {
        let tags = self.tags()?;
        let rule = self.expect(TokenKind::Rule, "`Rule:`")?;
        Ok(Rule {
            tags,
            keyword: keyword(&rule),
            name: self.optional_name()?,
            description: self.description()?,
            background: self.background()?,
            children: self.definitions()?,
            location: location(&rule),
        })
    }

    fn tags(&mut self) -> Result<Vec<Tag>, ParseError> {
        let mut tags = Vec::new();
        while let Some(token) = self.cursor.take_if(TokenKind::Tag)? {
            tags.push(Tag {
                location: location(&token),
                name: token.text,
            });
            self.cursor.take_if(TokenKind::Eol)?;
        }
        Ok(tags)
    }

    fn description(&mut self) -> Result<Vec<String>, ParseError> {
        let mut lines = Vec::new();
        while let Some(token) = self.cursor.take_if(TokenKind::DescriptionLine)? {
            lines.push(token.text);
        }
        Ok(lines)
    }

    fn background(&mut self) -> Result<Option<Background>, ParseError> {
        if self.cursor.kind_after_tags()? != TokenKind::Background {
            return Ok(None);
        }
        let first = self.cursor.peek()?;
        if first.is(TokenKind::Tag) {
            return Err(SyntaxError::new(
                first.line,
                first.column,
                "`Background:` without tags",
                describe(first),
            )
            .into());
        }
        let background = self.cursor.advance()?;
        Ok(Some(Background {
            keyword: keyword(&background),
            name: self.optional_name()?,
            description: self.description()?,
            steps: self.steps()?,
            location: location(&background),
        }))
    }

    fn definitions(&mut self) -> Result<Vec<ScenarioDefinition>, ParseError> {
        let mut definitions = Vec::new();
        loop {
            match self.cursor.kind_after_tags()? {
                TokenKind::Scenario => {
                    definitions.push(ScenarioDefinition::Scenario(self.scenario()?));
                }
                TokenKind::ScenarioOutline => {
                    definitions.push(ScenarioDefinition::Outline(self.outline()?));
                }
                _ => return Ok(definitions),
            }
        }
    }

    fn scenario(&mut self) -> Result<Scenario, ParseError> {
        let tags = self.tags()?;
        let scenario = self.expect(TokenKind::Scenario, "`Scenario:`")?;
        Ok(Scenario {
            tags,
            keyword: keyword(&scenario),
            name: self.optional_name()?,
            description: self.description()?,
            steps: self.steps()?,
            location: location(&scenario),
        })
    }

    fn outline(&mut self) -> Result<ScenarioOutline, ParseError> {
        let tags = self.tags()?;
        let outline = self.expect(TokenKind::ScenarioOutline, "`Scenario Outline:`")?;
        let name = self.optional_name()?;
        let description = self.description()?;
        let steps = self.steps()?;
        let mut examples = Vec::new();
        while self.cursor.kind_after_tags()? == TokenKind::Examples {
            examples.push(self.examples()?);
        }
        Ok(ScenarioOutline {
            tags,
            keyword: keyword(&outline),
            name,
            description,
            steps,
            examples,
            location: location(&outline),
        })
    }

    fn examples(&mut self) -> Result<Examples, ParseError> {
        let tags = self.tags()?;
        let examples = self.expect(TokenKind::Examples, "`Examples:`")?;
        let name = self.optional_name()?;
        let description = self.description()?;
        if self.cursor.peek_kind()? != TokenKind::Pipe {
            let next = self.cursor.peek()?;
            return Err(unexpected(next, "an examples table"));
        }
        let table = self.table()?;
        check_unique_header(&table)?;
        Ok(Examples {
            tags,
            keyword: keyword(&examples),
            name,
            description,
            table,
            location: location(&examples),
        })
    }

    fn steps(&mut self) -> Result<Vec<Step>, ParseError> {
        let mut previous = None;
        let mut steps = Vec::new();
        while let Some(token) = self.cursor.take_if(TokenKind::Step)? {
            steps.push(self.step(token, &mut previous)?);
        }
        Ok(steps)
    }

    fn step(
        &mut self,
        token: Token,
        previous: &mut Option<StepKeyword>,
    ) -> Result<Step, ParseError> {
        let keyword_type = self
            .cursor
            .step_keyword(&token.text)
            .and_then(|keyword| keyword.resolve(previous))
            .ok_or_else(|| {
                SyntaxError::new(
                    token.line,
                    token.column,
                    "a preceding Given, When or Then step",
                    describe(&token),
                )
            })?;
        let name = self.expect(TokenKind::Name, "a step name")?.text;
        let next = self.cursor.peek()?;
        let (next_kind, next_line) = (next.kind, next.line);
        let block = self.cursor.doc_string_opened_in(token.line + 1..next_line);
        let argument = match (block, next_kind) {
            (Some(block), _) => Some(StepArgument::DocString(self.doc_string(block)?)),
            (None, TokenKind::Pipe) => Some(StepArgument::DataTable(self.table()?)),
            (None, _) => None,
        };
        Ok(Step {
            location: location(&token),
            keyword: token.text,
            keyword_type,
            name,
            argument,
        })
    }

    fn table(&mut self) -> Result<DataTable, ParseError> {
        let mut rows: Vec<TableRow> = Vec::new();
        while let Some(open) = self.cursor.take_if(TokenKind::Pipe)? {
            let row = self.row(&open)?;
            if let Some(first) = rows.first() {
                if first.cells.len() != row.cells.len() {
                    return Err(SyntaxError::new(
                        open.line,
                        open.column,
                        format!("a row of {} cells", first.cells.len()),
                        format!("{} cells", row.cells.len()),
                    )
                    .into());
                }
            }
            rows.push(row);
        }
        let location = rows.first().map(|row| row.location).unwrap_or_default();
        Ok(DataTable { rows, location })
    }

    fn row(&mut self, open: &Token) -> Result<TableRow, ParseError> {
        let mut cells = Vec::new();
        let mut pending: Option<Token> = None;
        let mut last_pipe = location(open);
        loop {
            let token = self.cursor.advance()?;
            match token.kind {
                TokenKind::Cell => pending = Some(token),
                TokenKind::Pipe => {
                    cells.push(match pending.take() {
                        Some(cell) => {
                            let (value, leading) = args::cell_value(&cell.text);
                            TableCell {
                                value,
                                location: Location::new(cell.line, cell.column + leading),
                            }
                        }
                        None => TableCell {
                            value: String::new(),
                            location: last_pipe,
                        },
                    });
                    last_pipe = location(&token);
                }
                TokenKind::Eol => break,
                _ => return Err(unexpected(&token, "a table cell or `|`")),
            }
        }
        Ok(TableRow {
            cells,
            location: location(open),
        })
    }

    /// Collect the lines of `block`, which may have none.
    fn doc_string(&mut self, block: DocStringBlock) -> Result<DocString, ParseError> {
        let indent = block.column.saturating_sub(1);
        let mut lines = Vec::new();
        loop {
            let next = self.cursor.peek()?;
            let (kind, line) = (next.kind, next.line);
            let closing = self
                .cursor
                .doc_string_at(block.line)
                .and_then(|opened| opened.closing_line);
            if kind != TokenKind::DocStringLine || closing.is_some_and(|end| line > end) {
                break;
            }
            let token = self.cursor.advance()?;
            lines.push(args::strip_indent(&token.text, indent).to_string());
        }
        Ok(DocString {
            lines,
            delimiter: block.delimiter.to_string(),
            indent,
            location: Location::new(block.line, block.column),
        })
    }
}

fn check_unique_header(table: &DataTable) -> Result<(), ParseError> {
    let Some(header) = table.rows.first() else {
        return Ok(());
    };
    let mut seen = HashSet::new();
    for cell in &header.cells {
        if !seen.insert(cell.value.as_str()) {
            return Err(SyntaxError::new(
                cell.location.line,
                cell.location.column,
                "unique column names",
                format!("duplicate column `{}`", cell.value),
            )
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;

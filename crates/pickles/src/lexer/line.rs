//! Line splitting and the line-level sub-lexers (tags, language headers).

use std::sync::LazyLock;

use regex::Regex;

use crate::error::LexError;
use crate::token::{Token, TokenKind};

static LANGUAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#\s*language\s*:\s*([A-Za-z0-9_-]+)\s*$")
        .unwrap_or_else(|_| unreachable!("language header regex is valid"))
});

/// One physical line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Line {
    /// 1-based line number.
    pub(super) number: usize,
    /// Line content without its terminator.
    pub(super) content: String,
    /// `"\n"`, `"\r\n"`, or empty for a final unterminated line.
    pub(super) terminator: String,
}

impl Line {
    /// Content with leading whitespace removed.
    pub(super) fn trimmed(&self) -> &str {
        self.content.trim_start()
    }

    /// 1-based column of the first non-whitespace character.
    pub(super) fn column(&self) -> usize {
        self.content.chars().take_while(|c| c.is_whitespace()).count() + 1
    }

    pub(super) fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// The line exactly as it appeared in the input.
    pub(super) fn raw(&self) -> String {
        format!("{}{}", self.content, self.terminator)
    }
}

/// Split the line starting at byte `pos` off `input`.
///
/// Returns the line and the byte offset of the following line, or `None` at
/// end of input.
pub(super) fn next_line(input: &str, pos: usize, number: usize) -> Option<(Line, usize)> {
    let rest = input.get(pos..).filter(|rest| !rest.is_empty())?;
    let (body, terminator, consumed) = match rest.split_once('\n') {
        Some((body, _)) => match body.strip_suffix('\r') {
            Some(stripped) => (stripped, "\r\n", body.len() + 1),
            None => (body, "\n", body.len() + 1),
        },
        None => (rest, "", rest.len()),
    };
    let line = Line {
        number,
        content: body.to_string(),
        terminator: terminator.to_string(),
    };
    Some((line, pos + consumed))
}

/// Extract the language code from a `# language: xx` comment.
pub(super) fn language_header(comment: &str) -> Option<&str> {
    LANGUAGE_RE
        .captures(comment.trim_end())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Split a tag line into tag tokens followed by an end-of-line token.
///
/// Words are separated by whitespace. A word starting with `#` begins a
/// trailing comment that runs to the end of the line.
pub(super) fn lex_tags(line: &Line) -> Result<Vec<Token>, LexError> {
    let base = line.column();
    let mut words: Vec<(usize, String)> = Vec::new();
    let mut current: Option<(usize, String)> = None;
    for (offset, ch) in line.trimmed().chars().enumerate() {
        if ch.is_whitespace() {
            words.extend(current.take());
        } else {
            current
                .get_or_insert_with(|| (offset, String::new()))
                .1
                .push(ch);
        }
    }
    words.extend(current);

    let mut tokens = Vec::with_capacity(words.len() + 1);
    let mut end = base;
    for (offset, word) in words {
        if word.starts_with('#') {
            break;
        }
        let column = base + offset;
        if !is_tag(&word) {
            return Err(LexError::IllegalTagCharacter {
                line: line.number,
                column,
                found: word,
            });
        }
        end = column + word.chars().count();
        tokens.push(Token::new(TokenKind::Tag, word, line.number, column));
    }
    tokens.push(Token::new(
        TokenKind::Eol,
        line.terminator.as_str(),
        line.number,
        end,
    ));
    Ok(tokens)
}

fn is_tag(word: &str) -> bool {
    word.strip_prefix('@')
        .is_some_and(|name| !name.is_empty() && !name.contains('@'))
}

//! Table row scanning.
//!
//! The opening pipe of a row is emitted bare. Every later pipe absorbs the
//! run of spaces and tabs directly after it, so whitespace in front of a
//! cell's text belongs to the separator while whitespace behind it stays in
//! the cell. Cells are raw: escapes are kept verbatim and only stop a `\|`
//! from splitting the cell.

use crate::error::LexError;
use crate::token::{Token, TokenKind};

/// Scan one table row.
///
/// `row` starts at the opening `|` and excludes the line terminator;
/// `column` is the 1-based column of that pipe. The returned tokens end with
/// an [`TokenKind::Eol`] carrying `terminator`.
pub(super) fn lex_row(
    row: &str,
    line: usize,
    column: usize,
    terminator: &str,
) -> Result<Vec<Token>, LexError> {
    let mut chars = row.chars().enumerate().peekable();
    let mut tokens = Vec::new();

    if chars.next_if(|&(_, ch)| ch == '|').is_none() {
        return Err(LexError::UnterminatedTableRow { line });
    }
    tokens.push(Token::new(TokenKind::Pipe, "|", line, column));
    let mut last = TokenKind::Pipe;
    let mut width = 1;

    while let Some((offset, ch)) = chars.next() {
        let mut text = String::from(ch);
        if ch == '|' {
            while let Some((_, ws)) = chars.next_if(|&(_, c)| c == ' ' || c == '\t') {
                text.push(ws);
            }
            last = TokenKind::Pipe;
        } else {
            let mut escaped = ch == '\\';
            loop {
                let esc = escaped;
                let Some((_, c)) = chars.next_if(move |&(_, c)| esc || c != '|') else {
                    break;
                };
                escaped = !esc && c == '\\';
                text.push(c);
            }
            last = TokenKind::Cell;
        }
        width = offset + text.chars().count();
        tokens.push(Token::new(last, text, line, column + offset));
    }

    if last == TokenKind::Cell {
        return Err(LexError::UnterminatedTableRow { line });
    }
    tokens.push(Token::new(TokenKind::Eol, terminator, line, column + width));
    Ok(tokens)
}

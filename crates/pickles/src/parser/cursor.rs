//! Buffered view over the lexer with arbitrary lookahead.

use std::collections::VecDeque;
use std::ops::Range;

use pickles_dialect::StepKeyword;

use crate::error::LexError;
use crate::lexer::{DocStringBlock, Lexer};
use crate::token::{Token, TokenKind};

/// Pulls tokens from a [`Lexer`] on demand, dropping comments.
pub(super) struct Cursor<'l, 'd> {
    lexer: &'l mut Lexer<'d>,
    buffer: VecDeque<Token>,
}

impl<'l, 'd> Cursor<'l, 'd> {
    pub(super) fn new(lexer: &'l mut Lexer<'d>) -> Self {
        Self {
            lexer,
            buffer: VecDeque::new(),
        }
    }

    /// Token `n` positions ahead. The lexer repeats its end-of-input token,
    /// so any lookahead distance can be satisfied.
    pub(super) fn peek_nth(&mut self, n: usize) -> Result<&Token, LexError> {
        while self.buffer.len() <= n {
            let token = self.lexer.next_token()?;
            if !token.is(TokenKind::Comment) {
                self.buffer.push_back(token);
            }
        }
        Ok(self
            .buffer
            .get(n)
            .unwrap_or_else(|| unreachable!("lookahead buffer holds {n} tokens")))
    }

    pub(super) fn peek(&mut self) -> Result<&Token, LexError> {
        self.peek_nth(0)
    }

    pub(super) fn peek_kind(&mut self) -> Result<TokenKind, LexError> {
        Ok(self.peek()?.kind)
    }

    /// Kind of the first token after any run of tag lines.
    pub(super) fn kind_after_tags(&mut self) -> Result<TokenKind, LexError> {
        let mut n = 0;
        loop {
            match self.peek_nth(n)?.kind {
                TokenKind::Tag | TokenKind::Eol => n += 1,
                kind => return Ok(kind),
            }
        }
    }

    pub(super) fn advance(&mut self) -> Result<Token, LexError> {
        self.peek()?;
        Ok(self
            .buffer
            .pop_front()
            .unwrap_or_else(|| unreachable!("peek filled the lookahead buffer")))
    }

    /// Consume the next token if it has `kind`.
    pub(super) fn take_if(&mut self, kind: TokenKind) -> Result<Option<Token>, LexError> {
        if self.peek_kind()? == kind {
            self.advance().map(Some)
        } else {
            Ok(None)
        }
    }

    pub(super) fn step_keyword(&self, text: &str) -> Option<StepKeyword> {
        self.lexer.step_keyword(text)
    }

    pub(super) fn doc_string_opened_in(&self, lines: Range<usize>) -> Option<DocStringBlock> {
        self.lexer.doc_string_opened_in(lines)
    }

    pub(super) fn doc_string_at(&self, line: usize) -> Option<DocStringBlock> {
        self.lexer.doc_string_at(line)
    }

    pub(super) fn language(&self) -> &str {
        self.lexer.language()
    }
}

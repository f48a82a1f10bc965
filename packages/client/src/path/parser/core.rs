//! Core parser structure and token helpers

use std::collections::VecDeque;

use crate::path::{
    ast::Expression,
    error::{PathError, PathResult, invalid_expression_error},
    tokens::{Spanned, Token},
};

/// Recursive-descent parser over a token stream
pub struct PathParser<'a> {
    pub(super) tokens: &'a mut VecDeque<Spanned>,
    pub(super) input: &'a str,
    /// The next primary is the path from the document root
    pub(super) root_pending: bool,
}

impl<'a> PathParser<'a> {
    /// Create new parser
    #[inline]
    pub fn new(tokens: &'a mut VecDeque<Spanned>, input: &'a str) -> Self {
        Self {
            tokens,
            input,
            root_pending: true,
        }
    }

    /// Parse a complete path expression
    ///
    /// # Errors
    /// Returns an `InvalidPath` error when tokens remain that do not form a valid path.
    pub fn parse(mut self) -> PathResult<Expression> {
        let expression = self.parse_logical_or()?;
        match self.peek_token() {
            Some(Token::EOF) | None => Ok(expression),
            Some(token) => {
                let reason = format!("unexpected {token:?}");
                Err(self.error(&reason))
            }
        }
    }

    #[inline]
    pub(super) fn peek_token(&self) -> Option<&Token> {
        self.tokens.front().map(|spanned| &spanned.token)
    }

    #[inline]
    pub(super) fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(n).map(|spanned| &spanned.token)
    }

    #[inline]
    pub(super) fn consume_token(&mut self) -> Option<Token> {
        self.tokens.pop_front().map(|spanned| spanned.token)
    }

    /// Consume the next token if it equals `expected`
    #[inline]
    pub(super) fn eat(&mut self, expected: &Token) -> bool {
        if self.peek_token() == Some(expected) {
            self.tokens.pop_front();
            true
        } else {
            false
        }
    }

    /// Expect a specific token and consume it
    pub(super) fn expect_token(&mut self, expected: &Token) -> PathResult<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            let found = self.peek_token().cloned().unwrap_or(Token::EOF);
            Err(self.error(&format!("expected {expected:?}, found {found:?}")))
        }
    }

    pub(super) fn position(&self) -> usize {
        self.tokens
            .front()
            .map_or(self.input.chars().count(), |spanned| spanned.position)
    }

    pub(super) fn error(&self, reason: &str) -> PathError {
        invalid_expression_error(self.input, reason, Some(self.position()))
    }
}

//! Core tokenizer types and the dispatch loop
//!
//! Lexing is position sensitive: right after a step separator at the top
//! level of a path, names are document keys and may contain `-` and `:` or
//! start with a digit (`some-list`, `x:item`, `map.0`). Inside brackets,
//! parentheses and closures the input is an expression and follows the
//! ordinary identifier, number and operator rules.

use std::collections::VecDeque;

use crate::path::{
    error::{PathResult, invalid_expression_error},
    tokens::{Spanned, Token},
};

/// Tokenizer for a single path expression
pub struct PathTokenizer {
    pub(crate) input: String,
    pub(crate) tokens: VecDeque<Spanned>,
    /// Open `(`, `[` and `{` not yet closed
    pub(crate) nesting: usize,
}

impl PathTokenizer {
    /// Create new tokenizer
    #[inline]
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            tokens: VecDeque::new(),
            nesting: 0,
        }
    }

    /// Tokenize the whole input, ending with [`Token::EOF`]
    ///
    /// # Errors
    /// Returns an `InvalidPath` error for unterminated strings, stray
    /// characters and unbalanced brackets.
    pub fn tokenize(mut self) -> PathResult<VecDeque<Spanned>> {
        use super::{names, numbers, operators, strings};

        let chars: Vec<char> = self.input.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                ' ' | '\t' | '\n' | '\r' => {}
                '\'' | '"' => {
                    i = strings::parse_string_literal(&mut self, &chars, i)?;
                }
                c if self.in_path_position() && names::is_path_name_start(c, &chars, i) => {
                    i = names::parse_path_name(&mut self, &chars, i);
                }
                c if self.follows_member_access() && names::is_identifier_start(c) => {
                    i = names::parse_member_name(&mut self, &chars, i);
                }
                c if c.is_ascii_digit() => {
                    i = numbers::parse_number_literal(&mut self, &chars, i)?;
                }
                c if names::is_identifier_start(c) => {
                    i = names::parse_identifier(&mut self, &chars, i);
                }
                _ => {
                    i = operators::parse_operator(&mut self, &chars, i)?;
                }
            }
            i += 1;
        }

        if self.nesting != 0 {
            return Err(invalid_expression_error(
                &self.input,
                "unbalanced brackets, parentheses or braces",
                Some(chars.len()),
            ));
        }

        self.push(Token::EOF, chars.len());
        Ok(self.tokens)
    }

    #[inline]
    pub(crate) fn push(&mut self, token: Token, position: usize) {
        self.tokens.push_back(Spanned { token, position });
    }

    #[inline]
    pub(crate) fn last_token(&self) -> Option<&Token> {
        self.tokens.back().map(|spanned| &spanned.token)
    }

    /// Top level of the path, at the start or right after a step separator
    pub(crate) fn in_path_position(&self) -> bool {
        self.nesting == 0
            && matches!(
                self.last_token(),
                None | Some(Token::Dot | Token::SpreadDot | Token::At | Token::Root)
            )
    }

    /// Inside an expression, right after `.`, `*.` or `@`
    pub(crate) fn follows_member_access(&self) -> bool {
        matches!(
            self.last_token(),
            Some(Token::Dot | Token::SpreadDot | Token::At)
        )
    }
}

//! Closure literal parsing: `{ [param ->] [def name = expr;]* body }`

use super::core::PathParser;
use crate::path::{
    ast::{Closure, Expression},
    error::PathResult,
    tokens::Token,
};
use crate::value::PathValue;

impl PathParser<'_> {
    pub(super) fn parse_closure(&mut self) -> PathResult<Closure> {
        self.expect_token(&Token::LeftBrace)?;

        let param = match (self.peek_token(), self.peek_nth(1)) {
            (Some(Token::Identifier(name)), Some(Token::Arrow)) => {
                let name = name.clone();
                self.consume_token();
                self.consume_token();
                Some(name)
            }
            (Some(Token::Arrow), _) => {
                self.consume_token();
                None
            }
            _ => None,
        };

        let mut locals = Vec::new();
        while self.eat(&Token::Def) {
            let name = match self.consume_token() {
                Some(Token::Identifier(name)) => name,
                _ => return Err(self.error("expected a variable name after 'def'")),
            };
            self.expect_token(&Token::Assign)?;
            let value = self.parse_logical_or()?;
            while self.eat(&Token::Semicolon) {}
            locals.push((name, value));
        }

        let body = if matches!(self.peek_token(), Some(Token::RightBrace)) {
            Expression::Literal(PathValue::Null)
        } else {
            self.parse_logical_or()?
        };
        while self.eat(&Token::Semicolon) {}
        self.expect_token(&Token::RightBrace)?;

        Ok(Closure {
            param,
            locals,
            body: Box::new(body),
        })
    }
}

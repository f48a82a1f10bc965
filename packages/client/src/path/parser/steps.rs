//! Navigation step parsing
//!
//! Handles the top-level path from the document root and the postfix steps
//! that follow any expression: `.name`, `.@attr`, `[index]`, `.**`, `*.name`,
//! method calls and closure calls.

use super::core::PathParser;
use crate::path::{
    ast::{Expression, IndexSelector, Step},
    error::PathResult,
    tokens::Token,
};

impl PathParser<'_> {
    /// Path from the document root: `$`, `.a`, `a.b[0]`, `[0].x`, `**.find {..}` or nothing
    pub(super) fn parse_root_path(&mut self) -> PathResult<Expression> {
        self.eat(&Token::Root);
        let mut steps = Vec::new();

        if matches!(self.peek_token(), Some(Token::Dot)) && self.starts_step(1) {
            self.consume_token();
        }
        if matches!(self.peek_token(), Some(Token::LeftBracket)) {
            steps.push(self.parse_index_step()?);
        } else if self.starts_step(0) {
            steps.push(self.parse_step()?);
        }

        self.parse_postfix_steps(&mut steps)?;
        Ok(if steps.is_empty() {
            Expression::Root
        } else {
            Expression::Path {
                base: Box::new(Expression::Root),
                steps,
            }
        })
    }

    /// Whether the token `n` ahead can begin a step
    fn starts_step(&self, n: usize) -> bool {
        matches!(
            self.peek_nth(n),
            Some(
                Token::Identifier(_)
                    | Token::String(_)
                    | Token::At
                    | Token::DoubleStar
                    | Token::Star
                    | Token::Integer(_)
                    | Token::True
                    | Token::False
                    | Token::Null
            )
        )
    }

    /// Wrap `base` with any following postfix steps
    pub(super) fn parse_postfix(&mut self, base: Expression) -> PathResult<Expression> {
        let mut steps = Vec::new();
        self.parse_postfix_steps(&mut steps)?;
        Ok(if steps.is_empty() {
            base
        } else {
            Expression::Path {
                base: Box::new(base),
                steps,
            }
        })
    }

    fn parse_postfix_steps(&mut self, steps: &mut Vec<Step>) -> PathResult<()> {
        loop {
            match self.peek_token() {
                Some(Token::Dot) => {
                    self.consume_token();
                    steps.push(self.parse_step()?);
                }
                Some(Token::SpreadDot) => {
                    self.consume_token();
                    let step = self.parse_step()?;
                    steps.push(Step::Spread(Box::new(step)));
                }
                Some(Token::LeftBracket) => steps.push(self.parse_index_step()?),
                _ => return Ok(()),
            }
        }
    }

    /// Single step after a separator
    fn parse_step(&mut self) -> PathResult<Step> {
        match self.consume_token() {
            Some(Token::Identifier(name)) => self.parse_named_step(name),
            Some(Token::String(name)) => Ok(quoted_step(name)),
            Some(Token::At) => match self.consume_token().and_then(|t| t.as_property_name()) {
                Some(name) => Ok(Step::Attribute(name)),
                None => Err(self.error("expected attribute name after '@'")),
            },
            Some(Token::DoubleStar) => Ok(Step::DepthFirst),
            Some(Token::Star) => Ok(Step::Children),
            Some(token) => match token.as_property_name() {
                Some(name) => Ok(Step::Property(name)),
                None => Err(self.error(&format!("unexpected {token:?} where a property was expected"))),
            },
            None => Err(self.error("path ends after a separator")),
        }
    }

    /// `name`, `name(args)`, `name { closure }`, `name(args) { closure }` or `name({ closure })`
    fn parse_named_step(&mut self, name: String) -> PathResult<Step> {
        let mut args = Vec::new();
        if self.eat(&Token::LeftParen) {
            if matches!(self.peek_token(), Some(Token::LeftBrace)) {
                let closure = self.parse_closure()?;
                self.expect_token(&Token::RightParen)?;
                return Ok(Step::ClosureCall { name, args, closure });
            }
            args = self.parse_arguments(&Token::RightParen)?;
            if !matches!(self.peek_token(), Some(Token::LeftBrace)) {
                return Ok(Step::Method { name, args });
            }
        }
        if matches!(self.peek_token(), Some(Token::LeftBrace)) {
            let closure = self.parse_closure()?;
            return Ok(Step::ClosureCall { name, args, closure });
        }
        Ok(Step::Property(name))
    }

    /// Comma separated expressions up to `close`, which is consumed
    pub(super) fn parse_arguments(&mut self, close: &Token) -> PathResult<Vec<Expression>> {
        let mut args = Vec::new();
        if self.eat(close) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_logical_or()?);
            if self.eat(close) {
                return Ok(args);
            }
            self.expect_token(&Token::Comma)?;
        }
    }

    /// `[i]`, `[-1]`, `[a..b]`, `[a..<b]`, `['key']`, `[i, j]`
    fn parse_index_step(&mut self) -> PathResult<Step> {
        self.expect_token(&Token::LeftBracket)?;
        let mut selectors = Vec::new();
        loop {
            let from = self.parse_logical_or()?;
            let selector = match self.peek_token() {
                Some(Token::DotDot | Token::DotDotLess) => {
                    let inclusive = matches!(self.consume_token(), Some(Token::DotDot));
                    let to = self.parse_logical_or()?;
                    IndexSelector::Range { from, to, inclusive }
                }
                _ => IndexSelector::Single(from),
            };
            selectors.push(selector);
            if self.eat(&Token::RightBracket) {
                break;
            }
            self.expect_token(&Token::Comma)?;
        }
        Ok(Step::Index(selectors))
    }
}

/// `'**'` is depth-first search and `'@name'` an attribute
fn quoted_step(name: String) -> Step {
    if name == "**" {
        Step::DepthFirst
    } else if let Some(attribute) = name.strip_prefix('@') {
        Step::Attribute(attribute.to_string())
    } else {
        Step::Property(name)
    }
}

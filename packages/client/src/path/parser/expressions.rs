//! Expression parsing for closures, method arguments and index selectors
//!
//! Precedence from lowest to highest: `||`, `&&`, comparison, additive,
//! multiplicative, unary, primary with postfix steps.

use super::core::PathParser;
use crate::path::{
    ast::{BinaryOp, Expression, LogicalOp, UnaryOp},
    error::PathResult,
    tokens::Token,
};
use crate::value::number::parse_decimal;
use crate::value::{Number, PathValue};

impl PathParser<'_> {
    /// Parse logical OR expressions (lowest precedence)
    pub(super) fn parse_logical_or(&mut self) -> PathResult<Expression> {
        let mut left = self.parse_logical_and()?;

        while self.eat(&Token::LogicalOr) {
            let right = self.parse_logical_and()?;
            left = Expression::Logical {
                left: Box::new(left),
                operator: LogicalOp::Or,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse logical AND expressions
    pub(super) fn parse_logical_and(&mut self) -> PathResult<Expression> {
        let mut left = self.parse_comparison()?;

        while self.eat(&Token::LogicalAnd) {
            let right = self.parse_comparison()?;
            left = Expression::Logical {
                left: Box::new(left),
                operator: LogicalOp::And,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse comparison expressions
    pub(super) fn parse_comparison(&mut self) -> PathResult<Expression> {
        let mut left = self.parse_additive()?;

        while let Some(operator) = self.peek_token().and_then(comparison_operator) {
            self.consume_token();
            let right = self.parse_additive()?;
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> PathResult<Expression> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let operator = match self.peek_token() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Subtract,
                _ => return Ok(left),
            };
            self.consume_token();
            let right = self.parse_multiplicative()?;
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
    }

    fn parse_multiplicative(&mut self) -> PathResult<Expression> {
        let mut left = self.parse_unary()?;

        loop {
            let operator = match self.peek_token() {
                Some(Token::Star) => BinaryOp::Multiply,
                Some(Token::Slash) => BinaryOp::Divide,
                Some(Token::Percent) => BinaryOp::Remainder,
                _ => return Ok(left),
            };
            self.consume_token();
            let right = self.parse_unary()?;
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
    }

    fn parse_unary(&mut self) -> PathResult<Expression> {
        let operator = match self.peek_token() {
            Some(Token::Not) => UnaryOp::Not,
            Some(Token::Minus) => UnaryOp::Negate,
            _ => return self.parse_primary(),
        };
        self.consume_token();
        let operand = self.parse_unary()?;
        Ok(Expression::Unary {
            operator,
            operand: Box::new(operand),
        })
    }

    /// Parse primary expressions (literals, variables, lists, parentheses) and their postfix steps
    pub(super) fn parse_primary(&mut self) -> PathResult<Expression> {
        if self.root_pending {
            self.root_pending = false;
            return self.parse_root_path();
        }

        let base = match self.consume_token() {
            Some(Token::Integer(value)) => Expression::Literal(PathValue::Number(Number::from(value))),
            Some(Token::Decimal(text)) => {
                let number = parse_decimal(&text).map_or_else(
                    || Number::Double(text.parse().unwrap_or(f64::NAN)),
                    Number::BigDecimal,
                );
                Expression::Literal(PathValue::Number(number))
            }
            Some(Token::String(value)) => Expression::Literal(PathValue::String(value)),
            Some(Token::True) => Expression::Literal(PathValue::Bool(true)),
            Some(Token::False) => Expression::Literal(PathValue::Bool(false)),
            Some(Token::Null) => Expression::Literal(PathValue::Null),
            Some(Token::Root | Token::This) => Expression::Root,
            Some(Token::Identifier(name)) => Expression::Variable(name),
            Some(Token::LeftParen) => {
                let inner = self.parse_logical_or()?;
                self.expect_token(&Token::RightParen)?;
                inner
            }
            Some(Token::LeftBracket) => Expression::List(self.parse_arguments(&Token::RightBracket)?),
            Some(token) => {
                return Err(self.error(&format!("unexpected {token:?} in expression")));
            }
            None => return Err(self.error("unexpected end of expression")),
        };

        self.parse_postfix(base)
    }
}

fn comparison_operator(token: &Token) -> Option<BinaryOp> {
    Some(match token {
        Token::Equal => BinaryOp::Equal,
        Token::NotEqual => BinaryOp::NotEqual,
        Token::Less => BinaryOp::Less,
        Token::LessEq => BinaryOp::LessEq,
        Token::Greater => BinaryOp::Greater,
        Token::GreaterEq => BinaryOp::GreaterEq,
        Token::RegexFind => BinaryOp::RegexFind,
        Token::RegexMatch => BinaryOp::RegexMatch,
        Token::In => BinaryOp::In,
        _ => return None,
    })
}

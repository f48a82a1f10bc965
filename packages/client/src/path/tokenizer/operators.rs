//! Punctuation and operator tokenization

use super::core::PathTokenizer;
use crate::path::{
    error::{PathResult, invalid_expression_error},
    tokens::Token,
};

#[inline]
fn peek(chars: &[char], i: usize) -> Option<char> {
    chars.get(i).copied()
}

/// Parse punctuation and operators; returns the index of the last consumed character
pub(crate) fn parse_operator(
    tokenizer: &mut PathTokenizer,
    chars: &[char],
    i: usize,
) -> PathResult<usize> {
    let (token, width) = match chars[i] {
        '$' => (Token::Root, 1),
        '.' => match (peek(chars, i + 1), peek(chars, i + 2)) {
            (Some('.'), Some('<')) => (Token::DotDotLess, 3),
            (Some('.'), _) => (Token::DotDot, 2),
            _ => (Token::Dot, 1),
        },
        '?' if peek(chars, i + 1) == Some('.') => (Token::Dot, 2),
        '*' => match peek(chars, i + 1) {
            Some('*') => (Token::DoubleStar, 2),
            Some('.') if peek(chars, i + 2) != Some('.') => (Token::SpreadDot, 2),
            _ => (Token::Star, 1),
        },
        '[' => {
            tokenizer.nesting += 1;
            (Token::LeftBracket, 1)
        }
        '(' => {
            tokenizer.nesting += 1;
            (Token::LeftParen, 1)
        }
        '{' => {
            tokenizer.nesting += 1;
            (Token::LeftBrace, 1)
        }
        ']' | ')' | '}' => {
            tokenizer.nesting = tokenizer.nesting.checked_sub(1).ok_or_else(|| {
                invalid_expression_error(&tokenizer.input, "unbalanced closing bracket", Some(i))
            })?;
            let token = match chars[i] {
                ']' => Token::RightBracket,
                ')' => Token::RightParen,
                _ => Token::RightBrace,
            };
            (token, 1)
        }
        ',' => (Token::Comma, 1),
        ':' => (Token::Colon, 1),
        ';' => (Token::Semicolon, 1),
        '@' => (Token::At, 1),
        '+' => (Token::Plus, 1),
        '/' => (Token::Slash, 1),
        '%' => (Token::Percent, 1),
        '-' => match peek(chars, i + 1) {
            Some('>') => (Token::Arrow, 2),
            _ => (Token::Minus, 1),
        },
        '=' => match (peek(chars, i + 1), peek(chars, i + 2)) {
            (Some('='), Some('~')) => (Token::RegexMatch, 3),
            (Some('='), _) => (Token::Equal, 2),
            (Some('~'), _) => (Token::RegexFind, 2),
            _ => (Token::Assign, 1),
        },
        '!' => match peek(chars, i + 1) {
            Some('=') => (Token::NotEqual, 2),
            _ => (Token::Not, 1),
        },
        '<' => match peek(chars, i + 1) {
            Some('=') => (Token::LessEq, 2),
            _ => (Token::Less, 1),
        },
        '>' => match peek(chars, i + 1) {
            Some('=') => (Token::GreaterEq, 2),
            _ => (Token::Greater, 1),
        },
        '&' if peek(chars, i + 1) == Some('&') => (Token::LogicalAnd, 2),
        '|' if peek(chars, i + 1) == Some('|') => (Token::LogicalOr, 2),
        other => {
            return Err(invalid_expression_error(
                &tokenizer.input,
                &format!("unexpected character '{other}'"),
                Some(i),
            ));
        }
    };
    tokenizer.push(token, i);
    Ok(i + width - 1)
}

//! Numeric literal tokenization

use super::core::PathTokenizer;
use crate::path::{
    error::{PathResult, invalid_expression_error},
    tokens::Token,
};

/// Parse an integer or decimal literal; returns the index of its last character
///
/// `1..3` is a range, so a `.` only starts a fraction when a digit follows.
/// Type suffixes (`10L`, `1.5f`, `2G`) are accepted and ignored.
pub(crate) fn parse_number_literal(
    tokenizer: &mut PathTokenizer,
    chars: &[char],
    start: usize,
) -> PathResult<usize> {
    let mut i = start;
    let mut decimal = false;

    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_digit() {
        decimal = true;
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < chars.len() && matches!(chars[i], 'e' | 'E') {
        let mut j = i + 1;
        if j < chars.len() && matches!(chars[j], '+' | '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            decimal = true;
            i = j;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        }
    }

    let text: String = chars[start..i].iter().collect();
    if i < chars.len() && matches!(chars[i], 'l' | 'L' | 'f' | 'F' | 'd' | 'D' | 'g' | 'G') {
        i += 1;
    }
    if i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
        return Err(invalid_expression_error(
            &tokenizer.input,
            "malformed number literal",
            Some(start),
        ));
    }

    let token = if decimal {
        Token::Decimal(text)
    } else {
        let value = text.parse::<i128>().map_err(|_| {
            invalid_expression_error(&tokenizer.input, "integer literal out of range", Some(start))
        })?;
        Token::Integer(value)
    };
    tokenizer.push(token, start);
    Ok(i - 1)
}

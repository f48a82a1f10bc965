//! String literal tokenization with escape sequence handling

use super::core::PathTokenizer;
use crate::path::{
    error::{PathResult, invalid_expression_error},
    tokens::Token,
};

/// Parse a single- or double-quoted literal; returns the index of the closing quote
pub(crate) fn parse_string_literal(
    tokenizer: &mut PathTokenizer,
    chars: &[char],
    mut i: usize,
) -> PathResult<usize> {
    let quote = chars[i];
    let start = i;
    i += 1; // Skip opening quote
    let mut value = String::new();

    while i < chars.len() {
        if chars[i] == quote {
            break;
        } else if chars[i] == '\\' && i + 1 < chars.len() {
            i += 1; // Skip backslash
            match chars[i] {
                '"' => value.push('"'),
                '\'' => value.push('\''),
                '\\' => value.push('\\'),
                '/' => value.push('/'),
                '$' => value.push('$'),
                'b' => value.push('\u{0008}'),
                'f' => value.push('\u{000C}'),
                'n' => value.push('\n'),
                'r' => value.push('\r'),
                't' => value.push('\t'),
                'u' => {
                    i = parse_unicode_escape(tokenizer, chars, i, &mut value)?;
                }
                _ => {
                    return Err(invalid_expression_error(
                        &tokenizer.input,
                        "invalid escape sequence",
                        Some(i),
                    ));
                }
            }
        } else {
            value.push(chars[i]);
        }
        i += 1;
    }

    if i >= chars.len() {
        return Err(invalid_expression_error(
            &tokenizer.input,
            "unterminated string literal",
            Some(start),
        ));
    }

    tokenizer.push(Token::String(value), start);
    Ok(i)
}

/// Parse `\uXXXX`; `i` points at the `u`. Returns the index of the last hex digit.
fn parse_unicode_escape(
    tokenizer: &PathTokenizer,
    chars: &[char],
    i: usize,
    value: &mut String,
) -> PathResult<usize> {
    if i + 4 >= chars.len() {
        return Err(invalid_expression_error(
            &tokenizer.input,
            "incomplete unicode escape sequence",
            Some(i),
        ));
    }
    let hex_digits: String = chars[i + 1..i + 5].iter().collect();
    let decoded = u32::from_str_radix(&hex_digits, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| {
            invalid_expression_error(&tokenizer.input, "invalid unicode escape sequence", Some(i))
        })?;
    value.push(decoded);
    Ok(i + 4)
}

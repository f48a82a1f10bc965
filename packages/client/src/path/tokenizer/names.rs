//! Names, identifiers and keywords

use super::core::PathTokenizer;
use crate::path::tokens::Token;

#[inline]
pub(crate) fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

#[inline]
fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[inline]
fn is_path_name_part(c: char) -> bool {
    is_identifier_part(c) || c == '-' || c == ':'
}

/// Whether a top-level path name starts at `i`; a lone `$` is the root marker
pub(crate) fn is_path_name_start(c: char, chars: &[char], i: usize) -> bool {
    match c {
        '$' => chars.get(i + 1).is_some_and(|next| is_identifier_part(*next)),
        ':' => chars.get(i + 1).is_some_and(|next| is_identifier_start(*next)),
        _ => c.is_alphanumeric() || c == '_',
    }
}

/// Document key at the top level of a path (`some-list`, `x:item`, `0`)
pub(crate) fn parse_path_name(tokenizer: &mut PathTokenizer, chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    while i < chars.len() && is_path_name_part(chars[i]) {
        i += 1;
    }
    let name: String = chars[start..i].iter().collect();
    tokenizer.push(Token::Identifier(name), start);
    i - 1
}

/// Member name after `.` inside an expression; keywords are plain names here
pub(crate) fn parse_member_name(tokenizer: &mut PathTokenizer, chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    while i < chars.len() && is_identifier_part(chars[i]) {
        i += 1;
    }
    let name: String = chars[start..i].iter().collect();
    tokenizer.push(Token::Identifier(name), start);
    i - 1
}

/// Identifier or keyword inside an expression
pub(crate) fn parse_identifier(tokenizer: &mut PathTokenizer, chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    while i < chars.len() && is_identifier_part(chars[i]) {
        i += 1;
    }
    let word: String = chars[start..i].iter().collect();
    let token = match word.as_str() {
        "true" => Token::True,
        "false" => Token::False,
        "null" => Token::Null,
        "def" => Token::Def,
        "in" => Token::In,
        "this" => Token::This,
        "$" => Token::Root,
        _ => Token::Identifier(word),
    };
    tokenizer.push(token, start);
    i - 1
}

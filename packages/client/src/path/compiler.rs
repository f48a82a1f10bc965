//! Compilation of path text into a reusable expression

use std::fmt;

use crate::path::{
    ast::Expression,
    error::PathResult,
    parser::PathParser,
    tokenizer::PathTokenizer,
};

/// A parsed path expression and the text it came from
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPath {
    expression: Expression,
    source: String,
}

impl CompiledPath {
    /// Tokenize and parse `path`
    ///
    /// # Errors
    /// Returns an `InvalidPath` error describing the offending position.
    pub fn compile(path: &str) -> PathResult<Self> {
        let mut tokens = PathTokenizer::new(path).tokenize()?;
        let expression = PathParser::new(&mut tokens, path).parse()?;
        tracing::debug!(target: "restcheck::path::parser", path, ?expression, "compiled path");
        Ok(Self {
            expression,
            source: path.to_string(),
        })
    }

    #[inline]
    #[must_use]
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Prefix `path` with a root path
///
/// A trailing dot on the root is optional and paths starting with `[` join
/// without a dot, so `store.book` + `[0]` is `store.book[0]`.
#[must_use]
pub fn join_root_path(root: &str, path: &str) -> String {
    let root = root.trim().trim_end_matches('.');
    let path = path.trim();
    if root.is_empty() || root == "$" {
        return path.to_string();
    }
    if path.is_empty() || path == "$" {
        return root.to_string();
    }
    if path.starts_with('[') {
        format!("{root}{path}")
    } else {
        format!("{root}.{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path_joining() {
        assert_eq!(join_root_path("", "a.b"), "a.b");
        assert_eq!(join_root_path("store.book", "author"), "store.book.author");
        assert_eq!(join_root_path("store.book.", "author"), "store.book.author");
        assert_eq!(join_root_path("store.book", "[0]"), "store.book[0]");
        assert_eq!(join_root_path("store.book", ""), "store.book");
    }

    #[test]
    fn compile_keeps_source() {
        let compiled = CompiledPath::compile("store.book[0].author").expect("valid path");
        assert_eq!(compiled.source(), "store.book[0].author");
        assert!(compiled.expression().root_steps().is_some());
    }

    #[test]
    fn compile_rejects_dangling_tokens() {
        let err = CompiledPath::compile("store.book[0").expect_err("unterminated index");
        assert_eq!(err.kind, crate::path::error::ErrorKind::InvalidPath);
    }
}

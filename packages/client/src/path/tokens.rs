//! Token definitions for path expression lexical analysis

/// Tokens for path expression lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Structural tokens
    /// Root identifier token ($)
    Root,
    /// Step separator (.)
    Dot,
    /// Inclusive range (..)
    DotDot,
    /// Exclusive range (..<)
    DotDotLess,
    /// Spread operator (*.)
    SpreadDot,
    /// Depth-first search marker (**)
    DoubleStar,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Colon,
    Semicolon,
    /// Attribute marker (@)
    At,
    /// Children wildcard in a path, multiplication in an expression (*)
    Star,
    /// Closure parameter arrow (->)
    Arrow,

    // Literals
    /// Quoted string; in path position a literal key
    String(String),
    /// Integer literal
    Integer(i128),
    /// Decimal literal, kept as written
    Decimal(String),
    True,
    False,
    Null,

    // Operators
    Plus,
    Minus,
    Slash,
    Percent,
    Equal,
    NotEqual,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    LogicalAnd,
    LogicalOr,
    Not,
    /// Local variable assignment (=)
    Assign,
    /// Regex find (=~)
    RegexFind,
    /// Regex full match (==~)
    RegexMatch,

    // Keywords
    Def,
    In,
    This,

    /// Property name, identifier or method name
    Identifier(String),

    /// End of input
    EOF,
}

impl Token {
    /// Check if token is a comparison operator
    #[inline]
    #[must_use]
    pub fn is_comparison_operator(&self) -> bool {
        matches!(
            self,
            Token::Equal
                | Token::NotEqual
                | Token::Less
                | Token::LessEq
                | Token::Greater
                | Token::GreaterEq
                | Token::RegexFind
                | Token::RegexMatch
                | Token::In
        )
    }

    /// Text a token stands for when it appears where a property name is expected
    #[must_use]
    pub fn as_property_name(&self) -> Option<String> {
        match self {
            Token::Identifier(name) | Token::String(name) => Some(name.clone()),
            Token::Integer(value) => Some(value.to_string()),
            Token::Decimal(text) => Some(text.clone()),
            Token::True => Some("true".to_string()),
            Token::False => Some("false".to_string()),
            Token::Null => Some("null".to_string()),
            Token::Def => Some("def".to_string()),
            Token::In => Some("in".to_string()),
            Token::This => Some("this".to_string()),
            _ => None,
        }
    }
}

/// A token and the character offset it started at
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

//! Path expression tokenizer

mod core;
mod names;
mod numbers;
mod operators;
mod strings;

pub use self::core::PathTokenizer;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::tokens::Token;

    fn tokens(input: &str) -> Vec<Token> {
        PathTokenizer::new(input)
            .tokenize()
            .expect("tokenizes")
            .into_iter()
            .map(|spanned| spanned.token)
            .collect()
    }

    #[test]
    fn top_level_names_keep_hyphens_colons_and_digits() {
        assert_eq!(
            tokens("root.some-list[0]"),
            vec![
                Token::Identifier("root".into()),
                Token::Dot,
                Token::Identifier("some-list".into()),
                Token::LeftBracket,
                Token::Integer(0),
                Token::RightBracket,
                Token::EOF,
            ]
        );
        assert_eq!(
            tokens("x:response.:item.0"),
            vec![
                Token::Identifier("x:response".into()),
                Token::Dot,
                Token::Identifier(":item".into()),
                Token::Dot,
                Token::Identifier("0".into()),
                Token::EOF,
            ]
        );
        assert_eq!(tokens("map.true")[2], Token::Identifier("true".into()));
    }

    #[test]
    fn closures_use_expression_rules() {
        let toks = tokens("findAll { book -> book.price >= 5 && book.price <= 15.5 }");
        assert!(toks.contains(&Token::Arrow));
        assert!(toks.contains(&Token::GreaterEq));
        assert!(toks.contains(&Token::LogicalAnd));
        assert!(toks.contains(&Token::Decimal("15.5".into())));
    }

    #[test]
    fn ranges_spreads_and_depth_first() {
        assert!(tokens("car[0..1]").contains(&Token::DotDot));
        assert!(tokens("car[0..<1]").contains(&Token::DotDotLess));
        assert!(tokens("list()*.toInteger()").contains(&Token::SpreadDot));
        assert_eq!(tokens("**.find { it }")[0], Token::DoubleStar);
        assert_eq!(tokens("$")[0], Token::Root);
        assert_eq!(tokens("$==p")[1], Token::Equal);
    }

    #[test]
    fn quoted_keys_and_escapes() {
        assert_eq!(tokens("'a.b-c'")[0], Token::String("a.b-c".into()));
        assert_eq!(tokens(r"'it\'s'")[0], Token::String("it's".into()));
        assert!(PathTokenizer::new("'open").tokenize().is_err());
        assert!(PathTokenizer::new("a[0").tokenize().is_err());
        assert!(PathTokenizer::new("a]").tokenize().is_err());
    }
}

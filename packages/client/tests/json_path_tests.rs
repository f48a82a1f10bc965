//! JsonPath integration tests
//!
//! Navigation, closures, absent keys and number coercion over whole documents.

use restcheck_client::config::JsonPathConfig;
use restcheck_client::json::JsonPath;
use restcheck_client::path::ErrorKind;
use restcheck_client::value::{BigInt, Number, NumberReturnType, PathValue};
use serde::Deserialize;
use serde_json::json;

const STORE: &str = r#"{
    "store": {
        "book": [
            {"category": "reference", "author": "Nigel Rees", "title": "Sayings of the Century", "price": 8.95},
            {"category": "fiction", "author": "Evelyn Waugh", "title": "Sword of Honour", "price": 12},
            {"category": "fiction", "author": "Herman Melville", "title": "Moby Dick", "isbn": "0-553-21311-3", "price": 8.99},
            {"category": "fiction", "author": "J. R. R. Tolkien", "title": "The Lord of the Rings", "isbn": "0-395-19395-8", "price": 22.99}
        ],
        "bicycle": {"color": "red", "price": 19.95}
    }
}"#;

/// Route `restcheck::*` logs to the test output; `RUST_LOG=restcheck=trace` shows evaluation steps
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn store() -> JsonPath {
    init_tracing();
    JsonPath::from(STORE).expect("store document parses")
}

#[cfg(test)]
mod navigation_tests {
    use super::*;

    #[test]
    fn index_range_and_union_selectors() {
        let cases = vec![
            ("store.book[0].author", PathValue::from("Nigel Rees"), "first element"),
            ("store.book[-1].title", PathValue::from("The Lord of the Rings"), "negative index"),
            ("store.book[1..2].author", PathValue::from(vec!["Evelyn Waugh", "Herman Melville"]), "inclusive range"),
            ("store.book[0..<1].author", PathValue::from(vec!["Nigel Rees"]), "exclusive range"),
            ("store.book[0, 3].title", PathValue::from(vec!["Sayings of the Century", "The Lord of the Rings"]), "union"),
            ("store.book[9]", PathValue::Null, "out of range"),
        ];

        for (path, expected, description) in cases {
            let actual = store().get_value(path).expect("path evaluates");
            assert_eq!(actual, expected, "{description}: {path}");
        }
    }

    #[test]
    fn leading_root_markers_are_optional() {
        let plain = store().get_value("store.bicycle.color").expect("plain");
        assert_eq!(store().get_value("$.store.bicycle.color").expect("dollar"), plain);
        assert_eq!(store().get_value(".store.bicycle.color").expect("dot"), plain);
    }

    #[test]
    fn root_index_at_path_start() {
        let json = JsonPath::from(r#"[{"author": "Nigel Rees"}, {"author": "Evelyn Waugh"}]"#).expect("array document");
        assert_eq!(json.get_string("[1].author").expect("author").as_deref(), Some("Evelyn Waugh"));
        assert_eq!(json.get_int("size()").expect("size"), 2);
    }

    #[test]
    fn quoted_keys_and_literal_names() {
        let json = JsonPath::from(r#"{"a.b": 1, "some-list": [1, 2], "map": {"0": "zero", "size": "big"}}"#)
            .expect("document parses");
        assert_eq!(json.get_int("'a.b'").expect("quoted key"), 1);
        assert_eq!(json.get_list_as::<i32>("some-list").expect("dashed name"), vec![1, 2]);
        assert_eq!(json.get_string("map.0").expect("numeric key").as_deref(), Some("zero"));
        assert_eq!(json.get_string("map.size").expect("keyword key").as_deref(), Some("big"));
    }

    #[test]
    fn unicode_escapes_in_quoted_text() {
        let json = JsonPath::from(r#"{"Ab": 7}"#).expect("document parses");
        assert_eq!(json.get_int("'\\u0041b'").expect("escaped key"), 7);
        assert_eq!(
            store()
                .get_string("store.book.find { it.author == 'Nigel \\u0052ees' }.title")
                .expect("escaped literal")
                .as_deref(),
            Some("Sayings of the Century")
        );
        let err = json.get_value("'\\u00G1'").expect_err("bad hex digit");
        assert_eq!(err.kind, ErrorKind::InvalidPath);
    }

    #[test]
    fn huge_ranges_clip_to_the_list() {
        let json = JsonPath::from(r#"{"a": [1, 2, 3]}"#).expect("document parses");
        assert_eq!(json.get_value("a[0..2000000000]").expect("clipped range"), PathValue::from(vec![1, 2, 3]));
        assert_eq!(json.get_value("a[-2000000000..1]").expect("clipped start"), PathValue::from(vec![1, 2]));
        assert_eq!(
            json.get_value("a[2000000000..<2000000001]").expect("past the end"),
            PathValue::List(Vec::new())
        );
    }

    #[test]
    fn property_access_spreads_over_lists() {
        let isbns = store().get_value("store.book.isbn").expect("isbns");
        assert_eq!(
            isbns,
            PathValue::from(vec![None, None, Some("0-553-21311-3"), Some("0-395-19395-8")])
        );
    }
}

#[cfg(test)]
mod closure_tests {
    use super::*;

    #[test]
    fn find_and_find_all() {
        let json = store();
        assert_eq!(
            json.get_string("store.book.find { it.category == 'reference' }.author")
                .expect("find")
                .as_deref(),
            Some("Nigel Rees")
        );
        let with_isbn: Vec<String> = json.get_list_as("store.book.findAll { it.isbn }.title").expect("findAll");
        assert_eq!(with_isbn, vec!["Moby Dick", "The Lord of the Rings"]);
    }

    #[test]
    fn aggregates_and_predicates() {
        let json = store();
        assert_eq!(json.get_int("store.book.count { it.category == 'fiction' }").expect("count"), 3);
        assert!(json.get_boolean("store.book.any { it.price > 20 }").expect("any"));
        assert!(!json.get_boolean("store.book.every { it.price > 20 }").expect("every"));
        assert_eq!(
            json.get_string("store.book.max { it.price }.title").expect("max").as_deref(),
            Some("The Lord of the Rings")
        );
        assert_eq!(json.get_list_as::<i32>("store.book.collect { it.title.length() }").expect("collect"), vec![22, 15, 9, 21]);
    }

    #[test]
    fn not_binds_tighter_than_comparison() {
        let json = store();
        assert_eq!(json.get_int("store.book.count { !it.isbn == false }").expect("negated operand"), 2);
        assert_eq!(json.get_int("store.book.count { !(it.isbn == false) }").expect("negated comparison"), 4);
    }

    #[test]
    fn sorting_and_shaping() {
        let json = store();
        let by_price: Vec<String> = json.get_list_as("store.book.sort { it.price }.title").expect("sorted");
        assert_eq!(
            by_price,
            vec!["Sayings of the Century", "Moby Dick", "Sword of Honour", "The Lord of the Rings"]
        );
        let categories: Vec<String> = json.get_list_as("store.book.category.unique()").expect("unique");
        assert_eq!(categories, vec!["reference", "fiction"]);
    }

    #[test]
    fn named_closure_parameters_and_locals() {
        let titles: Vec<String> = store()
            .get_list_as("store.book.findAll { book -> def limit = 9; book.price < limit }.title")
            .expect("named parameter");
        assert_eq!(titles, vec!["Sayings of the Century", "Moby Dick"]);
    }

    #[test]
    fn maps_iterate_as_entries() {
        let json = store();
        let keys: Vec<String> = json.get_list_as("store.bicycle.collect { it.key }").expect("keys");
        assert_eq!(keys, vec!["color", "price"]);
        let colors = json
            .get_map_as::<String, String>("store.bicycle.findAll { it.key == 'color' }")
            .expect("filtered map");
        assert_eq!(colors.get("color").map(String::as_str), Some("red"));
        assert_eq!(colors.len(), 1);
    }

    #[test]
    fn regex_operators_in_closures() {
        let json = store();
        let exact: Vec<String> = json
            .get_list_as("store.book.findAll { it.author ==~ 'Evelyn.*' }.title")
            .expect("full match");
        assert_eq!(exact, vec!["Sword of Honour"]);
        let found: Vec<String> = json
            .get_list_as("store.book.findAll { it.title =~ 'of' }.title")
            .expect("find");
        assert_eq!(found, vec!["Sayings of the Century", "Sword of Honour", "The Lord of the Rings"]);
    }
}

#[cfg(test)]
mod absent_value_tests {
    use super::*;

    #[test]
    fn missing_keys_are_null() {
        let json = store();
        assert_eq!(json.get_value("store.bicycle.brand").expect("missing key"), PathValue::Null);
        assert_eq!(json.get_value("store.nothing.deeper").expect("missing chain"), PathValue::Null);
        assert_eq!(json.get_value("store.bicycle.color.shade").expect("property of scalar"), PathValue::Null);
        assert!(json.get_list("store.bicycle.brand").expect("null list").is_empty());
    }

    #[test]
    fn empty_selections_stay_lists() {
        let json = store();
        assert_eq!(
            json.get_value("store.book.findAll { it.price > 100 }").expect("nothing matches"),
            PathValue::List(Vec::new())
        );
        assert_eq!(
            json.get_value("store.book.findAll { it.price > 100 }.title").expect("spread over nothing"),
            PathValue::List(Vec::new())
        );
        assert_eq!(json.get_value("store.book.find { it.price > 100 }").expect("find nothing"), PathValue::Null);
    }

    #[test]
    fn null_members_are_skipped_by_spread() {
        let json = JsonPath::from(r#"{"items": [{"id": 1}, null, {"name": "x"}]}"#).expect("document parses");
        assert_eq!(json.get_value("items.id").expect("ids"), PathValue::from(vec![Some(1), None]));
    }

    #[test]
    fn malformed_paths_are_invalid() {
        let err = store().get_value("store.book[").expect_err("unterminated index");
        assert_eq!(err.kind, ErrorKind::InvalidPath);
    }
}

#[cfg(test)]
mod number_tests {
    use super::*;

    const NUMBERS: &str = r#"{"int": 5, "long": 9223372036854775807, "big": 123456789012345678901234567890, "dec": 1.5, "huge": 1e300}"#;

    #[test]
    fn default_policy_picks_smallest_variant() {
        let json = JsonPath::from(NUMBERS).expect("numbers parse");
        assert!(matches!(json.get_value("int").expect("int"), PathValue::Number(Number::Integer(5))));
        assert!(matches!(json.get_value("long").expect("long"), PathValue::Number(Number::Long(i64::MAX))));
        assert!(matches!(json.get_value("big").expect("big"), PathValue::Number(Number::BigInteger(_))));
        assert!(matches!(json.get_value("dec").expect("dec"), PathValue::Number(Number::Float(_))));
        assert!(matches!(json.get_value("huge").expect("huge"), PathValue::Number(Number::Double(_))));
    }

    #[test]
    fn other_policies() {
        let doubles = JsonPath::from(NUMBERS)
            .expect("numbers parse")
            .using(JsonPathConfig::new().with_number_return_type(NumberReturnType::Double));
        assert!(matches!(doubles.get_value("dec").expect("dec"), PathValue::Number(Number::Double(_))));

        let integers = JsonPath::from(NUMBERS)
            .expect("numbers parse")
            .using(JsonPathConfig::new().with_number_return_type(NumberReturnType::BigInteger));
        assert!(matches!(
            integers.get_value("int").expect("int"),
            PathValue::Number(Number::BigInteger(ref v)) if *v == BigInt::from(5)
        ));
    }

    #[test]
    fn big_decimals_keep_every_digit() {
        let text = "1234567890123456789012345678901234567890.25";
        let json = JsonPath::from(&format!(r#"{{"v": {text}}}"#))
            .expect("document parses")
            .using(JsonPathConfig::new().with_number_return_type(NumberReturnType::BigDecimal));
        let value = json.get_value("v").expect("v");
        assert!(matches!(value, PathValue::Number(Number::BigDecimal(_))));
        assert_eq!(value.to_string(), text);
        assert_eq!(json.get_string("v").expect("string").as_deref(), Some(text));

        let sum = json.get_value("v + 0.75").expect("exact addition");
        assert_eq!(sum.to_string(), "1234567890123456789012345678901234567891.00");
    }

    #[test]
    fn big_integers_have_no_width_limit() {
        let text = "123456789012345678901234567890123456789012345678901234567890";
        let json = JsonPath::from(&format!(r#"{{"v": {text}}}"#)).expect("document parses");
        assert_eq!(json.get_value("v").expect("v").to_string(), text);
        let less = json.get_value("v - 1").expect("exact subtraction");
        assert_eq!(less.to_string(), "123456789012345678901234567890123456789012345678901234567889");
    }

    #[test]
    fn narrowing_getters_truncate() {
        let json = JsonPath::from(NUMBERS).expect("numbers parse");
        assert_eq!(json.get_byte("long").expect("byte"), -1);
        assert_eq!(json.get_int("dec").expect("int"), 1);
        assert!((json.get_double("dec").expect("double") - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn numeric_strings_convert() {
        let json = JsonPath::from(r#"{"count": "42"}"#).expect("document parses");
        assert_eq!(json.get_long("count").expect("parsed"), 42);
    }
}

#[cfg(test)]
mod document_source_tests {
    use super::*;

    const LATIN_1: &[u8] = b"{\"city\": \"Malm\xF6\"}";

    #[test]
    fn bytes_decode_as_utf8_by_default() {
        init_tracing();
        let json = JsonPath::from_bytes("{\"city\": \"Malm\u{f6}\"}".as_bytes()).expect("UTF-8 document");
        assert_eq!(json.get_string("city").expect("city").as_deref(), Some("Malm\u{f6}"));

        let err = JsonPath::from_bytes(LATIN_1).expect_err("latin-1 bytes are not UTF-8");
        assert_eq!(err.kind, ErrorKind::Conversion);
    }

    #[test]
    fn configured_charset_decodes_bytes() {
        let config = JsonPathConfig::new().with_charset("ISO-8859-1");
        let json = JsonPath::from_bytes_with_config(LATIN_1, config).expect("latin-1 document");
        assert_eq!(json.get_string("city").expect("city").as_deref(), Some("Malm\u{f6}"));
    }

    #[test]
    fn undecodable_bytes_and_unknown_charsets_fail() {
        let ascii = JsonPathConfig::new().with_charset("US-ASCII");
        let err = JsonPath::from_bytes_with_config("{\"city\": \"Malm\u{f6}\"}".as_bytes(), ascii)
            .expect_err("non-ASCII bytes");
        assert_eq!(err.kind, ErrorKind::Conversion);

        let bogus = JsonPathConfig::new().with_charset("x-bogus");
        let err = JsonPath::from_bytes_with_config(b"{}", bogus).expect_err("unknown charset");
        assert_eq!(err.kind, ErrorKind::Conversion);
    }

    #[test]
    fn uuids_parse_from_text() {
        let json = JsonPath::from(r#"{"id": "67e55044-10b1-426f-9247-bb680e5fe0c8", "name": "x"}"#)
            .expect("document parses");
        let expected = uuid::Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").expect("uuid literal");
        assert_eq!(json.get_uuid("id").expect("uuid"), expected);
        assert_eq!(json.get_uuid("name").expect_err("not a uuid").kind, ErrorKind::Conversion);
        assert!(json.get_uuid("missing").is_err());
    }
}

#[cfg(test)]
mod object_tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Book {
        author: String,
        title: String,
        price: f64,
    }

    #[test]
    fn get_object_deserializes_selection() {
        let book: Book = store().get_object("store.book[2]").expect("book shape");
        assert_eq!(book.title, "Moby Dick");
        assert!((book.price - 8.99).abs() < 1e-6);
    }

    #[test]
    fn custom_deserializer_reshapes_values() {
        let config = JsonPathConfig::new().with_object_deserializer(
            |_: &restcheck_client::mapping::DeserializationContext<'_>| -> restcheck_client::path::PathResult<serde_json::Value> {
                Ok(json!({"author": "hook", "title": "hooked", "price": 0}))
            },
        );
        let book: Book = store().using(config).get_object("store.book[0]").expect("hook output");
        assert_eq!(book.author, "hook");
    }
}

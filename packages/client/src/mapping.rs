//! Object deserialization hook
//!
//! `get_object` turns a selected value into a JSON-shaped tree through an
//! [`ObjectDeserializer`] and hands that tree to serde. The default hook is
//! [`PathValue::to_json`]; configurations may install their own to reshape
//! values before serde sees them.

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::http::ContentType;
use crate::path::error::{PathError, PathResult};
use crate::value::PathValue;

/// What a deserializer is asked to convert
#[derive(Debug, Clone, Copy)]
pub struct DeserializationContext<'a> {
    value: &'a PathValue,
    content_type: ContentType,
    charset: &'a str,
}

impl<'a> DeserializationContext<'a> {
    #[inline]
    #[must_use]
    pub fn new(value: &'a PathValue, content_type: ContentType, charset: &'a str) -> Self {
        Self {
            value,
            content_type,
            charset,
        }
    }

    /// The value selected by the path
    #[inline]
    #[must_use]
    pub fn value(&self) -> &'a PathValue {
        self.value
    }

    /// Kind of document the value came from
    #[inline]
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    #[inline]
    #[must_use]
    pub fn charset(&self) -> &'a str {
        self.charset
    }
}

/// Converts a selected value into the JSON tree serde deserializes from
pub trait ObjectDeserializer: Send + Sync {
    /// # Errors
    /// Returns a `Deserialization` error when the value cannot be represented.
    fn deserialize(&self, ctx: &DeserializationContext<'_>) -> PathResult<JsonValue>;
}

impl<F> ObjectDeserializer for F
where
    F: Fn(&DeserializationContext<'_>) -> PathResult<JsonValue> + Send + Sync,
{
    fn deserialize(&self, ctx: &DeserializationContext<'_>) -> PathResult<JsonValue> {
        self(ctx)
    }
}

/// Hook used when no deserializer is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultObjectDeserializer;

impl ObjectDeserializer for DefaultObjectDeserializer {
    fn deserialize(&self, ctx: &DeserializationContext<'_>) -> PathResult<JsonValue> {
        Ok(ctx.value().to_json())
    }
}

/// Run `deserializer` and decode its output into `T`
///
/// # Errors
/// Returns a `Deserialization` error if the hook fails or serde rejects the tree.
pub fn deserialize_as<T: DeserializeOwned>(
    deserializer: &dyn ObjectDeserializer,
    ctx: &DeserializationContext<'_>,
) -> PathResult<T> {
    let tree = deserializer.deserialize(ctx)?;
    serde_json::from_value(tree).map_err(|e| {
        tracing::debug!(target: "restcheck::mapping", error = %e, "object deserialization failed");
        PathError::deserialization(format!(
            "Cannot deserialize {} into {}: {e}",
            ctx.value().type_name(),
            std::any::type_name::<T>()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Book {
        author: String,
        price: f64,
    }

    #[test]
    fn default_hook_goes_through_json() {
        let value = PathValue::from(json!({"author": "Nigel Rees", "price": 8.95}));
        let ctx = DeserializationContext::new(&value, ContentType::Json, "UTF-8");
        let book: Book = deserialize_as(&DefaultObjectDeserializer, &ctx).expect("book shape");
        assert_eq!(book.author, "Nigel Rees");
        assert!((book.price - 8.95).abs() < 1e-6);
    }

    #[test]
    fn closures_are_hooks() {
        let value = PathValue::from("ignored");
        let ctx = DeserializationContext::new(&value, ContentType::Json, "UTF-8");
        let hook = |_: &DeserializationContext<'_>| -> PathResult<JsonValue> {
            Ok(json!({"author": "custom", "price": 1}))
        };
        let book: Book = deserialize_as(&hook, &ctx).expect("custom tree");
        assert_eq!(book.author, "custom");
    }

    #[test]
    fn shape_mismatch_is_a_deserialization_error() {
        let value = PathValue::from(5);
        let ctx = DeserializationContext::new(&value, ContentType::Json, "UTF-8");
        let err = deserialize_as::<Book>(&DefaultObjectDeserializer, &ctx).expect_err("number is not a book");
        assert_eq!(err.kind, crate::path::error::ErrorKind::Deserialization);
    }
}

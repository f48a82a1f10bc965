//! Typed getters shared by [`JsonPath`](crate::json::JsonPath) and [`XmlPath`](crate::xml::XmlPath)

/// Adds the typed getter family to a type with a `get_value(&self, &str) -> PathResult<PathValue>` method
macro_rules! typed_getters {
    ($ty:ty) => {
        impl $ty {
            /// Evaluate `path` and convert the result into `T`
            ///
            /// # Errors
            /// Returns an error if the path is invalid, evaluation fails or the
            /// value does not convert into `T`.
            pub fn get<T: $crate::value::FromPathValue>(&self, path: &str) -> $crate::path::PathResult<T> {
                T::from_path_value(self.get_value(path)?)
            }

            /// # Errors
            /// Fails unless the value is a boolean or the text `true`/`false`.
            pub fn get_boolean(&self, path: &str) -> $crate::path::PathResult<bool> {
                self.get(path)
            }

            /// # Errors
            /// Fails unless the value is exactly one character.
            pub fn get_char(&self, path: &str) -> $crate::path::PathResult<char> {
                self.get(path)
            }

            /// Integer getters narrow the way a cast does: fractions are dropped, high bits wrap
            ///
            /// # Errors
            /// Fails for null, non-numeric text and collections.
            pub fn get_int(&self, path: &str) -> $crate::path::PathResult<i32> {
                self.get(path)
            }

            /// # Errors
            /// See [`Self::get_int`].
            pub fn get_byte(&self, path: &str) -> $crate::path::PathResult<i8> {
                self.get(path)
            }

            /// # Errors
            /// See [`Self::get_int`].
            pub fn get_short(&self, path: &str) -> $crate::path::PathResult<i16> {
                self.get(path)
            }

            /// # Errors
            /// See [`Self::get_int`].
            pub fn get_long(&self, path: &str) -> $crate::path::PathResult<i64> {
                self.get(path)
            }

            /// # Errors
            /// See [`Self::get_int`].
            pub fn get_float(&self, path: &str) -> $crate::path::PathResult<f32> {
                self.get(path)
            }

            /// # Errors
            /// See [`Self::get_int`].
            pub fn get_double(&self, path: &str) -> $crate::path::PathResult<f64> {
                self.get(path)
            }

            /// Text form of the value, `None` when it is null
            ///
            /// # Errors
            /// Fails only when the path itself cannot be evaluated.
            pub fn get_string(&self, path: &str) -> $crate::path::PathResult<Option<String>> {
                self.get(path)
            }

            /// # Errors
            /// Fails for null and text that is not a UUID.
            pub fn get_uuid(&self, path: &str) -> $crate::path::PathResult<uuid::Uuid> {
                self.get(path)
            }

            /// The value as a list; a single value is wrapped and null is empty
            ///
            /// # Errors
            /// Fails only when the path itself cannot be evaluated.
            pub fn get_list(&self, path: &str) -> $crate::path::PathResult<Vec<$crate::value::PathValue>> {
                self.get_value(path).map($crate::value::convert::as_list)
            }

            /// # Errors
            /// Fails when a member does not convert into `T`.
            pub fn get_list_as<T: $crate::value::FromPathValue>(&self, path: &str) -> $crate::path::PathResult<Vec<T>> {
                self.get(path)
            }

            /// # Errors
            /// Fails when the value is not a map (or, for XML, an element with attributes).
            pub fn get_map(
                &self,
                path: &str,
            ) -> $crate::path::PathResult<indexmap::IndexMap<String, $crate::value::PathValue>> {
                self.get_value(path).and_then($crate::value::convert::as_map)
            }

            /// # Errors
            /// Fails when the value is not a map or an entry does not convert.
            pub fn get_map_as<K, V>(&self, path: &str) -> $crate::path::PathResult<indexmap::IndexMap<K, V>>
            where
                K: $crate::value::FromPathValue + std::hash::Hash + Eq,
                V: $crate::value::FromPathValue,
            {
                self.get_value(path).and_then($crate::value::convert::as_map)
            }
        }
    };
}

pub(crate) use typed_getters;

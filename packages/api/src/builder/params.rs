//! Query and path parameters

use crate::builder::core::RequestSpecification;

impl RequestSpecification {
    /// Add a query parameter; repeating a name sends every value
    #[must_use]
    pub fn query_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query_params.push((name.into(), value.to_string()));
        self
    }

    /// Add several query parameters in order
    #[must_use]
    pub fn query_params<I, K, V>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        params
            .into_iter()
            .fold(self, |spec, (name, value)| spec.query_param(name, value))
    }

    /// Bind the `{name}` placeholder of the request path
    ///
    /// # Examples
    /// ```
    /// use restcheck::RestCheck;
    ///
    /// let spec = RestCheck::given().path_param("id", 5);
    /// assert_eq!(spec.resolve_path("/users/{id}").expect("bound"), "/users/5");
    /// ```
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.path_params.insert(name.into(), value.to_string());
        self
    }

    #[must_use]
    pub fn path_params<I, K, V>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        params
            .into_iter()
            .fold(self, |spec, (name, value)| spec.path_param(name, value))
    }
}

//! Ordered, multi-valued header collection

use std::fmt;

use http::{HeaderMap, HeaderName, HeaderValue};

/// A header name and value; names compare case-insensitively
#[derive(Debug, Clone, Eq)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    #[inline]
    #[must_use]
    pub fn has_same_name_as(&self, other: &Header) -> bool {
        self.has_name(&other.name)
    }
}

impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        self.has_same_name_as(other) && self.value == other.value
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Headers in the order they were added; a name may repeat
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    headers: Vec<Header>,
}

impl Headers {
    #[must_use]
    pub fn new(headers: Vec<Header>) -> Self {
        Self { headers }
    }

    pub fn add(&mut self, header: Header) {
        self.headers.push(header);
    }

    /// Drop every header called `name`, then add `header`
    pub fn replace(&mut self, header: Header) {
        self.headers.retain(|existing| !existing.has_same_name_as(&header));
        self.headers.push(header);
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.headers.len()
    }

    #[inline]
    #[must_use]
    pub fn exist(&self) -> bool {
        !self.headers.is_empty()
    }

    #[must_use]
    pub fn has_header_with_name(&self, name: &str) -> bool {
        self.headers.iter().any(|header| header.has_name(name))
    }

    /// The last header called `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Header> {
        self.headers.iter().rev().find(|header| header.has_name(name))
    }

    /// Value of the last header called `name`
    #[must_use]
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(Header::value)
    }

    #[must_use]
    pub fn get_list(&self, name: &str) -> Vec<&Header> {
        self.headers.iter().filter(|header| header.has_name(name)).collect()
    }

    #[must_use]
    pub fn get_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|header| header.has_name(name))
            .map(Header::value)
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> &[Header] {
        &self.headers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.headers.iter()
    }

    /// Convert into an `http::HeaderMap`, keeping repeated names
    ///
    /// # Errors
    /// Returns an error if a name or value is not valid in an HTTP header.
    pub fn to_header_map(&self) -> Result<HeaderMap, http::Error> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for header in &self.headers {
            let name = HeaderName::from_bytes(header.name.as_bytes())?;
            let value = HeaderValue::from_str(&header.value)?;
            map.append(name, value);
        }
        Ok(map)
    }
}

impl From<&HeaderMap> for Headers {
    fn from(map: &HeaderMap) -> Self {
        map.iter()
            .map(|(name, value)| Header::new(name.as_str(), String::from_utf8_lossy(value.as_bytes())))
            .collect()
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<I: IntoIterator<Item = Header>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Headers {
    type Item = Header;
    type IntoIter = std::vec::IntoIter<Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.into_iter()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, header) in self.headers.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{header}")?;
        }
        Ok(())
    }
}

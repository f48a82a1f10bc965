//! JSON documents and the [`JsonPath`] query API

mod path;

pub use path::JsonPath;

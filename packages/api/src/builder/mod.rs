//! Request-side builder API
//!
//! `RequestSpecification` collects headers, cookies, parameters and a body,
//! then sends them with one of the HTTP method functions.

pub mod auth;
pub mod body;
pub mod core;
pub mod headers;
pub mod methods;
pub mod params;

pub use core::{MediaType, RequestSpecification};

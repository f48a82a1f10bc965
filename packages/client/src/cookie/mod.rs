//! HTTP cookies
//!
//! `Set-Cookie` parsing is delegated to the `cookie` crate; the attributes it
//! no longer models (`Comment`, `Version`) are read alongside it.

pub mod core;
pub mod utils;

pub use self::core::{Cookie, CookieParseError, Cookies, parse_set_cookie};
pub use self::utils::{format_cookie, parse_cookie, validate_cookie};

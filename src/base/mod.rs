//! Base types and error handling.
//!
//! - [`CookieError`](error::CookieError): the crate-wide error enum

pub mod error;

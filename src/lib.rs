//! # cookiewire
//!
//! An HTTP cookie model and wire-format codec for Rust clients.
//!
//! `cookiewire` represents a cookie's attributes as a plain value type,
//! serializes it into a `Set-Cookie` header value with a fixed attribute
//! order, percent-escapes values per the legacy Netscape/RFC 2109 character
//! classes, parses raw `Set-Cookie` and `Cookie` headers back into cookies,
//! and aggregates received cookies in a concurrent client-side jar.
//!
//! ## Features
//!
//! - **Cookie model**: Version 0 (Netscape) and Version 1 (RFC 2109)
//!   cookies with `Secure`, `HttpOnly`, `SameSite`, and `Priority`
//! - **Wire codec**: deterministic `Set-Cookie` serialization plus a
//!   byte-exact escape/unescape pair for values
//! - **Header parsing**: tolerant attribute handling, strict about the
//!   mandatory `name=value` pair
//! - **Cookie jar**: RFC 6265 domain/path matching, Secure-over-https,
//!   public-suffix rejection, per-domain eviction
//! - **Interop**: Netscape cookie files (curl/wget) and JSON persistence
//!
//! ## Quick Start
//!
//! ```rust
//! use cookiewire::{Cookie, CookieJar, SameSite};
//! use url::Url;
//!
//! let mut cookie = Cookie::new("session", "abc123");
//! cookie.set_path("/");
//! cookie.set_secure(true);
//! cookie.set_same_site(SameSite::Strict);
//! assert_eq!(
//!     cookie.to_string(),
//!     "session=abc123; Path=/; Secure; SameSite=Strict"
//! );
//!
//! let jar = CookieJar::new();
//! let url = Url::parse("https://example.com/login").unwrap();
//! jar.store_response_cookie(&url, "session=abc123; Path=/; Secure").unwrap();
//! assert_eq!(jar.request_header_value(&url).as_deref(), Some("session=abc123"));
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`cookies`] - Cookie model, codec, parsing, jar, and interop formats

pub mod base;
pub mod cookies;

pub use base::error::CookieError;
pub use cookies::{escape, unescape, Cookie, CookieJar, SameSite};

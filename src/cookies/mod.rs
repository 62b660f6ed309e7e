//! Cookie model, wire codec, and client-side storage.
//!
//! # Architecture
//!
//! | Piece | Module | Responsibility |
//! |-------|--------|----------------|
//! | [`Cookie`](cookie::Cookie) | [`cookie`] | Attribute set and `Set-Cookie` serialization |
//! | [`escape`](codec::escape) / [`unescape`](codec::unescape) | [`codec`] | Percent-escape codec for values |
//! | [`Cookie::parse`](cookie::Cookie::parse) | [`parse`] | `Set-Cookie` and `Cookie` header parsing |
//! | [`CookieJar`](jar::CookieJar) | [`jar`] | Storage with RFC 6265 matching and PSL validation |
//! | [`netscape`] | [`netscape`] | curl/wget-compatible cookie files |
//! | [`persistence`] | [`persistence`] | JSON save/load (feature `json`) |
//!
//! # Receiving and sending cookies
//!
//! ```rust
//! use cookiewire::CookieJar;
//! use url::Url;
//!
//! let jar = CookieJar::new();
//! let url = Url::parse("https://example.com/login").unwrap();
//!
//! // Response side: raw Set-Cookie header values go in.
//! jar.store_response_cookie(&url, "session=abc123; Path=/; HttpOnly").unwrap();
//!
//! // Request side: the Cookie header value comes out.
//! assert_eq!(jar.request_header_value(&url).as_deref(), Some("session=abc123"));
//! ```
//!
//! # Escaping values
//!
//! Setters store text verbatim; a value holding whitespace or reserved
//! characters is escaped explicitly:
//!
//! ```rust
//! use cookiewire::{escape, unescape, Cookie};
//!
//! let cookie = Cookie::new("note", escape("a b;c"));
//! assert_eq!(cookie.to_string(), "note=a%20b%3Bc");
//! assert_eq!(unescape(cookie.value()).unwrap(), "a b;c");
//! ```

pub mod codec;
pub mod cookie;
pub mod jar;
pub mod netscape;
pub mod parse;
#[cfg(feature = "json")]
pub mod persistence;

pub use codec::{escape, unescape};
pub use cookie::{Cookie, SameSite};
pub use jar::{CookieJar, StoredCookie};
pub use parse::parse_request_pairs;

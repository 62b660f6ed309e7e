use thiserror::Error;

/// Errors produced by cookie construction, header parsing, and the value
/// escape codec.
///
/// All failures are synchronous and local; nothing here is retryable.
/// Batch ingestion paths ([`CookieJar::store_response_headers`]) log and
/// skip rather than propagate, so one bad cookie never aborts the rest of
/// a response.
///
/// [`CookieJar::store_response_headers`]: crate::cookies::jar::CookieJar::store_response_headers
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CookieError {
    #[error("cookie version must be 0 or 1, got {0}")]
    InvalidVersion(i32),
    #[error("empty cookie header")]
    EmptyHeader,
    #[error("cookie header has no name=value pair")]
    MissingNameValue,
    #[error("cookie name is empty")]
    EmptyName,
    #[error("no name/value pair supplied")]
    EmptyPairs,
    #[error("malformed escape sequence at byte {0}")]
    MalformedEscape(usize),
    #[error("unescaped bytes are not valid UTF-8")]
    InvalidUtf8,
    #[error("cookie domain rejected for this URL")]
    DomainRejected,
}

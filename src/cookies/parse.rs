//! Reconstructing cookies from raw header text.
//!
//! Two directions are covered: a server-to-client `Set-Cookie` value turns
//! into a full [`Cookie`], and a client-to-server `Cookie` header splits
//! into ordered name/value pairs. Parsing is strict about the mandatory
//! `name=value` pair and tolerant about everything else: unknown attributes
//! and unparseable attribute values are dropped with a debug log instead of
//! failing the whole header.

use time::{OffsetDateTime, PrimitiveDateTime};

use crate::base::error::CookieError;
use crate::cookies::cookie::{Cookie, SameSite, HTTP_DATE};

impl Cookie {
    /// Parses a raw `Set-Cookie` header value.
    ///
    /// The first segment must be `name=value`. Every following
    /// `Attr[=Val]` segment is matched case-insensitively against the
    /// known attribute keywords (`Comment`, `Domain`, `Path`, `Priority`,
    /// `Secure`, `HttpOnly`, `Max-Age`, `Expires`, `SameSite`, `Version`);
    /// unknown attributes are ignored. An absolute `Expires` date is
    /// converted to a relative `Max-Age` against the current time, with
    /// `Max-Age` taking precedence when both are present.
    pub fn parse(header: &str) -> Result<Self, CookieError> {
        Self::parse_at(header, OffsetDateTime::now_utc())
    }

    /// Like [`Cookie::parse`] with an explicit clock for the
    /// `Expires` conversion.
    pub fn parse_at(header: &str, now: OffsetDateTime) -> Result<Self, CookieError> {
        let header = header.trim();
        if header.is_empty() {
            return Err(CookieError::EmptyHeader);
        }

        let mut segments = header.split(';');
        // split() always yields at least one segment
        let first = segments.next().unwrap_or_default().trim();
        let (name, value) = first
            .split_once('=')
            .ok_or(CookieError::MissingNameValue)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CookieError::EmptyName);
        }

        let mut cookie = Cookie::new(name, value.trim());
        let mut have_max_age = false;
        for segment in segments {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (key, val) = match segment.split_once('=') {
                Some((key, val)) => (key.trim(), Some(val.trim())),
                None => (segment, None),
            };
            cookie.apply_attribute(key, val, now, &mut have_max_age);
        }
        Ok(cookie)
    }

    /// Best-effort attribute assignment shared by the header parser and
    /// [`Cookie::from_pairs`]. `have_max_age` tracks whether an explicit
    /// `Max-Age` was seen, in which case a later `Expires` is ignored.
    pub(crate) fn apply_attribute(
        &mut self,
        key: &str,
        value: Option<&str>,
        now: OffsetDateTime,
        have_max_age: &mut bool,
    ) {
        let value = value.unwrap_or("");
        if key.eq_ignore_ascii_case("comment") {
            self.set_comment(value);
        } else if key.eq_ignore_ascii_case("domain") {
            self.set_domain(value);
        } else if key.eq_ignore_ascii_case("path") {
            self.set_path(value);
        } else if key.eq_ignore_ascii_case("priority") {
            self.set_priority(value);
        } else if key.eq_ignore_ascii_case("secure") {
            self.set_secure(true);
        } else if key.eq_ignore_ascii_case("httponly") {
            self.set_http_only(true);
        } else if key.eq_ignore_ascii_case("max-age") {
            match value.parse::<i64>() {
                Ok(seconds) => {
                    self.set_max_age(seconds);
                    *have_max_age = true;
                }
                Err(_) => tracing::debug!(value = %value, "dropping unparseable Max-Age"),
            }
        } else if key.eq_ignore_ascii_case("expires") {
            if *have_max_age {
                return;
            }
            match parse_http_date(value) {
                Some(expiry) => self.set_max_age((expiry - now).whole_seconds().max(0)),
                None => tracing::debug!(value = %value, "dropping unparseable Expires"),
            }
        } else if key.eq_ignore_ascii_case("samesite") {
            match SameSite::from_attribute(value) {
                Some(policy) => self.set_same_site(policy),
                None => tracing::debug!(value = %value, "dropping unknown SameSite policy"),
            }
        } else if key.eq_ignore_ascii_case("version") {
            let parsed = value.trim_matches('"').parse::<i32>();
            if parsed.map_or(true, |v| self.set_version(v).is_err()) {
                tracing::debug!(value = %value, "dropping invalid Version");
            }
        } else {
            tracing::debug!(key = %key, "ignoring unknown cookie attribute");
        }
    }
}

/// Parses an IMF-fixdate timestamp (`Sun, 06 Nov 1994 08:49:37 GMT`).
fn parse_http_date(s: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(s, HTTP_DATE)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// Splits a request `Cookie:` header into ordered name/value pairs.
///
/// Pairs keep their wire order, so the first one can seed
/// [`Cookie::from_pairs`]. Segments without `=` are skipped with a debug
/// log; a header that yields no pair at all is an error.
pub fn parse_request_pairs(header: &str) -> Result<Vec<(String, String)>, CookieError> {
    let header = header.trim();
    if header.is_empty() {
        return Err(CookieError::EmptyHeader);
    }
    let mut pairs = Vec::new();
    for segment in header.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let Some((name, value)) = segment.split_once('=') else {
            tracing::debug!(segment = %segment, "skipping Cookie segment without '='");
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        pairs.push((name.to_string(), value.trim().to_string()));
    }
    if pairs.is_empty() {
        return Err(CookieError::MissingNameValue);
    }
    Ok(pairs)
}

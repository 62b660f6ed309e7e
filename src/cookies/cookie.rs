use std::fmt;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

use crate::base::error::CookieError;

/// HTTP date layout used by the legacy `Expires` attribute
/// (IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`).
pub(crate) const HTTP_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Cross-site transmission policy carried by the `SameSite` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SameSite {
    /// No attribute is emitted; the client applies its own default.
    #[default]
    NotSpecified,
    None,
    Lax,
    Strict,
}

impl SameSite {
    /// Header text for the attribute value. `NotSpecified` has none.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            SameSite::NotSpecified => None,
            SameSite::None => Some("None"),
            SameSite::Lax => Some("Lax"),
            SameSite::Strict => Some("Strict"),
        }
    }

    /// Case-insensitive parse of an attribute value.
    pub fn from_attribute(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("none") {
            Some(SameSite::None)
        } else if value.eq_ignore_ascii_case("lax") {
            Some(SameSite::Lax)
        } else if value.eq_ignore_ascii_case("strict") {
            Some(SameSite::Strict)
        } else {
            None
        }
    }
}

/// A single HTTP cookie.
///
/// A cookie has a name, a single value, and optional attributes: a comment,
/// domain and path qualifiers, a maximum age, a priority, the `Secure` and
/// `HttpOnly` flags, a `SameSite` policy, and a version number.
///
/// Both Version 0 (Netscape) and Version 1 (RFC 2109) cookie formats are
/// supported. Cookies are created as Version 0 for interoperability.
///
/// The cookie is a pure value type: it owns no external resources, all
/// accessors are side-effect free, and cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    version: i32,
    name: String,
    value: String,
    comment: String,
    domain: String,
    path: String,
    priority: String,
    secure: bool,
    max_age: i64,
    http_only: bool,
    same_site: SameSite,
}

impl Default for Cookie {
    fn default() -> Self {
        Self {
            version: 0,
            name: String::new(),
            value: String::new(),
            comment: String::new(),
            domain: String::new(),
            path: String::new(),
            priority: String::new(),
            secure: false,
            max_age: -1,
            http_only: false,
            same_site: SameSite::NotSpecified,
        }
    }
}

impl Cookie {
    /// Creates a session cookie with the given name and an empty value.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a session cookie with the given name and value.
    ///
    /// If the value contains whitespace or reserved characters it must be
    /// run through [`escape`](crate::cookies::codec::escape) before being
    /// passed in; setters store text verbatim.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Builds a cookie from an ordered sequence of name/value pairs.
    ///
    /// The first pair becomes the cookie's name and value. Every remaining
    /// pair is a best-effort attribute assignment: keys matching a known
    /// attribute keyword (case-insensitive) are applied, anything else is
    /// ignored. An empty sequence is an error rather than an unnamed
    /// cookie.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, CookieError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut pairs = pairs.into_iter();
        let (name, value) = pairs.next().ok_or(CookieError::EmptyPairs)?;
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(CookieError::EmptyName);
        }
        let mut cookie = Cookie::new(name, value.as_ref());
        let now = OffsetDateTime::now_utc();
        let mut have_max_age = false;
        for (key, val) in pairs {
            cookie.apply_attribute(key.as_ref(), Some(val.as_ref()), now, &mut have_max_age);
        }
        Ok(cookie)
    }

    /// Sets the version. Must be 0 (a Netscape cookie) or 1 (RFC 2109).
    pub fn set_version(&mut self, version: i32) -> Result<(), CookieError> {
        if version != 0 && version != 1 {
            return Err(CookieError::InvalidVersion(version));
        }
        self.version = version;
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Stores the value verbatim.
    ///
    /// Per the cookie specification the value should not exceed 4 KiB.
    /// Values holding whitespace or reserved characters should be escaped
    /// with [`escape`](crate::cookies::codec::escape) first.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Comments are only supported for version 1 cookies; a version 0
    /// cookie never serializes its comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = domain.into();
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn set_priority(&mut self, priority: impl Into<String>) {
        self.priority = priority.into();
    }

    pub fn set_secure(&mut self, secure: bool) {
        self.secure = secure;
    }

    /// Sets the maximum age in seconds.
    ///
    /// -1 (the default) makes this a session cookie, deleted when the
    /// client session ends. 0 asks the client to delete the cookie
    /// immediately. Any positive count is the remaining lifetime.
    pub fn set_max_age(&mut self, max_age: i64) {
        self.max_age = max_age;
    }

    pub fn set_http_only(&mut self, flag: bool) {
        self.http_only = flag;
    }

    pub fn set_same_site(&mut self, same_site: SameSite) {
        self.same_site = same_site;
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn priority(&self) -> &str {
        &self.priority
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    pub fn max_age(&self) -> i64 {
        self.max_age
    }

    pub fn http_only(&self) -> bool {
        self.http_only
    }

    pub fn same_site(&self) -> SameSite {
        self.same_site
    }

    /// Serializes like [`Display`](fmt::Display), adding a legacy
    /// `Expires` date directly after `Max-Age` for clients that predate
    /// RFC 2109. The expiry is `now + max_age`; the clock is an explicit
    /// argument so output stays reproducible. Session cookies
    /// (`max_age == -1`) emit neither clause.
    pub fn to_string_with_expires(&self, now: OffsetDateTime) -> String {
        let expires = (self.max_age >= 0).then(|| now + Duration::seconds(self.max_age));
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_header(&mut out, expires);
        out
    }

    /// Appends the `Set-Cookie` header value to `out`. Attribute order is
    /// fixed so equal cookies always serialize to byte-identical text:
    /// name=value, Comment (version 1 only), Domain, Path, Max-Age
    /// (with the optional Expires directly after), Secure, HttpOnly,
    /// Priority, SameSite.
    fn write_header<W: fmt::Write>(
        &self,
        out: &mut W,
        expires: Option<OffsetDateTime>,
    ) -> fmt::Result {
        write!(out, "{}={}", self.name, self.value)?;
        if self.version >= 1 && !self.comment.is_empty() {
            write!(out, "; Comment={}", self.comment)?;
        }
        if !self.domain.is_empty() {
            write!(out, "; Domain={}", self.domain)?;
        }
        if !self.path.is_empty() {
            write!(out, "; Path={}", self.path)?;
        }
        if self.max_age >= 0 {
            write!(out, "; Max-Age={}", self.max_age)?;
            if let Some(stamp) = expires.and_then(|t| t.format(HTTP_DATE).ok()) {
                write!(out, "; Expires={stamp}")?;
            }
        }
        if self.secure {
            out.write_str("; Secure")?;
        }
        if self.http_only {
            out.write_str("; HttpOnly")?;
        }
        if !self.priority.is_empty() {
            write!(out, "; Priority={}", self.priority)?;
        }
        if let Some(policy) = self.same_site.as_str() {
            write!(out, "; SameSite={policy}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Cookie {
    /// Formats the cookie as a `Set-Cookie` header value.
    ///
    /// The value is emitted as stored; escaping is the caller's job (see
    /// [`Cookie::set_value`]). `Expires` is never part of this output so
    /// equal cookies compare equal as strings regardless of wall clock;
    /// use [`Cookie::to_string_with_expires`] when the legacy clause is
    /// wanted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_default_cookie() {
        let cookie = Cookie::default();
        assert_eq!(cookie.version(), 0);
        assert_eq!(cookie.max_age(), -1);
        assert!(!cookie.secure());
        assert!(!cookie.http_only());
        assert_eq!(cookie.same_site(), SameSite::NotSpecified);
        assert!(cookie.name().is_empty());
        assert!(cookie.value().is_empty());
    }

    #[test]
    fn test_plain_serialization() {
        let cookie = Cookie::new("session", "abc123");
        assert_eq!(cookie.to_string(), "session=abc123");
    }

    #[test]
    fn test_attribute_order_is_fixed() {
        let mut cookie = Cookie::new("id", "7");
        cookie.set_same_site(SameSite::Strict);
        cookie.set_http_only(true);
        cookie.set_secure(true);
        assert_eq!(cookie.to_string(), "id=7; Secure; HttpOnly; SameSite=Strict");
    }

    #[test]
    fn test_full_attribute_set() {
        let mut cookie = Cookie::new("id", "7");
        cookie.set_domain("example.com");
        cookie.set_path("/app");
        cookie.set_max_age(3600);
        cookie.set_secure(true);
        cookie.set_http_only(true);
        cookie.set_priority("High");
        cookie.set_same_site(SameSite::Lax);
        assert_eq!(
            cookie.to_string(),
            "id=7; Domain=example.com; Path=/app; Max-Age=3600; Secure; HttpOnly; Priority=High; SameSite=Lax"
        );
    }

    #[test]
    fn test_version_gates_comment() {
        let mut cookie = Cookie::new("id", "7");
        cookie.set_comment("session marker");
        assert_eq!(cookie.to_string(), "id=7");

        cookie.set_version(1).unwrap();
        assert_eq!(cookie.to_string(), "id=7; Comment=session marker");
    }

    #[test]
    fn test_invalid_version_rejected() {
        let mut cookie = Cookie::named("id");
        assert_eq!(cookie.set_version(2), Err(CookieError::InvalidVersion(2)));
        assert_eq!(cookie.set_version(-1), Err(CookieError::InvalidVersion(-1)));
        assert_eq!(cookie.version(), 0);
        cookie.set_version(1).unwrap();
        assert_eq!(cookie.version(), 1);
    }

    #[test]
    fn test_expires_is_derived_from_max_age() {
        let mut cookie = Cookie::new("id", "7");
        cookie.set_max_age(60);
        let now = datetime!(1994-11-06 08:48:37 UTC);
        assert_eq!(
            cookie.to_string_with_expires(now),
            "id=7; Max-Age=60; Expires=Sun, 06 Nov 1994 08:49:37 GMT"
        );
    }

    #[test]
    fn test_session_cookie_has_no_expires() {
        let cookie = Cookie::new("id", "7");
        let now = datetime!(1994-11-06 08:48:37 UTC);
        assert_eq!(cookie.to_string_with_expires(now), "id=7");
    }

    #[test]
    fn test_max_age_zero_still_serializes() {
        let mut cookie = Cookie::new("id", "7");
        cookie.set_max_age(0);
        assert_eq!(cookie.to_string(), "id=7; Max-Age=0");
    }

    #[test]
    fn test_from_pairs() {
        let cookie = Cookie::from_pairs([
            ("session", "abc123"),
            ("Path", "/"),
            ("secure", "true"),
            ("x-vendor-hint", "ignored"),
        ])
        .unwrap();
        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.path(), "/");
        assert!(cookie.secure());
    }

    #[test]
    fn test_from_pairs_empty_input() {
        let pairs: [(&str, &str); 0] = [];
        assert_eq!(Cookie::from_pairs(pairs), Err(CookieError::EmptyPairs));
    }
}

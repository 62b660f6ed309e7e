//! Client-side cookie storage.
//!
//! [`CookieJar`] aggregates cookies received across responses and answers
//! the question "which cookies accompany a request to this URL". Matching
//! follows RFC 6265: domain suffix matching with a dot boundary, path
//! prefix matching with a `/` boundary, Secure cookies only over https,
//! and expired cookies filtered out. Cookies set on a public suffix
//! (`.com`, `.co.uk`) are rejected outright to block supercookies.
//!
//! Mutation is internally synchronized through a sharded map, so one jar
//! can be shared by concurrent response handlers. The [`Cookie`] value
//! type itself stays free of shared state.

use dashmap::DashMap;
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};
use psl::{List, Psl};
use time::{Duration, OffsetDateTime};
use url::Url;

use crate::base::error::CookieError;
use crate::cookies::cookie::Cookie;

/// Cookies kept per domain before the oldest is evicted.
const MAX_COOKIES_PER_DOMAIN: usize = 50;

/// A cookie as held by the jar: the value object plus the bookkeeping the
/// jar needs to answer match and expiry questions. The absolute expiry is
/// resolved from the cookie's relative `Max-Age` at insertion time.
#[derive(Debug, Clone)]
pub struct StoredCookie {
    pub cookie: Cookie,
    pub host_only: bool,
    pub created: OffsetDateTime,
    pub expires_at: Option<OffsetDateTime>,
}

impl StoredCookie {
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}

/// The client-side cookie jar.
#[derive(Debug, Default)]
pub struct CookieJar {
    // Map<domain, cookies for that domain>
    store: DashMap<String, Vec<StoredCookie>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Parses one `Set-Cookie` value received from `url` and stores it.
    ///
    /// A `Domain` attribute is lowercased, stripped of its leading dot,
    /// and rejected when it names a public suffix or does not cover the
    /// request host. Without a `Domain` attribute the cookie is host-only.
    /// `Max-Age=0` deletes the matching stored cookie instead of storing.
    pub fn store_response_cookie(&self, url: &Url, header: &str) -> Result<(), CookieError> {
        self.store_response_cookie_at(url, header, OffsetDateTime::now_utc())
    }

    /// Like [`CookieJar::store_response_cookie`] with an explicit clock.
    pub fn store_response_cookie_at(
        &self,
        url: &Url,
        header: &str,
        now: OffsetDateTime,
    ) -> Result<(), CookieError> {
        let mut cookie = Cookie::parse_at(header, now)?;
        let host = url.host_str().unwrap_or("").to_ascii_lowercase();

        let host_only = cookie.domain().is_empty();
        let domain = if host_only {
            host
        } else {
            let domain = cookie
                .domain()
                .trim_start_matches('.')
                .to_ascii_lowercase();
            if !domain_allowed(&domain, &host) {
                tracing::warn!(domain = %domain, host = %host, "rejecting cookie domain");
                return Err(CookieError::DomainRejected);
            }
            domain
        };
        cookie.set_domain(domain);
        if cookie.path().is_empty() {
            cookie.set_path("/");
        }

        if cookie.max_age() == 0 {
            // Delete-on-client: drop the stored counterpart.
            if let Some(mut entry) = self.store.get_mut(cookie.domain()) {
                entry.retain(|stored| {
                    stored.cookie.name() != cookie.name() || stored.cookie.path() != cookie.path()
                });
            }
            return Ok(());
        }

        let expires_at = (cookie.max_age() > 0).then(|| now + Duration::seconds(cookie.max_age()));
        self.insert_stored(StoredCookie {
            cookie,
            host_only,
            created: now,
            expires_at,
        });
        Ok(())
    }

    /// Stores every `Set-Cookie` value found in a response header map.
    ///
    /// One malformed or rejected cookie is logged and skipped; it never
    /// aborts processing of the remaining headers. Returns how many
    /// cookies were stored.
    pub fn store_response_headers(&self, url: &Url, headers: &HeaderMap) -> usize {
        let mut stored = 0;
        for value in headers.get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else {
                tracing::warn!("skipping non-UTF-8 Set-Cookie header");
                continue;
            };
            match self.store_response_cookie(url, raw) {
                Ok(()) => stored += 1,
                Err(err) => {
                    tracing::warn!(error = %err, header = %raw, "skipping Set-Cookie header");
                }
            }
        }
        stored
    }

    /// Inserts a stored cookie under its domain key, replacing any cookie
    /// with the same name and path and evicting the oldest entry once the
    /// per-domain cap is reached.
    pub(crate) fn insert_stored(&self, stored: StoredCookie) {
        let mut entry = self
            .store
            .entry(stored.cookie.domain().to_string())
            .or_default();
        entry.retain(|existing| {
            existing.cookie.name() != stored.cookie.name()
                || existing.cookie.path() != stored.cookie.path()
        });
        while entry.len() >= MAX_COOKIES_PER_DOMAIN {
            let Some(oldest) = entry
                .iter()
                .enumerate()
                .min_by_key(|(_, candidate)| candidate.created)
                .map(|(idx, _)| idx)
            else {
                break;
            };
            entry.remove(oldest);
        }
        entry.push(stored);
    }

    /// Cookies matching the URL, sorted by path length (longest first)
    /// then creation time.
    pub fn cookies_for_url(&self, url: &Url) -> Vec<Cookie> {
        self.cookies_for_url_at(url, OffsetDateTime::now_utc())
    }

    /// Like [`CookieJar::cookies_for_url`] with an explicit clock for the
    /// expiry check.
    pub fn cookies_for_url_at(&self, url: &Url, now: OffsetDateTime) -> Vec<Cookie> {
        let host = url.host_str().unwrap_or("").to_ascii_lowercase();
        let https = url.scheme() == "https";

        let mut matched: Vec<StoredCookie> = Vec::new();
        for domain in candidate_domains(&host) {
            let Some(entry) = self.store.get(&domain) else {
                continue;
            };
            for stored in entry.iter() {
                if stored.is_expired(now) {
                    continue;
                }
                if !domain_matches(stored.cookie.domain(), &host, stored.host_only) {
                    continue;
                }
                if !path_matches(stored.cookie.path(), url.path()) {
                    continue;
                }
                if stored.cookie.secure() && !https {
                    continue;
                }
                matched.push(stored.clone());
            }
        }

        matched.sort_by(|a, b| {
            b.cookie
                .path()
                .len()
                .cmp(&a.cookie.path().len())
                .then_with(|| a.created.cmp(&b.created))
        });
        matched.into_iter().map(|stored| stored.cookie).collect()
    }

    /// Builds the value of a request `Cookie:` header for `url`, or
    /// `None` when nothing matches.
    pub fn request_header_value(&self, url: &Url) -> Option<String> {
        let cookies = self.cookies_for_url(url);
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|cookie| format!("{}={}", cookie.name(), cookie.value()))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Sets the `Cookie:` header on an outgoing request's header map.
    pub fn apply_to_request(&self, url: &Url, headers: &mut HeaderMap) {
        let Some(value) = self.request_header_value(url) else {
            return;
        };
        match HeaderValue::from_str(&value) {
            Ok(value) => {
                headers.insert(COOKIE, value);
            }
            Err(_) => tracing::warn!("cookie header value contains invalid bytes"),
        }
    }

    /// Total number of stored cookies.
    pub fn len(&self) -> usize {
        self.store.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all cookies.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Iterates over every stored cookie (used by export and persistence).
    pub fn iter_all(&self) -> impl Iterator<Item = StoredCookie> + '_ {
        self.store.iter().flat_map(|entry| entry.value().clone())
    }
}

/// A cookie may only be set on a domain that covers the request host and
/// is not itself a public suffix (no `.com`-wide supercookies). Both
/// arguments must already be lowercase.
fn domain_allowed(domain: &str, host: &str) -> bool {
    if is_public_suffix(domain) {
        return false;
    }
    if host == domain {
        return true;
    }
    host.len() > domain.len()
        && host.ends_with(domain)
        && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
}

fn is_public_suffix(domain: &str) -> bool {
    List.suffix(domain.as_bytes())
        .is_some_and(|suffix| suffix.as_bytes() == domain.as_bytes())
}

/// RFC 6265 domain matching: host-only cookies need an exact host match,
/// domain cookies match the domain itself and any dot-separated subdomain.
fn domain_matches(cookie_domain: &str, host: &str, host_only: bool) -> bool {
    if host_only {
        return cookie_domain == host;
    }
    if host == cookie_domain {
        return true;
    }
    host.len() > cookie_domain.len()
        && host.ends_with(cookie_domain)
        && host.as_bytes()[host.len() - cookie_domain.len() - 1] == b'.'
}

/// RFC 6265 path matching: exact match, directory prefix, or prefix up to
/// a `/` boundary.
fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }
    request_path.starts_with(cookie_path)
        && (cookie_path.ends_with('/')
            || request_path.as_bytes().get(cookie_path.len()) == Some(&b'/'))
}

/// The host itself and every parent domain that could hold a matching
/// domain cookie. Bare TLDs are skipped; they can never be a valid cookie
/// domain.
fn candidate_domains(host: &str) -> Vec<String> {
    let mut domains = vec![host.to_string()];
    let mut rest = host;
    while let Some(dot) = rest.find('.') {
        rest = &rest[dot + 1..];
        if rest.contains('.') {
            domains.push(rest.to_string());
        }
    }
    domains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_matches_host_only() {
        assert!(domain_matches("example.com", "example.com", true));
        assert!(!domain_matches("example.com", "sub.example.com", true));
    }

    #[test]
    fn test_domain_matches_subdomains() {
        assert!(domain_matches("example.com", "example.com", false));
        assert!(domain_matches("example.com", "sub.example.com", false));
        assert!(domain_matches("example.com", "deep.sub.example.com", false));
        // The boundary must be a dot, not an arbitrary character.
        assert!(!domain_matches("example.com", "notexample.com", false));
        assert!(!domain_matches("other.com", "example.com", false));
    }

    #[test]
    fn test_path_matches() {
        assert!(path_matches("/", "/"));
        assert!(path_matches("/", "/foo"));
        assert!(path_matches("/foo", "/foo"));
        assert!(path_matches("/foo", "/foo/bar"));
        assert!(path_matches("/foo/", "/foo/bar"));
        assert!(!path_matches("/foo", "/foobar"));
        assert!(!path_matches("/baz", "/foo/bar"));
    }

    #[test]
    fn test_candidate_domains() {
        assert_eq!(
            candidate_domains("deep.sub.example.com"),
            vec!["deep.sub.example.com", "sub.example.com", "example.com"]
        );
        assert_eq!(candidate_domains("example.com"), vec!["example.com"]);
        assert_eq!(candidate_domains("localhost"), vec!["localhost"]);
    }

    #[test]
    fn test_public_suffix_rejected() {
        assert!(!domain_allowed("com", "example.com"));
        assert!(!domain_allowed("co.uk", "example.co.uk"));
        assert!(domain_allowed("example.com", "example.com"));
        assert!(domain_allowed("example.com", "sub.example.com"));
        assert!(!domain_allowed("other.com", "example.com"));
    }
}

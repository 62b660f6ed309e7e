//! Netscape cookie file import and export.
//!
//! The tab-separated format understood by curl and wget:
//!
//! ```text
//! domain <TAB> include_subdomains <TAB> path <TAB> secure <TAB> expiry <TAB> name <TAB> value
//! ```
//!
//! Expiry is a unix timestamp, 0 for session cookies. `HttpOnly` and
//! `SameSite` have no column in this format and are lost on export.

use time::OffsetDateTime;

use crate::cookies::cookie::Cookie;
use crate::cookies::jar::{CookieJar, StoredCookie};

const PREAMBLE: &str = "# Netscape HTTP Cookie File\n# https://curl.se/docs/http-cookies.html\n\n";

impl CookieJar {
    /// Renders the jar in Netscape cookie file format.
    ///
    /// A `filter` substring restricts the export to matching domains.
    pub fn export_netscape(&self, filter: Option<&str>) -> String {
        let mut out = String::from(PREAMBLE);
        for stored in self.iter_all() {
            let domain = stored.cookie.domain();
            if filter.is_some_and(|needle| !domain.contains(needle)) {
                continue;
            }
            // Domain cookies carry a leading dot in this format.
            let dotted = if stored.host_only || domain.starts_with('.') {
                domain.to_string()
            } else {
                format!(".{domain}")
            };
            let expiry = stored
                .expires_at
                .map(|expiry| expiry.unix_timestamp())
                .unwrap_or(0);
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
                dotted,
                if stored.host_only { "FALSE" } else { "TRUE" },
                stored.cookie.path(),
                if stored.cookie.secure() { "TRUE" } else { "FALSE" },
                expiry,
                stored.cookie.name(),
                stored.cookie.value(),
            ));
        }
        out
    }

    /// Loads cookies from Netscape cookie file content.
    ///
    /// Comments, blank lines, and rows with the wrong column count are
    /// skipped. Returns how many cookies were imported.
    pub fn import_netscape(&self, content: &str) -> usize {
        self.import_netscape_at(content, OffsetDateTime::now_utc())
    }

    /// Like [`CookieJar::import_netscape`] with an explicit clock.
    pub fn import_netscape_at(&self, content: &str, now: OffsetDateTime) -> usize {
        let mut imported = 0;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            let [domain, subdomains, path, secure, expiry, name, value] = fields[..] else {
                tracing::debug!(line = %line, "skipping malformed Netscape row");
                continue;
            };
            if name.is_empty() {
                continue;
            }

            let mut cookie = Cookie::new(name, value);
            cookie.set_domain(domain.trim_start_matches('.').to_ascii_lowercase());
            cookie.set_path(if path.is_empty() { "/" } else { path });
            cookie.set_secure(secure.eq_ignore_ascii_case("TRUE"));

            let expires_at = expiry
                .parse::<i64>()
                .ok()
                .filter(|stamp| *stamp > 0)
                .and_then(|stamp| OffsetDateTime::from_unix_timestamp(stamp).ok());
            if let Some(expiry) = expires_at {
                cookie.set_max_age((expiry - now).whole_seconds().max(0));
            }

            self.insert_stored(StoredCookie {
                cookie,
                host_only: subdomains.eq_ignore_ascii_case("FALSE"),
                created: now,
                expires_at,
            });
            imported += 1;
        }
        imported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_export_contains_preamble_and_cookie() {
        let jar = CookieJar::new();
        let url = Url::parse("https://example.com/").unwrap();
        jar.store_response_cookie(&url, "session=abc123; Path=/; Secure")
            .unwrap();

        let exported = jar.export_netscape(None);
        assert!(exported.starts_with("# Netscape HTTP Cookie File"));
        assert!(exported.contains("example.com\tFALSE\t/\tTRUE\t0\tsession\tabc123"));
    }

    #[test]
    fn test_export_filter() {
        let jar = CookieJar::new();
        jar.store_response_cookie(&Url::parse("https://example.com/").unwrap(), "a=1")
            .unwrap();
        jar.store_response_cookie(&Url::parse("https://other.org/").unwrap(), "b=2")
            .unwrap();

        let exported = jar.export_netscape(Some("example"));
        assert!(exported.contains("example.com"));
        assert!(!exported.contains("other.org"));
    }

    #[test]
    fn test_import_skips_comments_and_short_rows() {
        let content = "# comment\n\nbroken\trow\n.example.com\tTRUE\t/\tTRUE\t0\tsession\tabc123\n";
        let jar = CookieJar::new();
        assert_eq!(jar.import_netscape(content), 1);
        assert_eq!(jar.len(), 1);
    }

    #[test]
    fn test_export_import_round_trip() {
        let jar = CookieJar::new();
        let url = Url::parse("https://example.com/").unwrap();
        jar.store_response_cookie(&url, "session=abc123; Domain=example.com; Path=/; Secure")
            .unwrap();
        jar.store_response_cookie(&url, "theme=dark; Path=/settings")
            .unwrap();

        let exported = jar.export_netscape(None);
        let restored = CookieJar::new();
        assert_eq!(restored.import_netscape(&exported), 2);

        let cookies = restored.cookies_for_url(&url);
        assert!(cookies.iter().any(|c| c.name() == "session"));
        let settings = Url::parse("https://example.com/settings").unwrap();
        assert!(restored
            .cookies_for_url(&settings)
            .iter()
            .any(|c| c.name() == "theme"));
    }
}

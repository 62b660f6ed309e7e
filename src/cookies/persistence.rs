//! Cookie persistence - save and load a jar to/from disk as JSON.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::cookies::cookie::{Cookie, SameSite};
use crate::cookies::jar::{CookieJar, StoredCookie};

/// On-disk representation of one stored cookie.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct CookieRecord {
    name: String,
    value: String,
    domain: String,
    path: String,
    secure: bool,
    http_only: bool,
    host_only: bool,
    same_site: Option<String>,
    priority: Option<String>,
    expires_unix_secs: Option<i64>,
}

/// Save every cookie in the jar to `path` as pretty-printed JSON.
pub fn save_jar(jar: &CookieJar, path: &Path) -> io::Result<()> {
    let records: Vec<CookieRecord> = jar
        .iter_all()
        .map(|stored| CookieRecord {
            name: stored.cookie.name().to_string(),
            value: stored.cookie.value().to_string(),
            domain: stored.cookie.domain().to_string(),
            path: stored.cookie.path().to_string(),
            secure: stored.cookie.secure(),
            http_only: stored.cookie.http_only(),
            host_only: stored.host_only,
            same_site: stored.cookie.same_site().as_str().map(str::to_string),
            priority: (!stored.cookie.priority().is_empty())
                .then(|| stored.cookie.priority().to_string()),
            expires_unix_secs: stored.expires_at.map(|expiry| expiry.unix_timestamp()),
        })
        .collect();

    let json = serde_json::to_string_pretty(&records)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    fs::write(path, json)
}

/// Load cookies from `path` into a new jar. Entries that expired since
/// they were saved are skipped.
pub fn load_jar(path: &Path) -> io::Result<CookieJar> {
    let json = fs::read_to_string(path)?;
    let records: Vec<CookieRecord> =
        serde_json::from_str(&json).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

    let jar = CookieJar::new();
    let now = OffsetDateTime::now_utc();
    for record in records {
        let expires_at = record
            .expires_unix_secs
            .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok());
        if expires_at.is_some_and(|expiry| expiry <= now) {
            continue;
        }

        let mut cookie = Cookie::new(record.name, record.value);
        cookie.set_domain(record.domain);
        cookie.set_path(record.path);
        cookie.set_secure(record.secure);
        cookie.set_http_only(record.http_only);
        if let Some(policy) = record.same_site.as_deref().and_then(SameSite::from_attribute) {
            cookie.set_same_site(policy);
        }
        if let Some(priority) = record.priority {
            cookie.set_priority(priority);
        }
        if let Some(expiry) = expires_at {
            cookie.set_max_age((expiry - now).whole_seconds().max(0));
        }

        jar.insert_stored(StoredCookie {
            cookie,
            host_only: record.host_only,
            created: now,
            expires_at,
        });
    }
    Ok(jar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use url::Url;

    #[test]
    fn test_save_load_round_trip() {
        let jar = CookieJar::new();
        let url = Url::parse("https://example.com/").unwrap();
        jar.store_response_cookie(&url, "session=abc123; Path=/; Secure; HttpOnly; SameSite=Lax")
            .unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        save_jar(&jar, &path).unwrap();

        let loaded = load_jar(&path).unwrap();
        assert_eq!(loaded.len(), 1);

        let cookies = loaded.cookies_for_url(&url);
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].name(), "session");
        assert_eq!(cookies[0].value(), "abc123");
        assert!(cookies[0].secure());
        assert!(cookies[0].http_only());
        assert_eq!(cookies[0].same_site(), SameSite::Lax);
    }

    #[test]
    fn test_load_skips_expired_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        fs::write(
            &path,
            r#"[{
                "name": "stale", "value": "x", "domain": "example.com",
                "path": "/", "secure": false, "http_only": false,
                "host_only": true, "same_site": null, "priority": null,
                "expires_unix_secs": 1000000000
            }]"#,
        )
        .unwrap();

        let loaded = load_jar(&path).unwrap();
        assert!(loaded.is_empty());
    }
}

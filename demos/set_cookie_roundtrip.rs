//! Cookie codec example.
//!
//! Builds a cookie, serializes it as a Set-Cookie header value, and parses
//! it back.

use cookiewire::{escape, unescape, Cookie, SameSite};

fn main() {
    let mut cookie = Cookie::new("prefs", escape("theme=dark; lang=en"));
    cookie.set_domain("example.com");
    cookie.set_path("/");
    cookie.set_max_age(86400);
    cookie.set_secure(true);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);

    let header = cookie.to_string();
    println!("Set-Cookie: {header}");

    let parsed = Cookie::parse(&header).expect("round trip");
    println!("name:  {}", parsed.name());
    println!(
        "value: {}",
        unescape(parsed.value()).expect("value was escaped above")
    );
    println!("domain: {}, path: {}", parsed.domain(), parsed.path());
    println!("max-age: {} seconds", parsed.max_age());
}

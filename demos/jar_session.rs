//! Cookie jar example.
//!
//! Simulates a login response followed by an authenticated request.

use cookiewire::CookieJar;
use url::Url;

fn main() {
    let jar = CookieJar::new();
    let login = Url::parse("https://example.com/login").unwrap();

    // Headers as received from the server
    jar.store_response_cookie(&login, "session_id=abc123; Path=/; Secure; HttpOnly")
        .unwrap();
    jar.store_response_cookie(&login, "user_pref=dark_mode; Path=/; Max-Age=86400")
        .unwrap();

    // A cookie set on a public suffix is rejected (supercookie attack)
    let psl_url = Url::parse("https://example.co.uk/").unwrap();
    let rejected = jar.store_response_cookie(&psl_url, "evil=supercookie; Domain=.co.uk");
    println!("supercookie rejected: {}", rejected.is_err());

    // The Cookie header for a follow-up request
    let api = Url::parse("https://example.com/api/me").unwrap();
    match jar.request_header_value(&api) {
        Some(value) => println!("Cookie: {value}"),
        None => println!("no cookies for {api}"),
    }

    println!("\nNetscape export:\n{}", jar.export_netscape(None));
}

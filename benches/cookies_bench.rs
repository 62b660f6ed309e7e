use cookiewire::{escape, unescape, Cookie, CookieJar, SameSite};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use url::Url;

fn benchmark_escape(c: &mut Criterion) {
    let value = "a value with spaces; separators, and (reserved) [characters]";

    c.bench_function("cookie_escape", |b| {
        b.iter(|| escape(black_box(value)))
    });

    let escaped = escape(value);
    c.bench_function("cookie_unescape", |b| {
        b.iter(|| unescape(black_box(&escaped)))
    });
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut cookie = Cookie::new("session", "abc123");
    cookie.set_domain("example.com");
    cookie.set_path("/app");
    cookie.set_max_age(3600);
    cookie.set_secure(true);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);

    c.bench_function("cookie_to_string", |b| {
        b.iter(|| black_box(&cookie).to_string())
    });
}

fn benchmark_parse(c: &mut Criterion) {
    let header = "session=abc123; Domain=example.com; Path=/app; Max-Age=3600; Secure; HttpOnly; SameSite=Lax";

    c.bench_function("cookie_parse", |b| {
        b.iter(|| Cookie::parse(black_box(header)))
    });
}

fn benchmark_jar(c: &mut Criterion) {
    let jar = CookieJar::new();
    let url = Url::parse("https://example.com/foo/bar").unwrap();

    c.bench_function("jar_store_response_cookie", |b| {
        b.iter(|| {
            jar.store_response_cookie(black_box(&url), black_box("foo=bar; Path=/; Secure"))
        })
    });

    // Pre-populate
    for i in 0..100 {
        let _ = jar.store_response_cookie(&url, &format!("cookie{}=val; Path=/foo", i));
    }

    c.bench_function("jar_cookies_for_url", |b| {
        b.iter(|| black_box(jar.cookies_for_url(black_box(&url))))
    });
}

criterion_group!(
    benches,
    benchmark_escape,
    benchmark_serialize,
    benchmark_parse,
    benchmark_jar
);
criterion_main!(benches);

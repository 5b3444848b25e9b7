//! Pure predicates over candidate meta values.
//!
//! Each predicate is total: any string input yields a boolean, never an
//! error. Type checks (string vs map vs array) are the field rules'
//! concern, not these predicates'.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Browser-extension match pattern grammar:
/// `<scheme>://<host>/<path>` where scheme is `*`, `http(s)`, `file` or
/// `ftp`, host is `*`, `*.`-prefixed, or a literal without wildcards, and
/// the path is free text.
static MATCH_PATTERN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([*]|https?|file|ftp)://([*]|(?:\*\.)?[^*/]*)/.*$")
        .expect("invalid match pattern regex")
});

static IPV4_SHAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,3}[.][0-9]{1,3}[.][0-9]{1,3}[.][0-9]{1,3}$")
        .expect("invalid IPv4 shape regex")
});

/// Bare domain: at least two word/hyphen labels joined by dots.
/// Deliberately unanchored, matching on containment.
static BARE_DOMAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w-]+(\.[\w-]+)+").expect("invalid domain regex"));

/// True iff the value parses as an absolute URI.
pub fn is_uri(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// True iff the value is a valid browser-extension match pattern.
///
/// A bare `*` is not a match pattern; use a glob URI for that.
pub fn is_uri_match_pattern(value: &str) -> bool {
    MATCH_PATTERN_REGEX.is_match(value)
}

/// True iff the value is usable for `include`/`exclude` page matching:
/// a `/regex/`-delimited literal, a plain URI, or any string containing
/// the `*` wildcard.
pub fn is_glob_uri(value: &str) -> bool {
    is_regex_literal(value) || is_uri(value) || value.contains('*')
}

fn is_regex_literal(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('/') && value.ends_with('/')
}

/// True iff the value is four dot-separated canonical decimal octets in
/// 0-255. Leading zeros are rejected (`001.002.003.004` is not canonical).
pub fn is_ipv4(value: &str) -> bool {
    if !IPV4_SHAPE_REGEX.is_match(value) {
        return false;
    }
    value.split('.').all(|octet| {
        octet
            .parse::<u32>()
            .is_ok_and(|n| n <= 255 && n.to_string() == octet)
    })
}

/// True iff the value is legal for Tampermonkey's `connect` key: an IPv4
/// address, a URI, a bare domain, or the literals `*` / `localhost`.
pub fn is_valid_connect_value(value: &str) -> bool {
    is_ipv4(value)
        || is_uri(value)
        || BARE_DOMAIN_REGEX.is_match(value)
        || value == "*"
        || value == "localhost"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri() {
        assert!(is_uri("https://example.com"));
        assert!(!is_uri("*"));
        assert!(!is_uri(""));
    }

    // Cases from the chromium match pattern documentation.
    #[test]
    fn uri_match_pattern() {
        assert!(is_uri_match_pattern("https://*/*"));
        assert!(is_uri_match_pattern("file:///foo*"));
        assert!(is_uri_match_pattern("http://127.0.0.1/*"));
        assert!(is_uri_match_pattern("*://mail.google.com/*"));
        assert!(is_uri_match_pattern("https://example.org/foo/bar.html"));
        assert!(is_uri_match_pattern("https://*.google.com/foo*bar"));

        assert!(!is_uri_match_pattern("*"));
        assert!(!is_uri_match_pattern(" "));
        assert!(!is_uri_match_pattern("foo://*"));
        assert!(!is_uri_match_pattern("http:/bar"));
        assert!(!is_uri_match_pattern("https://*foo/bar"));
        assert!(!is_uri_match_pattern("https://foo.*.bar/baz"));
        assert!(!is_uri_match_pattern("https://www.google.com"));
    }

    #[test]
    fn glob_uri() {
        assert!(is_glob_uri("*"));
        assert!(is_glob_uri("foo://*"));
        assert!(is_glob_uri("http://*/*"));
        assert!(is_glob_uri("file:///foo*"));
        assert!(is_glob_uri("http://*foo/bar"));
        assert!(is_glob_uri("http://foo.*.bar/baz"));
        assert!(is_glob_uri("*://mail.google.com/*"));
        assert!(is_glob_uri("http://www.google.com"));
        assert!(is_glob_uri("https://*.google.com/foo*bar"));
        assert!(is_glob_uri("http://example.org/foo/bar.html"));
        assert!(is_glob_uri("/^https?://.*$/"));

        assert!(!is_glob_uri(" "));
        assert!(!is_glob_uri(""));
        assert!(!is_glob_uri("/"));
    }

    #[test]
    fn ipv4() {
        assert!(is_ipv4("0.0.0.0"));
        assert!(is_ipv4("127.0.0.1"));
        assert!(is_ipv4("255.255.255.255"));

        assert!(!is_ipv4("::1"));
        assert!(!is_ipv4("0.0.0"));
        assert!(!is_ipv4("01.02.03.04"));
        assert!(!is_ipv4("100.200.300.400"));
        assert!(!is_ipv4("001.002.003.004"));
        assert!(!is_ipv4("1.2.3.4.5"));
    }

    #[test]
    fn connect_value() {
        assert!(is_valid_connect_value("*"));
        assert!(is_valid_connect_value("localhost"));
        assert!(is_valid_connect_value("1.2.3.4"));
        assert!(is_valid_connect_value("example.com"));
        assert!(is_valid_connect_value("api.example.co.uk"));
        assert!(is_valid_connect_value("https://example.com"));

        assert!(!is_valid_connect_value("nodots"));
        assert!(!is_valid_connect_value(""));
    }
}

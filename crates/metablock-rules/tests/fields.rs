//! Unit tests for the field rules, one per rule shape.

use indexmap::IndexMap;
use metablock_model::{MetaEntry, MetaValue};
use metablock_rules::fields::{
    binary_connect_pattern, binary_connect_pattern_array, binary_enum, binary_glob_uri,
    binary_glob_uri_array, binary_match_pattern, binary_match_pattern_array, binary_string,
    binary_string_array, binary_uri, binary_uri_array, binary_version, grant, multilingual,
    ternary_uri, unary,
};

fn map(pairs: &[(&str, &str)]) -> MetaValue {
    let mut inner = IndexMap::new();
    for (key, value) in pairs {
        inner.insert((*key).to_string(), MetaValue::from(*value));
    }
    MetaValue::Map(inner)
}

fn pairs(expected: &[(&str, &str)]) -> Vec<MetaEntry> {
    expected
        .iter()
        .map(|(key, value)| MetaEntry::pair(*key, *value))
        .collect()
}

#[test]
fn multilingual_scalar_and_map() {
    let out = multilingual("name", &MetaValue::from("test"));
    assert_eq!(out.entries, pairs(&[("name", "test")]));
    assert!(out.diagnostics.is_empty());

    let value = map(&[("en", "test"), ("zh-TW", "測試"), ("default", "test")]);
    let out = multilingual("name", &value);
    assert_eq!(
        out.entries,
        pairs(&[("name", "test"), ("name:en", "test"), ("name:zh-TW", "測試")])
    );
}

#[test]
fn multilingual_requires_default() {
    let out = multilingual("name", &map(&[("en", "test")]));
    assert!(out.entries.is_empty());
    assert_eq!(out.diagnostics.len(), 1);
    assert!(out.diagnostics[0].message.contains("default is required"));
}

#[test]
fn multilingual_skips_non_string_tag_values_with_report() {
    let mut inner = IndexMap::new();
    inner.insert("default".to_string(), MetaValue::from("test"));
    inner.insert("en".to_string(), MetaValue::Number(3.0));
    inner.insert("zh-TW".to_string(), MetaValue::from("測試"));
    let out = multilingual("name", &MetaValue::Map(inner));

    // String tags survive; the numeric tag draws a per-tag report.
    assert_eq!(out.entries, pairs(&[("name", "test"), ("name:zh-TW", "測試")]));
    assert_eq!(out.diagnostics.len(), 1);
    assert!(out.diagnostics[0].message.contains("name:en"));
}

#[test]
fn multilingual_rejects_other_types() {
    let out = multilingual("name", &MetaValue::Number(3.0));
    assert!(out.entries.is_empty());
    assert_eq!(out.diagnostics.len(), 1);

    let out = multilingual("name", &MetaValue::Null);
    assert!(out.entries.is_empty());
    assert!(out.diagnostics[0].message.contains("can't be falsy"));
}

#[test]
fn binary_string_rule() {
    let out = binary_string("namespace", &MetaValue::from("test"));
    assert_eq!(out.entries, pairs(&[("namespace", "test")]));

    let out = binary_string("namespace", &MetaValue::Bool(true));
    assert!(out.entries.is_empty());
    assert!(out.diagnostics[0].message.contains("string type"));
}

#[test]
fn binary_string_array_rule() {
    let out = binary_string_array("incompatible", &MetaValue::from("safari"));
    assert_eq!(out.entries, pairs(&[("incompatible", "safari")]));

    let out = binary_string_array("incompatible", &MetaValue::from(vec!["chrome", "safari"]));
    assert_eq!(
        out.entries,
        pairs(&[("incompatible", "chrome"), ("incompatible", "safari")])
    );
}

#[test]
fn binary_uri_rule() {
    let out = binary_uri("homepage", &MetaValue::from("https://example.com"));
    assert_eq!(out.entries, pairs(&[("homepage", "https://example.com")]));
    assert!(out.diagnostics.is_empty());
}

#[test]
fn binary_uri_emits_despite_format_failure() {
    // Format checks are advisory: the raw value still goes out.
    let out = binary_uri("icon", &MetaValue::from("not a uri"));
    assert_eq!(out.entries, pairs(&[("icon", "not a uri")]));
    assert_eq!(out.diagnostics.len(), 1);
    assert!(out.diagnostics[0].message.contains("valid URI"));
}

#[test]
fn binary_uri_array_rule() {
    let out = binary_uri_array(
        "require",
        &MetaValue::from(vec![
            "https://example.com/",
            "https://example.com/favicon.ico",
        ]),
    );
    assert_eq!(
        out.entries,
        pairs(&[
            ("require", "https://example.com/"),
            ("require", "https://example.com/favicon.ico"),
        ])
    );
}

#[test]
fn binary_glob_uri_rule() {
    let out = binary_glob_uri("include", &MetaValue::from("*"));
    assert_eq!(out.entries, pairs(&[("include", "*")]));
    assert!(out.diagnostics.is_empty());

    let out = binary_glob_uri("include", &MetaValue::from("foo://*"));
    assert_eq!(out.entries, pairs(&[("include", "foo://*")]));
}

#[test]
fn binary_glob_uri_array_rule() {
    let out = binary_glob_uri_array("exclude", &MetaValue::from(vec!["*", "foo://*"]));
    assert_eq!(out.entries, pairs(&[("exclude", "*"), ("exclude", "foo://*")]));
}

#[test]
fn binary_match_pattern_rule() {
    let out = binary_match_pattern("match", &MetaValue::from("*://*"));
    // "*://*" fails the pattern grammar (no path) but is still emitted.
    assert_eq!(out.entries, pairs(&[("match", "*://*")]));
    assert_eq!(out.diagnostics.len(), 1);

    let out = binary_match_pattern("match", &MetaValue::from("https://*/*"));
    assert_eq!(out.entries, pairs(&[("match", "https://*/*")]));
    assert!(out.diagnostics.is_empty());
}

#[test]
fn binary_match_pattern_array_rule() {
    let out = binary_match_pattern_array(
        "exclude-match",
        &MetaValue::from(vec!["https://*/*", "https://example.com/*"]),
    );
    assert_eq!(
        out.entries,
        pairs(&[
            ("exclude-match", "https://*/*"),
            ("exclude-match", "https://example.com/*"),
        ])
    );
    assert!(out.diagnostics.is_empty());
}

#[test]
fn binary_enum_rule() {
    let legal = &["document-start", "document-end"];
    let out = binary_enum("run-at", legal, &MetaValue::from("document-start"));
    assert_eq!(out.entries, pairs(&[("run-at", "document-start")]));

    // Enum membership is blocking, unlike format checks.
    let out = binary_enum("run-at", legal, &MetaValue::from("document-idle"));
    assert!(out.entries.is_empty());
    assert!(out.diagnostics[0].message.contains("should be one of"));
}

#[test]
fn binary_version_valid() {
    let out = binary_version("version", &MetaValue::from("1.0.0"));
    assert_eq!(out.entries, pairs(&[("version", "1.0.0")]));
    assert!(out.diagnostics.is_empty());

    let out = binary_version("version", &MetaValue::from("1.2.3-alpha"));
    assert_eq!(out.entries, pairs(&[("version", "1.2.3-alpha")]));
    assert!(out.diagnostics.is_empty());
}

#[test]
fn binary_version_coerces_with_report() {
    let out = binary_version("version", &MetaValue::from("1.0"));
    assert_eq!(out.entries, pairs(&[("version", "1.0.0")]));
    assert_eq!(out.diagnostics.len(), 1);

    let out = binary_version("version", &MetaValue::from("1-alpha"));
    assert_eq!(out.entries, pairs(&[("version", "1.0.0")]));
    assert!(out.diagnostics[0].message.contains("can be transform to"));

    // A range prefix is not valid semver; it coerces with a report.
    let out = binary_version("version", &MetaValue::from("=v1.2.3"));
    assert_eq!(out.entries, pairs(&[("version", "1.2.3")]));
    assert!(out.diagnostics[0].message.contains("can be transform to"));
}

#[test]
fn binary_version_rejects_junk() {
    let out = binary_version("version", &MetaValue::from("alpha"));
    assert!(out.entries.is_empty());
    assert_eq!(out.diagnostics.len(), 1);

    let out = binary_version("version", &MetaValue::Number(123.0));
    assert!(out.entries.is_empty());
    assert!(out.diagnostics[0].message.contains("string type"));
}

#[test]
fn ternary_uri_rule() {
    let value = map(&[
        ("csv", "https://example.com/data.csv"),
        ("bgm", "https://example.com/bgm.mp3"),
    ]);
    let out = ternary_uri("resource", &value);
    assert_eq!(
        out.entries,
        vec![
            MetaEntry::triple("resource", "csv", "https://example.com/data.csv"),
            MetaEntry::triple("resource", "bgm", "https://example.com/bgm.mp3"),
        ]
    );
}

#[test]
fn ternary_uri_aborts_whole_field() {
    let value = map(&[
        ("csv", "https://example.com/data.csv"),
        ("bad", "not a uri"),
    ]);
    let out = ternary_uri("resource", &value);
    assert!(out.entries.is_empty());
    assert_eq!(out.diagnostics.len(), 1);
}

#[test]
fn unary_rule() {
    let out = unary("noframes", &MetaValue::Bool(true));
    assert_eq!(out.entries, vec![MetaEntry::unary("noframes")]);

    let out = unary("noframes", &MetaValue::Bool(false));
    assert!(out.entries.is_empty());
    assert_eq!(out.diagnostics.len(), 1);
}

#[test]
fn connect_pattern_rule() {
    let out = binary_connect_pattern("connect", &MetaValue::from("*"));
    assert_eq!(out.entries, pairs(&[("connect", "*")]));
    assert!(out.diagnostics.is_empty());
}

#[test]
fn connect_pattern_array_rule() {
    let out = binary_connect_pattern_array("connect", &MetaValue::from("1.2.3.4"));
    assert_eq!(out.entries, pairs(&[("connect", "1.2.3.4")]));

    let out = binary_connect_pattern_array("connect", &MetaValue::from(vec!["*", "localhost"]));
    assert_eq!(out.entries, pairs(&[("connect", "*"), ("connect", "localhost")]));
}

#[test]
fn grant_rule() {
    let out = grant("grant", &MetaValue::Null);
    assert_eq!(out.entries, pairs(&[("grant", "none")]));

    let out = grant("grant", &MetaValue::from("GM_getValue"));
    assert_eq!(out.entries, pairs(&[("grant", "GM_getValue")]));

    let out = grant("grant", &MetaValue::from(vec!["GM_getValue", "GM_setValue"]));
    assert_eq!(
        out.entries,
        pairs(&[("grant", "GM_getValue"), ("grant", "GM_setValue")])
    );

    // An empty list still falls back to none.
    let out = grant("grant", &MetaValue::Array(Vec::new()));
    assert_eq!(out.entries, pairs(&[("grant", "none")]));
}

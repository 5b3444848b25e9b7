//! Field rules: validate and normalize one raw meta value into zero or
//! more metablock entries.
//!
//! Every rule is a pure function from a raw value to a [`RuleOutput`].
//! Rules never enforce policy; they emit diagnostics and the transform
//! pipeline decides whether those are ignored, logged, or fatal.
//!
//! Two failure classes exist and are deliberately asymmetric:
//! type mismatches and enum non-membership are blocking (no entry is
//! emitted), while format checks on binary scalar rules are advisory
//! (the raw value is still emitted alongside the diagnostic).

use metablock_model::{Diagnostic, MetaEntry, MetaValue, RuleOutput};

use crate::validators::{
    is_glob_uri, is_uri, is_uri_match_pattern, is_valid_connect_value,
};

/// The closed set of rule shapes a meta field can have.
///
/// Enum-typed fields carry their legal value set; everything else is
/// fully described by the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single string, or a language-tag map with a required `default`.
    Multilingual,
    /// Non-empty string.
    BinaryString,
    /// Non-empty string or list thereof.
    BinaryStringArray,
    /// String, advisory URI format check.
    BinaryUri,
    /// String or list, advisory URI format check per element.
    BinaryUriArray,
    /// String, advisory glob-URI check.
    BinaryGlobUri,
    /// String or list, advisory glob-URI check per element.
    BinaryGlobUriArray,
    /// String, advisory match-pattern check.
    BinaryMatchPattern,
    /// String or list, advisory match-pattern check per element.
    BinaryMatchPatternArray,
    /// String, advisory connect-value check.
    BinaryConnectPattern,
    /// String or list, advisory connect-value check per element.
    BinaryConnectPatternArray,
    /// String restricted to a fixed value set (blocking).
    BinaryEnum(&'static [&'static str]),
    /// Semantic version with lenient coercion.
    BinaryVersion,
    /// Flag field: truthy emits the bare key.
    Unary,
    /// Map from resource name to URI; all-or-nothing.
    TernaryUri,
    /// `grant` with its `none` fallback.
    Grant,
}

impl FieldKind {
    /// Apply this rule shape to a raw value under the given output key.
    pub fn apply(&self, key: &str, value: &MetaValue) -> RuleOutput {
        match self {
            FieldKind::Multilingual => multilingual(key, value),
            FieldKind::BinaryString => binary_string(key, value),
            FieldKind::BinaryStringArray => binary_string_array(key, value),
            FieldKind::BinaryUri => binary_uri(key, value),
            FieldKind::BinaryUriArray => binary_uri_array(key, value),
            FieldKind::BinaryGlobUri => binary_glob_uri(key, value),
            FieldKind::BinaryGlobUriArray => binary_glob_uri_array(key, value),
            FieldKind::BinaryMatchPattern => binary_match_pattern(key, value),
            FieldKind::BinaryMatchPatternArray => binary_match_pattern_array(key, value),
            FieldKind::BinaryConnectPattern => binary_connect_pattern(key, value),
            FieldKind::BinaryConnectPatternArray => binary_connect_pattern_array(key, value),
            FieldKind::BinaryEnum(values) => binary_enum(key, values, value),
            FieldKind::BinaryVersion => binary_version(key, value),
            FieldKind::Unary => unary(key, value),
            FieldKind::TernaryUri => ternary_uri(key, value),
            FieldKind::Grant => grant(key, value),
        }
    }
}

fn falsy_failure(key: &str) -> RuleOutput {
    RuleOutput::failure(Diagnostic::new(
        key,
        format!("{key}'s meta value can't be falsy"),
    ))
}

fn string_type_failure(key: &str) -> RuleOutput {
    RuleOutput::failure(Diagnostic::new(
        key,
        format!("{key}'s meta value should be string type"),
    ))
}

fn string_or_array_diagnostic(key: &str) -> Diagnostic {
    Diagnostic::new(
        key,
        format!("{key}'s meta value should be string or string[] type"),
    )
}

/// Multilingual rule (`name`, `description`, `antifeature`).
///
/// A plain string emits one entry under the bare key. A map must carry a
/// `default` entry (emitted under the bare key); every other tag emits
/// under `key:tag`. Entries are sorted by full key, which puts the bare
/// key first and the tags in order after it.
pub fn multilingual(key: &str, value: &MetaValue) -> RuleOutput {
    if value.is_falsy() {
        return falsy_failure(key);
    }

    if let Some(text) = value.as_str() {
        return RuleOutput::entries(vec![MetaEntry::pair(key, text)]);
    }

    if let Some(languages) = value.as_map() {
        if !languages.get("default").is_some_and(MetaValue::is_truthy) {
            return RuleOutput::failure(Diagnostic::new(
                key,
                format!("{key}.default is required"),
            ));
        }

        let mut out = RuleOutput::default();
        for (tag, text) in languages {
            let Some(text) = text.as_str() else {
                out.diagnostics.push(Diagnostic::new(
                    key,
                    format!("{key}:{tag}'s meta value should be string type"),
                ));
                continue;
            };
            let lang_key = if tag == "default" {
                key.to_string()
            } else {
                format!("{key}:{tag}")
            };
            out.entries.push(MetaEntry::pair(lang_key, text));
        }
        out.entries.sort_by(|a, b| a.key.cmp(&b.key));
        return out;
    }

    RuleOutput::failure(Diagnostic::new(
        key,
        format!("{key}'s meta value is an invalid type"),
    ))
}

/// Binary scalar rule with an advisory format check.
///
/// The format check never blocks emission; the raw value goes out with a
/// diagnostic attached. Only falsy values and type mismatches block.
fn binary_scalar(
    key: &str,
    value: &MetaValue,
    check: fn(&str) -> bool,
    expectation: &str,
) -> RuleOutput {
    if value.is_falsy() {
        return falsy_failure(key);
    }
    let Some(text) = value.as_str() else {
        return string_type_failure(key);
    };

    let mut out = RuleOutput::entries(vec![MetaEntry::pair(key, text)]);
    if !check(text) {
        out.diagnostics.push(Diagnostic::new(
            key,
            format!("{key}'s meta value should be {expectation}"),
        ));
    }
    out
}

/// Lift a scalar rule to accept either a scalar or a sequence.
///
/// Sequence elements run independently; their surviving entries are
/// concatenated. A sequence that produces no entries at all degrades to
/// a type failure, mirroring the scalar path.
fn binary_scalar_array(
    key: &str,
    value: &MetaValue,
    scalar: impl Fn(&str, &MetaValue) -> RuleOutput,
) -> RuleOutput {
    if value.is_falsy() {
        return falsy_failure(key);
    }

    if let Some(items) = value.as_array() {
        let mut out = RuleOutput::default();
        for item in items {
            out.extend(scalar(key, item));
        }
        if out.entries.is_empty() {
            out.diagnostics.push(string_or_array_diagnostic(key));
        }
        return out;
    }

    if value.as_str().is_none() {
        return RuleOutput::failure(string_or_array_diagnostic(key));
    }

    scalar(key, value)
}

pub fn binary_string(key: &str, value: &MetaValue) -> RuleOutput {
    if value.is_falsy() {
        return falsy_failure(key);
    }
    let Some(text) = value.as_str() else {
        return string_type_failure(key);
    };
    RuleOutput::entries(vec![MetaEntry::pair(key, text)])
}

pub fn binary_string_array(key: &str, value: &MetaValue) -> RuleOutput {
    binary_scalar_array(key, value, binary_string)
}

pub fn binary_uri(key: &str, value: &MetaValue) -> RuleOutput {
    binary_scalar(key, value, is_uri, "a valid URI")
}

pub fn binary_uri_array(key: &str, value: &MetaValue) -> RuleOutput {
    binary_scalar_array(key, value, binary_uri)
}

pub fn binary_glob_uri(key: &str, value: &MetaValue) -> RuleOutput {
    binary_scalar(key, value, is_glob_uri, "a valid glob URI")
}

pub fn binary_glob_uri_array(key: &str, value: &MetaValue) -> RuleOutput {
    binary_scalar_array(key, value, binary_glob_uri)
}

pub fn binary_match_pattern(key: &str, value: &MetaValue) -> RuleOutput {
    binary_scalar(key, value, is_uri_match_pattern, "a valid match pattern")
}

pub fn binary_match_pattern_array(key: &str, value: &MetaValue) -> RuleOutput {
    binary_scalar_array(key, value, binary_match_pattern)
}

pub fn binary_connect_pattern(key: &str, value: &MetaValue) -> RuleOutput {
    binary_scalar(key, value, is_valid_connect_value, "a valid connect pattern")
}

/// Connect rule lifted over sequences.
///
/// The non-sequence fall-through validates with the match-pattern check,
/// faithfully reproducing the upstream implementation's behavior for
/// scalar inputs reaching this rule.
pub fn binary_connect_pattern_array(key: &str, value: &MetaValue) -> RuleOutput {
    if value.is_falsy() {
        return falsy_failure(key);
    }

    if let Some(items) = value.as_array() {
        let mut out = RuleOutput::default();
        for item in items {
            out.extend(binary_connect_pattern(key, item));
        }
        if out.entries.is_empty() {
            out.diagnostics.push(string_or_array_diagnostic(key));
        }
        return out;
    }

    if value.as_str().is_none() {
        return RuleOutput::failure(string_or_array_diagnostic(key));
    }

    binary_match_pattern(key, value)
}

/// Enum rule: membership is blocking, unlike format checks.
pub fn binary_enum(key: &str, legal: &[&str], value: &MetaValue) -> RuleOutput {
    if value.is_falsy() {
        return falsy_failure(key);
    }
    let Some(text) = value.as_str() else {
        return string_type_failure(key);
    };
    if !legal.contains(&text) {
        return RuleOutput::failure(Diagnostic::new(
            key,
            format!("{key}'s meta value should be one of [{}]", legal.join(", ")),
        ));
    }
    RuleOutput::entries(vec![MetaEntry::pair(key, text)])
}

/// Version rule: exact semver passes cleaned; near-misses are coerced
/// (`1` → `1.0.0`, `1-alpha` → `1.0.0`) with a diagnostic noting the
/// transformation; anything without a numeric core fails.
pub fn binary_version(key: &str, value: &MetaValue) -> RuleOutput {
    if value.is_falsy() {
        return falsy_failure(key);
    }
    let Some(text) = value.as_str() else {
        return string_type_failure(key);
    };

    if let Some(cleaned) = crate::version::clean(text) {
        return RuleOutput::entries(vec![MetaEntry::pair(key, cleaned)]);
    }

    if let Some(coerced) = crate::version::coerce(text) {
        let mut out = RuleOutput::entries(vec![MetaEntry::pair(key, coerced.clone())]);
        out.diagnostics.push(Diagnostic::new(
            key,
            format!("{key} can be transform to {coerced}"),
        ));
        return out;
    }

    RuleOutput::failure(Diagnostic::new(
        key,
        format!("{key}'s meta value is invalid"),
    ))
}

/// Flag rule: any truthy value emits the bare key.
pub fn unary(key: &str, value: &MetaValue) -> RuleOutput {
    if value.is_falsy() {
        return falsy_failure(key);
    }
    RuleOutput::entries(vec![MetaEntry::unary(key)])
}

/// Resource rule: a map from resource name to URI. Any invalid URI
/// aborts the whole field; there is no partial emission.
pub fn ternary_uri(key: &str, value: &MetaValue) -> RuleOutput {
    if value.is_falsy() {
        return falsy_failure(key);
    }
    let Some(resources) = value.as_map() else {
        return RuleOutput::failure(Diagnostic::new(
            key,
            format!("{key}'s meta value should be plain object type"),
        ));
    };

    let mut entries = Vec::with_capacity(resources.len());
    for (name, uri) in resources {
        match uri.as_str() {
            Some(text) if is_uri(text) => entries.push(MetaEntry::triple(key, name, text)),
            _ => {
                return RuleOutput::failure(Diagnostic::new(
                    key,
                    format!("{key}'s meta value should be URI"),
                ));
            }
        }
    }
    RuleOutput::entries(entries)
}

/// Grant rule: falsy or unusable input falls back to `none`; strings are
/// passed through verbatim; sequences recurse per element.
pub fn grant(key: &str, value: &MetaValue) -> RuleOutput {
    if value.is_falsy() {
        return RuleOutput::entries(vec![MetaEntry::pair(key, "none")]);
    }

    if let Some(text) = value.as_str() {
        return RuleOutput::entries(vec![MetaEntry::pair(key, text)]);
    }

    if let Some(items) = value.as_array() {
        let mut out = RuleOutput::default();
        for item in items {
            out.extend(grant(key, item));
        }
        if !out.entries.is_empty() {
            return out;
        }
    }

    RuleOutput::entries(vec![MetaEntry::pair(key, "none")])
}

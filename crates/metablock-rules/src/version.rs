//! Semantic version cleaning and lenient coercion.
//!
//! `clean` accepts only full semver strings (optionally `v`-prefixed) and
//! normalizes them. `coerce` salvages a version out of partial input by
//! taking the first dotted run of digits and zero-filling the missing
//! components; prerelease and build suffixes do not survive coercion.

use std::sync::LazyLock;

use regex::Regex;

static SEMVER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(?:-((?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    )
    .expect("invalid semver regex")
});

static COERCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+)(?:\.([0-9]+))?(?:\.([0-9]+))?").expect("invalid coercion regex")
});

/// Normalize a full semver string: trim surrounding whitespace and a
/// leading `v`. Returns `None` when the input is not valid semver.
/// A `=` prefix is not accepted here; such input falls to [`coerce`].
pub fn clean(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    SEMVER_REGEX.is_match(trimmed).then(|| trimmed.to_string())
}

/// Coerce a loose version string into `major.minor.patch`, dropping any
/// prerelease suffix: `1` → `1.0.0`, `1.2` → `1.2.0`, `1-alpha` →
/// `1.0.0`. Returns `None` when no digits are present.
pub fn coerce(input: &str) -> Option<String> {
    let captures = COERCE_REGEX.captures(input)?;
    let major = captures.get(1)?.as_str();
    let minor = captures.get(2).map_or("0", |m| m.as_str());
    let patch = captures.get(3).map_or("0", |m| m.as_str());
    Some(format!(
        "{}.{}.{}",
        trim_zeros(major),
        trim_zeros(minor),
        trim_zeros(patch)
    ))
}

fn trim_zeros(component: &str) -> &str {
    let trimmed = component.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}

//! Configuration options for metablock generation.
//!
//! [`MetablockConfig`] is the loosely typed record callers (or a config
//! file) supply; [`resolve_options`] turns it into the fully resolved,
//! immutable form the pipeline and the artifact filter consume.

use std::path::PathBuf;

use regex::Regex;
use serde::{Deserialize, Serialize};

use metablock_model::{
    ErrorLevel, MetaSource, MetaValue, MetablockError, OrderItem, Result, ScriptManager,
};
use metablock_rules::{DEFAULT_ORDER, supported_keys_for};

/// Artifact names ending in `.user.js` receive the metablock by default.
pub const DEFAULT_APPLY_PATTERN: &str = r"/[.]user[.]js$/";

/// A scalar-or-list config value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// Raw user configuration, as accepted from callers or a config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetablockConfig {
    /// Path to a metadata source file (json, json5, yaml, yml).
    pub file: Option<PathBuf>,

    /// Field ordering; may contain the `...` rest marker.
    pub order: Vec<String>,

    /// Governance for validation failures and unknown keys.
    pub error_level: Option<ErrorLevel>,

    /// Target script manager alias(es); defaults to `all`.
    pub manager: Option<OneOrMany<String>>,

    /// Values merged over the metadata source, winning per key.
    #[serde(rename = "override")]
    pub override_map: Option<MetaValue>,

    /// Artifact name patterns receiving the block. Plain strings match by
    /// containment; `/…/`-delimited strings are regexes.
    pub apply_to: Option<OneOrMany<String>>,
}

/// A single artifact-name filter.
#[derive(Debug, Clone)]
pub enum ApplyPattern {
    /// Substring containment.
    Substring(String),
    /// Regex test.
    Regex(Regex),
}

impl ApplyPattern {
    /// Parse a config string: `/…/`-delimited means regex, anything else
    /// matches by containment.
    pub fn parse(pattern: &str) -> Result<Self> {
        if pattern.len() >= 2 && pattern.starts_with('/') && pattern.ends_with('/') {
            let inner = &pattern[1..pattern.len() - 1];
            let regex = Regex::new(inner).map_err(|source| MetablockError::Validation {
                key: "applyTo".to_string(),
                message: format!("invalid pattern {pattern}: {source}"),
            })?;
            Ok(ApplyPattern::Regex(regex))
        } else {
            Ok(ApplyPattern::Substring(pattern.to_string()))
        }
    }

    pub fn matches(&self, artifact_name: &str) -> bool {
        match self {
            ApplyPattern::Substring(needle) => artifact_name.contains(needle.as_str()),
            ApplyPattern::Regex(regex) => regex.is_match(artifact_name),
        }
    }
}

/// The transform-facing half of a resolved configuration.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Final field ordering; always contains exactly one rest marker.
    pub order: Vec<OrderItem>,
    /// Meta keys legal for the requested manager(s), first-seen order.
    pub supported_keys: Vec<&'static str>,
    pub error_level: ErrorLevel,
    pub override_map: MetaSource,
}

/// The output-facing half of a resolved configuration.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub apply_patterns: Vec<ApplyPattern>,
}

impl OutputOptions {
    /// True when the artifact name matches at least one pattern.
    pub fn applies_to(&self, artifact_name: &str) -> bool {
        self.apply_patterns
            .iter()
            .any(|pattern| pattern.matches(artifact_name))
    }
}

/// A fully resolved configuration, built once per invocation.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub transform: TransformOptions,
    pub output: OutputOptions,
}

/// Resolve raw configuration into its immutable internal form.
///
/// # Errors
///
/// Unknown script-manager aliases, a non-mapping override, and malformed
/// regex apply-patterns are hard configuration errors, raised regardless
/// of the configured error level.
pub fn resolve_options(config: &MetablockConfig) -> Result<ResolvedOptions> {
    let manager_aliases = config
        .manager
        .clone()
        .map_or_else(|| vec!["all".to_string()], OneOrMany::into_vec);
    let managers = manager_aliases
        .iter()
        .map(|alias| alias.parse::<ScriptManager>())
        .collect::<Result<Vec<_>>>()?;
    let supported_keys = supported_keys_for(&managers);

    let override_map = match &config.override_map {
        None => MetaSource::new(),
        Some(MetaValue::Map(map)) => map.clone(),
        Some(_) => return Err(MetablockError::InvalidOverride),
    };

    let order = resolve_order(&config.order, &supported_keys);

    let apply_patterns = config
        .apply_to
        .clone()
        .map_or_else(|| vec![DEFAULT_APPLY_PATTERN.to_string()], OneOrMany::into_vec)
        .iter()
        .map(|pattern| ApplyPattern::parse(pattern))
        .collect::<Result<Vec<_>>>()?;

    Ok(ResolvedOptions {
        transform: TransformOptions {
            order,
            supported_keys,
            error_level: config.error_level.unwrap_or_default(),
            override_map,
        },
        output: OutputOptions { apply_patterns },
    })
}

/// Build the final ordering list.
///
/// The first rest marker in the user order is expanded in place to the
/// built-in default order (which itself carries a rest marker, keeping
/// unlisted keys in the middle); without one, the default order is
/// appended wholesale. Duplicates are dropped keeping the first
/// occurrence, and fields outside the supported set are filtered out.
fn resolve_order(user_order: &[String], supported_keys: &[&'static str]) -> Vec<OrderItem> {
    let mut items: Vec<OrderItem> = user_order
        .iter()
        .map(|token| OrderItem::parse(token))
        .collect();

    let default_items = DEFAULT_ORDER.iter().map(|token| OrderItem::parse(token));
    match items.iter().position(|item| *item == OrderItem::Rest) {
        Some(index) => {
            items.splice(index..=index, default_items);
        }
        None => items.extend(default_items),
    }

    let mut resolved = Vec::with_capacity(items.len());
    for item in items {
        if resolved.contains(&item) {
            continue;
        }
        match &item {
            OrderItem::Rest => resolved.push(item),
            OrderItem::Field(name) => {
                if supported_keys.contains(&name.as_str()) {
                    resolved.push(item);
                }
            }
        }
    }
    resolved
}

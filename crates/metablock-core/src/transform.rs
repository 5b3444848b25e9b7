//! The transform pipeline: merge, default-fill, sort, and run field
//! rules, producing the ordered entry list the renderer consumes.

use metablock_model::{
    Diagnostic, ErrorLevel, MetaEntry, MetaSource, MetaValue, MetablockError, OrderItem, Result,
};
use metablock_rules::lookup_rule;
use tracing::warn;

use crate::options::TransformOptions;

/// Required keys and their fill-in values, applied only when the key is
/// entirely absent from the merged source (presence, not truthiness).
fn default_meta() -> [(&'static str, MetaValue); 4] {
    [
        ("name", MetaValue::from("New Userscript")),
        ("description", MetaValue::from("This is a userscript")),
        ("namespace", MetaValue::from("npm/metablock")),
        // The grant rule turns a null into `none`.
        ("grant", MetaValue::Null),
    ]
}

/// The pipeline's output: ordered entries plus every diagnostic that was
/// reported (and not suppressed) along the way.
#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub entries: Vec<MetaEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the whole pipeline on one metadata source.
///
/// # Errors
///
/// Under [`ErrorLevel::Error`], the first validation failure or unknown
/// key aborts the transform with a descriptive error. Lower levels never
/// fail.
pub fn transform(source: &MetaSource, options: &TransformOptions) -> Result<TransformResult> {
    let merged = merge_with_defaults(source, &options.override_map);
    let sorted = sort_by_order(merged, &options.order);

    let mut result = TransformResult::default();
    for (key, value) in &sorted {
        if !options.supported_keys.contains(&key.as_str()) {
            match options.error_level {
                ErrorLevel::Off => {}
                ErrorLevel::Warn => {
                    warn!(key = %key, "unknown meta key");
                    result.diagnostics.push(Diagnostic::new(
                        key.clone(),
                        format!("unknown meta key: {key}"),
                    ));
                }
                ErrorLevel::Error => {
                    return Err(MetablockError::UnknownMetaKey { key: key.clone() });
                }
            }
            continue;
        }

        let Some(kind) = lookup_rule(key) else {
            continue;
        };
        let output = kind.apply(key, value);
        match options.error_level {
            ErrorLevel::Off => {}
            ErrorLevel::Warn => {
                for diagnostic in &output.diagnostics {
                    warn!(key = %diagnostic.key, "{}", diagnostic.message);
                }
                result.diagnostics.extend(output.diagnostics);
            }
            ErrorLevel::Error => {
                if let Some(diagnostic) = output.diagnostics.into_iter().next() {
                    return Err(MetablockError::Validation {
                        key: diagnostic.key,
                        message: diagnostic.message,
                    });
                }
            }
        }
        result.entries.extend(output.entries);
    }
    Ok(result)
}

/// Shallow-merge the override onto the source (override wins per key),
/// then fill required defaults for keys that are entirely absent.
fn merge_with_defaults(source: &MetaSource, override_map: &MetaSource) -> MetaSource {
    let mut merged = source.clone();
    for (key, value) in override_map {
        merged.insert(key.clone(), value.clone());
    }
    for (key, value) in default_meta() {
        if !merged.contains_key(key) {
            merged.insert(key.to_string(), value);
        }
    }
    merged
}

/// Stable-sort the merged mapping by each key's position in the resolved
/// order. Keys without an explicit position rank at the rest marker,
/// keeping their source insertion order among themselves.
fn sort_by_order(merged: MetaSource, order: &[OrderItem]) -> Vec<(String, MetaValue)> {
    let rest_rank = order
        .iter()
        .position(|item| *item == OrderItem::Rest)
        .unwrap_or(order.len());
    let rank = |key: &str| {
        order
            .iter()
            .position(|item| item.as_field() == Some(key))
            .unwrap_or(rest_rank)
    };

    let mut pairs: Vec<(String, MetaValue)> = merged.into_iter().collect();
    pairs.sort_by_key(|(key, _)| rank(key));
    pairs
}

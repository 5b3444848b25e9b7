//! Rendered metablock entries and rule diagnostics.

use serde::{Deserialize, Serialize};

/// One metablock line's content: a key plus zero or more tail values.
///
/// Examples: `name` / `["MyScript"]`, `resource` / `["csv", "https://…"]`,
/// `noframes` / `[]`. Multilingual entries carry the language tag in the
/// key itself (`name:zh-TW`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaEntry {
    pub key: String,
    pub tail: Vec<String>,
}

impl MetaEntry {
    pub fn new(key: impl Into<String>, tail: Vec<String>) -> Self {
        Self {
            key: key.into(),
            tail,
        }
    }

    /// A key-only entry (flag fields such as `noframes`).
    pub fn unary(key: impl Into<String>) -> Self {
        Self::new(key, Vec::new())
    }

    /// A key/value entry.
    pub fn pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, vec![value.into()])
    }

    /// A key/sub-key/value entry (resource lines).
    pub fn triple(
        key: impl Into<String>,
        sub: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(key, vec![sub.into(), value.into()])
    }
}

/// A validation report produced by a field rule.
///
/// Rules never decide what happens on failure; they describe it and the
/// pipeline applies the resolved error level at a single aggregation
/// point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Meta key the report is about.
    pub key: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// The result of applying one field rule to one raw value.
///
/// A failed rule returns no entries plus at least one diagnostic. Rules
/// with advisory format checks may return entries *and* diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutput {
    pub entries: Vec<MetaEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RuleOutput {
    /// A successful output with no diagnostics.
    pub fn entries(entries: Vec<MetaEntry>) -> Self {
        Self {
            entries,
            diagnostics: Vec::new(),
        }
    }

    /// A failed output: nothing emitted, one diagnostic.
    pub fn failure(diagnostic: Diagnostic) -> Self {
        Self {
            entries: Vec::new(),
            diagnostics: vec![diagnostic],
        }
    }

    /// Merge another output into this one, keeping entry order.
    pub fn extend(&mut self, other: RuleOutput) {
        self.entries.extend(other.entries);
        self.diagnostics.extend(other.diagnostics);
    }
}

//! The capability catalog: which meta keys each script manager
//! recognizes, and which rule shape governs each key.
//!
//! Three disjoint tables whose union is the full catalog. Table order is
//! significant: it is the first-seen order used when supported key sets
//! are unioned and deduplicated.

use metablock_model::ScriptManager;

use crate::fields::FieldKind;

/// Legal values for `run-at`.
pub const RUN_AT_VALUES: &[&str] = &[
    "document-end",
    "document-start",
    "document-idle",
    "document-body",
    "context-menu",
];

/// Legal values for Violentmonkey's `inject-into`.
pub const INJECT_INTO_VALUES: &[&str] = &["page", "content", "auto"];

/// Legal values for Tampermonkey's `nocompat`.
pub const NOCOMPAT_VALUES: &[&str] = &["Chrome", "chrome"];

/// Built-in default ordering, spliced in wherever a user order contains
/// the rest marker (the nested `...` keeps unlisted keys in the middle).
pub const DEFAULT_ORDER: &[&str] = &["name", "description", "namespace", "...", "grant"];

/// Keys every script manager understands.
pub const BASELINE_FIELDS: &[(&str, FieldKind)] = &[
    ("name", FieldKind::Multilingual),
    ("namespace", FieldKind::BinaryString),
    ("description", FieldKind::Multilingual),
    ("version", FieldKind::BinaryVersion),
    ("match", FieldKind::BinaryMatchPatternArray),
    ("include", FieldKind::BinaryGlobUriArray),
    ("exclude", FieldKind::BinaryGlobUriArray),
    ("icon", FieldKind::BinaryUri),
    ("require", FieldKind::BinaryUriArray),
    ("run-at", FieldKind::BinaryEnum(RUN_AT_VALUES)),
    ("resource", FieldKind::TernaryUri),
    ("noframes", FieldKind::Unary),
    ("grant", FieldKind::Grant),
    ("author", FieldKind::BinaryString),
    // Greasy Fork listing keys
    ("updateURL", FieldKind::BinaryUri),
    ("installURL", FieldKind::BinaryUri),
    ("downloadURL", FieldKind::BinaryUri),
    ("license", FieldKind::BinaryString),
    ("supportURL", FieldKind::BinaryUri),
    ("contributionURL", FieldKind::BinaryUri),
    ("contributionAmount", FieldKind::BinaryString),
    ("compatible", FieldKind::BinaryStringArray),
    ("incompatible", FieldKind::BinaryStringArray),
    ("antifeature", FieldKind::Multilingual),
];

/// Tampermonkey-only keys.
pub const TAMPERMONKEY_FIELDS: &[(&str, FieldKind)] = &[
    // Homepage variants shown on the options page; a @namespace starting
    // with http:// doubles as this.
    ("homepage", FieldKind::BinaryUri),
    ("homepageURL", FieldKind::BinaryUri),
    ("website", FieldKind::BinaryUri),
    ("source", FieldKind::BinaryUri),
    // Icon URL variants
    ("defaulticon", FieldKind::BinaryUri),
    ("icon64", FieldKind::BinaryUri),
    ("iconURL", FieldKind::BinaryUri),
    ("icon64URL", FieldKind::BinaryUri),
    ("connect", FieldKind::BinaryConnectPattern),
    ("nocompat", FieldKind::BinaryEnum(NOCOMPAT_VALUES)),
];

/// Violentmonkey-only keys.
pub const VIOLENTMONKEY_FIELDS: &[(&str, FieldKind)] = &[
    ("exclude-match", FieldKind::BinaryMatchPatternArray),
    ("inject-into", FieldKind::BinaryEnum(INJECT_INTO_VALUES)),
];

/// Look up the rule shape for a meta key across all three tables.
pub fn lookup_rule(key: &str) -> Option<FieldKind> {
    BASELINE_FIELDS
        .iter()
        .chain(TAMPERMONKEY_FIELDS)
        .chain(VIOLENTMONKEY_FIELDS)
        .find(|(name, _)| *name == key)
        .map(|(_, kind)| *kind)
}

/// The meta keys one script manager supports, in catalog order.
pub fn supported_keys(manager: ScriptManager) -> Vec<&'static str> {
    let tables: &[&[(&str, FieldKind)]] = match manager {
        ScriptManager::Tampermonkey => &[BASELINE_FIELDS, TAMPERMONKEY_FIELDS],
        ScriptManager::Greasemonkey3
        | ScriptManager::Greasemonkey4
        | ScriptManager::Compatible => &[BASELINE_FIELDS],
        ScriptManager::Violentmonkey => &[BASELINE_FIELDS, VIOLENTMONKEY_FIELDS],
        ScriptManager::All => &[BASELINE_FIELDS, TAMPERMONKEY_FIELDS, VIOLENTMONKEY_FIELDS],
    };
    tables
        .iter()
        .flat_map(|table| table.iter().map(|(name, _)| *name))
        .collect()
}

/// Union of the supported key sets of several managers, deduplicated
/// preserving first-seen order.
pub fn supported_keys_for(managers: &[ScriptManager]) -> Vec<&'static str> {
    let mut keys = Vec::new();
    for manager in managers {
        for key in supported_keys(*manager) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keys_are_unique() {
        let all = supported_keys(ScriptManager::All);
        let mut seen = std::collections::BTreeSet::new();
        for key in &all {
            assert!(seen.insert(*key), "duplicate catalog key: {key}");
        }
        assert_eq!(all.len(), 36);
    }

    #[test]
    fn manager_field_sets() {
        let baseline = supported_keys(ScriptManager::Compatible);
        assert_eq!(baseline.len(), 24);
        assert!(baseline.contains(&"grant"));
        assert!(!baseline.contains(&"connect"));
        assert!(!baseline.contains(&"inject-into"));

        let tm = supported_keys(ScriptManager::Tampermonkey);
        assert!(tm.contains(&"connect"));
        assert!(!tm.contains(&"exclude-match"));

        let vm = supported_keys(ScriptManager::Violentmonkey);
        assert!(vm.contains(&"exclude-match"));
        assert!(!vm.contains(&"nocompat"));

        assert_eq!(
            supported_keys(ScriptManager::Greasemonkey3),
            supported_keys(ScriptManager::Greasemonkey4)
        );
    }

    #[test]
    fn union_dedups_preserving_first_seen() {
        let keys = supported_keys_for(&[
            ScriptManager::Violentmonkey,
            ScriptManager::Tampermonkey,
        ]);
        // Baseline once, then VM extras, then TM extras.
        assert_eq!(keys.iter().filter(|k| **k == "name").count(), 1);
        let vm_pos = keys.iter().position(|k| *k == "exclude-match").unwrap();
        let tm_pos = keys.iter().position(|k| *k == "connect").unwrap();
        assert!(vm_pos < tm_pos);
    }

    #[test]
    fn rule_lookup() {
        assert!(matches!(lookup_rule("name"), Some(FieldKind::Multilingual)));
        assert!(matches!(lookup_rule("grant"), Some(FieldKind::Grant)));
        assert!(matches!(
            lookup_rule("run-at"),
            Some(FieldKind::BinaryEnum(_))
        ));
        // Scalar rule, not the array shape with its match-pattern
        // fall-through.
        assert!(matches!(
            lookup_rule("connect"),
            Some(FieldKind::BinaryConnectPattern)
        ));
        assert!(lookup_rule("bogus").is_none());
    }
}

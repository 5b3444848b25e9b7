pub mod catalog;
pub mod fields;
pub mod validators;
pub mod version;

pub use catalog::{
    BASELINE_FIELDS, DEFAULT_ORDER, TAMPERMONKEY_FIELDS, VIOLENTMONKEY_FIELDS, lookup_rule,
    supported_keys, supported_keys_for,
};
pub use fields::FieldKind;

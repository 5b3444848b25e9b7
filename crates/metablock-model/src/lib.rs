pub mod entry;
pub mod enums;
pub mod error;
pub mod value;

pub use entry::{Diagnostic, MetaEntry, RuleOutput};
pub use enums::{ErrorLevel, OrderItem, REST_MARKER, ScriptManager};
pub use error::{MetablockError, Result};
pub use value::{MetaSource, MetaValue};

//! CLI library components for the metablock tool.

pub mod logging;

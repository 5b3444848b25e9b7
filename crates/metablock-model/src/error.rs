use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by metablock generation.
///
/// The first three variants are hard configuration errors: they are always
/// fatal and are raised before (or regardless of) any error-level policy.
/// `Validation` and `UnknownMetaKey` are only raised when the resolved
/// error level is `Error`.
#[derive(Debug, Error)]
pub enum MetablockError {
    #[error("unknown script manager: {name}")]
    UnknownScriptManager { name: String },

    #[error("override must be an object mapping meta keys to values")]
    InvalidOverride,

    #[error("unsupported metadata file format: {extension:?} ({path:?})")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("invalid meta value for {key}: {message}")]
    Validation { key: String, message: String },

    #[error("unknown meta key: {key}")]
    UnknownMetaKey { key: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MetablockError>;

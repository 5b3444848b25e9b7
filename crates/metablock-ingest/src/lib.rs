//! Metadata source file loading.
//!
//! Supported formats: `.json` and `.json5` (both parsed as JSON5, a
//! superset of JSON), `.yaml` and `.yml`. Any other extension is a hard
//! configuration error. Read and parse failures are not: they are logged
//! and degrade to `None`, leaving the caller to decide how to treat a
//! missing source.

use std::fs;
use std::path::Path;

use tracing::error;

use metablock_model::{MetaSource, MetablockError, Result};

/// Load and parse a metadata source file.
///
/// # Errors
///
/// Returns [`MetablockError::UnsupportedFormat`] for unrecognized file
/// extensions. All other failures yield `Ok(None)`.
pub fn load_meta_file(path: &Path) -> Result<Option<MetaSource>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    match extension {
        "json" | "json5" => Ok(load_json5(path)),
        "yaml" | "yml" => Ok(load_yaml(path)),
        other => Err(MetablockError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: format!(".{other}"),
        }),
    }
}

fn read_source(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(source) => {
            error!(path = %path.display(), %source, "failed to read metadata file");
            None
        }
    }
}

fn load_json5(path: &Path) -> Option<MetaSource> {
    let content = read_source(path)?;
    match json5::from_str(&content) {
        Ok(source) => Some(source),
        Err(source) => {
            error!(path = %path.display(), %source, "failed to parse metadata file");
            None
        }
    }
}

fn load_yaml(path: &Path) -> Option<MetaSource> {
    let content = read_source(path)?;
    match serde_yaml::from_str(&content) {
        Ok(source) => Some(source),
        Err(source) => {
            error!(path = %path.display(), %source, "failed to parse metadata file");
            None
        }
    }
}

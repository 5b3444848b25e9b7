//! Metablock generation core: options resolution, transform pipeline,
//! and the aligned-block renderer.

pub mod attach;
pub mod options;
pub mod render;
pub mod transform;

pub use attach::{attach_block, offset_mappings, prepended_lines};
pub use options::{
    ApplyPattern, MetablockConfig, OneOrMany, OutputOptions, ResolvedOptions, TransformOptions,
    resolve_options,
};
pub use render::{BLOCK_FOOTER, BLOCK_HEADER, render};
pub use transform::{TransformResult, transform};

use metablock_model::{MetaSource, Result};

/// Resolve options, run the transform, and render in one step.
///
/// # Errors
///
/// Hard configuration errors always propagate; validation failures only
/// under the `error` level.
pub fn generate(source: &MetaSource, config: &MetablockConfig) -> Result<String> {
    let resolved = resolve_options(config)?;
    let result = transform(source, &resolved.transform)?;
    Ok(render(&result.entries))
}

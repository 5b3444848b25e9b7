//! Attaching a rendered metablock to a build artifact.
//!
//! The block is prepended with a trailing newline; when the artifact has
//! a sourcemap, its `mappings` string gets one leading semicolon per
//! prepended line so generated line numbers stay aligned.

/// Prepend the rendered block to artifact code.
pub fn attach_block(block: &str, code: &str) -> String {
    format!("{block}\n{code}")
}

/// Number of lines [`attach_block`] prepends for the given block.
pub fn prepended_lines(block: &str) -> usize {
    block.lines().count()
}

/// Shift a sourcemap `mappings` string down by the block's line count.
pub fn offset_mappings(block: &str, mappings: &str) -> String {
    let mut shifted = ";".repeat(prepended_lines(block));
    shifted.push_str(mappings);
    shifted
}

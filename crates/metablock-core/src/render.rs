//! Deterministic text rendering of an ordered entry list into the
//! aligned `==UserScript==` comment block.
//!
//! Rendering never reorders entries; it only pads keys so that values
//! line up per alignment bucket.

use metablock_model::MetaEntry;

pub const BLOCK_HEADER: &str = "// ==UserScript==";
pub const BLOCK_FOOTER: &str = "// ==/UserScript==";

/// Alignment buckets: `name`/`name:*` and `description`/`description:*`
/// get their own columns only when localized variants widen them beyond
/// the bare key; otherwise they collapse into the shared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Name,
    Description,
    Other,
}

fn bucket_of(key: &str) -> Bucket {
    if key == "name" || key.starts_with("name:") {
        Bucket::Name
    } else if key == "description" || key.starts_with("description:") {
        Bucket::Description
    } else {
        Bucket::Other
    }
}

/// Per-bucket key padding widths for one entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Widths {
    name: usize,
    description: usize,
    other: usize,
}

fn compute_widths(entries: &[MetaEntry]) -> Widths {
    let mut name = 0;
    let mut description = 0;
    let mut other = 0;
    for entry in entries {
        let len = entry.key.len();
        match bucket_of(&entry.key) {
            Bucket::Name => name = name.max(len),
            Bucket::Description => description = description.max(len),
            Bucket::Other => other = other.max(len),
        }
    }

    // A bucket whose widest key is the bare word carries no localized
    // variants and shares the common column instead of its own.
    let name_collapses = name == "name".len();
    let description_collapses = description == "description".len();
    match (name_collapses, description_collapses) {
        (true, true) => {
            let shared = name.max(description).max(other);
            Widths {
                name: shared,
                description: shared,
                other: shared,
            }
        }
        (true, false) => {
            let shared = name.max(other);
            Widths {
                name: shared,
                description,
                other: shared,
            }
        }
        (false, true) => {
            let shared = description.max(other);
            Widths {
                name,
                description: shared,
                other: shared,
            }
        }
        (false, false) => Widths {
            name,
            description,
            other,
        },
    }
}

/// Render the entry list into the final metablock text (no trailing
/// newline; the attach step appends one).
pub fn render(entries: &[MetaEntry]) -> String {
    let widths = compute_widths(entries);

    let mut lines = Vec::with_capacity(entries.len() + 2);
    lines.push(BLOCK_HEADER.to_string());
    for entry in entries {
        let width = match bucket_of(&entry.key) {
            Bucket::Name => widths.name,
            Bucket::Description => widths.description,
            Bucket::Other => widths.other,
        };
        let line = format!("// @{:<width$} {}", entry.key, entry.tail.join(" "));
        lines.push(line.trim_end().to_string());
    }
    lines.push(BLOCK_FOOTER.to_string());
    lines.join("\n")
}

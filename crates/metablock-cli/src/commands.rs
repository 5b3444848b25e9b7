use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info, warn};

use metablock_core::{
    MetablockConfig, OneOrMany, attach_block, offset_mappings, render, resolve_options, transform,
};
use metablock_ingest::load_meta_file;
use metablock_model::{ErrorLevel, MetaSource, MetaValue, ScriptManager};
use metablock_rules::{BASELINE_FIELDS, TAMPERMONKEY_FIELDS, VIOLENTMONKEY_FIELDS, supported_keys};

use crate::cli::{AttachArgs, ErrorLevelArg, KeysArgs, MetaArgs, RenderArgs};

pub fn run_keys(args: &KeysArgs) -> Result<()> {
    let manager: ScriptManager = args.manager.parse()?;
    let keys = supported_keys(manager);

    let mut table = Table::new();
    table.set_header(vec!["Key", "Origin"]);
    for key in keys {
        table.add_row(vec![key, origin_of(key)]);
    }
    println!("{table}");
    Ok(())
}

fn origin_of(key: &str) -> &'static str {
    if TAMPERMONKEY_FIELDS.iter().any(|(name, _)| *name == key) {
        "tampermonkey"
    } else if VIOLENTMONKEY_FIELDS.iter().any(|(name, _)| *name == key) {
        "violentmonkey"
    } else {
        debug_assert!(BASELINE_FIELDS.iter().any(|(name, _)| *name == key));
        "baseline"
    }
}

pub fn run_render(args: &RenderArgs) -> Result<()> {
    let config = build_config(&args.meta, &[])?;
    let source = load_source(&config)?;
    let resolved = resolve_options(&config)?;
    let result = transform(&source, &resolved.transform)?;
    println!("{}", render(&result.entries));
    Ok(())
}

pub fn run_attach(args: &AttachArgs) -> Result<()> {
    let config = build_config(&args.meta, &args.apply_to)?;
    let source = load_source(&config)?;
    let resolved = resolve_options(&config)?;
    let result = transform(&source, &resolved.transform)?;
    let block = render(&result.entries);

    let mut touched = 0usize;
    for artifact in &args.artifacts {
        let name = artifact
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        if !resolved.output.applies_to(name) {
            debug!(artifact = %artifact.display(), "skipped: no apply pattern matches");
            continue;
        }

        let code = fs::read_to_string(artifact)
            .with_context(|| format!("read artifact {}", artifact.display()))?;
        fs::write(artifact, attach_block(&block, &code))
            .with_context(|| format!("write artifact {}", artifact.display()))?;
        info!(artifact = %artifact.display(), "metablock attached");
        touched += 1;

        if args.sourcemap {
            shift_sourcemap(artifact, &block)?;
        }
    }
    info!(touched, total = args.artifacts.len(), "attach complete");
    Ok(())
}

/// Shift the artifact's sibling `.map` file down by the prepended lines.
/// A missing map file is fine; a malformed one is not.
fn shift_sourcemap(artifact: &Path, block: &str) -> Result<()> {
    let mut map_os = artifact.as_os_str().to_os_string();
    map_os.push(".map");
    let map_path = PathBuf::from(map_os);
    if !map_path.exists() {
        debug!(map = %map_path.display(), "no sourcemap to shift");
        return Ok(());
    }

    let content = fs::read_to_string(&map_path)
        .with_context(|| format!("read sourcemap {}", map_path.display()))?;
    let mut map: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("parse sourcemap {}", map_path.display()))?;
    let Some(mappings) = map.get("mappings").and_then(|m| m.as_str()) else {
        warn!(map = %map_path.display(), "sourcemap has no mappings string");
        return Ok(());
    };
    map["mappings"] = serde_json::Value::String(offset_mappings(block, mappings));
    fs::write(&map_path, serde_json::to_string(&map)?)
        .with_context(|| format!("write sourcemap {}", map_path.display()))?;
    info!(map = %map_path.display(), "sourcemap shifted");
    Ok(())
}

fn build_config(meta: &MetaArgs, apply_to: &[String]) -> Result<MetablockConfig> {
    let override_map = meta
        .override_json
        .as_deref()
        .map(|json| serde_json::from_str::<MetaValue>(json).context("parse --override JSON"))
        .transpose()?;

    Ok(MetablockConfig {
        file: meta.meta.clone(),
        order: meta.order.clone(),
        error_level: meta.error_level.map(|level| match level {
            ErrorLevelArg::Off => ErrorLevel::Off,
            ErrorLevelArg::Warn => ErrorLevel::Warn,
            ErrorLevelArg::Error => ErrorLevel::Error,
        }),
        manager: if meta.manager.is_empty() {
            None
        } else {
            Some(OneOrMany::Many(meta.manager.clone()))
        },
        override_map,
        apply_to: if apply_to.is_empty() {
            None
        } else {
            Some(OneOrMany::Many(apply_to.to_vec()))
        },
    })
}

fn load_source(config: &MetablockConfig) -> Result<MetaSource> {
    let Some(path) = &config.file else {
        return Ok(MetaSource::new());
    };
    match load_meta_file(path)? {
        Some(source) => Ok(source),
        None => {
            warn!(path = %path.display(), "metadata source unavailable, continuing with empty source");
            Ok(MetaSource::new())
        }
    }
}

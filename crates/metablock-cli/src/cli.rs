//! CLI argument definitions for the metablock tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "metablock",
    version,
    about = "Generate and attach userscript metadata headers",
    long_about = "Generate the ==UserScript== metadata block from a metadata\n\
                  source (JSON, JSON5 or YAML), validated against the selected\n\
                  script manager's supported keys, and prepend it to bundled\n\
                  userscript artifacts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Prepend the metablock to matching build artifacts in place.
    Attach(AttachArgs),

    /// Render the metablock to stdout.
    Render(RenderArgs),

    /// List the meta keys a script manager supports.
    Keys(KeysArgs),
}

#[derive(Parser)]
pub struct AttachArgs {
    /// Build artifacts to consider (only names matching an apply pattern
    /// are touched).
    #[arg(value_name = "ARTIFACT", required = true)]
    pub artifacts: Vec<PathBuf>,

    #[command(flatten)]
    pub meta: MetaArgs,

    /// Artifact name pattern (substring, or /regex/). Repeatable.
    #[arg(long = "apply-to", value_name = "PATTERN")]
    pub apply_to: Vec<String>,

    /// Also shift the artifact's sibling .map file by the prepended lines.
    #[arg(long = "sourcemap")]
    pub sourcemap: bool,
}

#[derive(Parser)]
pub struct RenderArgs {
    #[command(flatten)]
    pub meta: MetaArgs,
}

#[derive(Parser)]
pub struct KeysArgs {
    /// Script manager alias (tampermonkey, gm3, gm4, violentmonkey,
    /// compatible, all).
    #[arg(long = "manager", value_name = "MANAGER", default_value = "all")]
    pub manager: String,
}

/// Options shared by block-producing commands.
#[derive(Parser)]
pub struct MetaArgs {
    /// Metadata source file (.json, .json5, .yaml, .yml).
    #[arg(long = "meta", value_name = "PATH")]
    pub meta: Option<PathBuf>,

    /// Target script manager alias. Repeatable; field sets are unioned.
    #[arg(long = "manager", value_name = "MANAGER")]
    pub manager: Vec<String>,

    /// Field ordering; may include the "..." rest marker. Repeatable.
    #[arg(long = "order", value_name = "KEY")]
    pub order: Vec<String>,

    /// Governance for validation failures and unknown keys.
    #[arg(long = "error-level", value_enum)]
    pub error_level: Option<ErrorLevelArg>,

    /// Override metadata as an inline JSON object, merged over the source.
    #[arg(long = "override", value_name = "JSON")]
    pub override_json: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ErrorLevelArg {
    Off,
    Warn,
    Error,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

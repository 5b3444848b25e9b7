//! Type-safe enumerations for metablock configuration.
//!
//! Script manager aliases and error levels arrive as strings from user
//! configuration; these enums give them a closed, compile-time checked
//! form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetablockError;

/// A userscript manager runtime, each with its own supported meta-key
/// subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptManager {
    Tampermonkey,
    Greasemonkey3,
    Greasemonkey4,
    Violentmonkey,
    /// Intersection semantics: only keys every manager understands.
    Compatible,
    /// Union of every manager's keys.
    All,
}

impl ScriptManager {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptManager::Tampermonkey => "tampermonkey",
            ScriptManager::Greasemonkey3 => "greasemonkey3",
            ScriptManager::Greasemonkey4 => "greasemonkey4",
            ScriptManager::Violentmonkey => "violentmonkey",
            ScriptManager::Compatible => "compatible",
            ScriptManager::All => "all",
        }
    }
}

impl fmt::Display for ScriptManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScriptManager {
    type Err = MetablockError;

    /// Resolve a case-insensitive, whitespace-trimmed alias.
    ///
    /// An unknown alias is a hard configuration error, independent of the
    /// error level (the level is not even resolved yet at that point).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tm" | "tampermonkey" => Ok(ScriptManager::Tampermonkey),
            "gm3" | "greasemonkey3" => Ok(ScriptManager::Greasemonkey3),
            "gm" | "gm4" | "greasemonkey" | "greasemonkey4" => Ok(ScriptManager::Greasemonkey4),
            "vm" | "violentmonkey" => Ok(ScriptManager::Violentmonkey),
            "compatible" => Ok(ScriptManager::Compatible),
            "all" => Ok(ScriptManager::All),
            other => Err(MetablockError::UnknownScriptManager {
                name: other.to_string(),
            }),
        }
    }
}

/// Governance for validation failures and unknown meta keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLevel {
    /// Suppress entirely: no entry, no report.
    Off,
    /// Report and continue with a best-effort metablock.
    #[default]
    Warn,
    /// Fail fast, naming the offending field.
    Error,
}

impl ErrorLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorLevel::Off => "off",
            ErrorLevel::Warn => "warn",
            ErrorLevel::Error => "error",
        }
    }
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ErrorLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(ErrorLevel::Off),
            "warn" => Ok(ErrorLevel::Warn),
            "error" => Ok(ErrorLevel::Error),
            other => Err(format!("unknown error level: {other}")),
        }
    }
}

/// Sentinel token users write in an ordering list to mean "everything
/// else here".
pub const REST_MARKER: &str = "...";

/// One element of a resolved ordering list.
///
/// The `"..."` sentinel from user configuration is parsed into an explicit
/// variant once, during options resolution, so the pipeline never string-
/// matches on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderItem {
    Field(String),
    Rest,
}

impl OrderItem {
    pub fn parse(token: &str) -> Self {
        if token == REST_MARKER {
            OrderItem::Rest
        } else {
            OrderItem::Field(token.to_string())
        }
    }

    pub fn as_field(&self) -> Option<&str> {
        match self {
            OrderItem::Field(name) => Some(name),
            OrderItem::Rest => None,
        }
    }
}

impl fmt::Display for OrderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderItem::Field(name) => write!(f, "{name}"),
            OrderItem::Rest => write!(f, "{REST_MARKER}"),
        }
    }
}

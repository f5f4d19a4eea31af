//! Suggestion policy configuration values.
//!
//! # Responsibility
//! - Define the enumerated tag/template policy modes consumed by the engine.
//! - Normalize externally supplied configuration strings leniently.
//!
//! # Invariants
//! - Malformed configuration values resolve to `suggest_only`, never to an
//!   error: a broken settings store must not disable classification.

use serde::{Deserialize, Serialize};

/// How tag scoring results are applied to the memo draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagPolicy {
    /// Skip tag scoring entirely.
    Off,
    /// Produce suggestions; adoption requires explicit user action.
    #[default]
    SuggestOnly,
    /// Write scoring results directly into the memo's adopted tag set.
    AutoAdopt,
}

/// How template classification results are applied to the memo draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplatePolicy {
    /// Skip template scoring entirely.
    Off,
    /// Surface a dismissible suggestion; switching requires user action.
    #[default]
    SuggestOnly,
    /// A confident classification switches the destination directly.
    AutoSwitch,
}

impl TagPolicy {
    /// Parses an externally supplied configuration value.
    ///
    /// Unknown or malformed input resolves to the documented default.
    pub fn from_config_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "off" => Self::Off,
            "auto_adopt" | "autoadopt" => Self::AutoAdopt,
            _ => Self::SuggestOnly,
        }
    }
}

impl TemplatePolicy {
    /// Parses an externally supplied configuration value.
    ///
    /// Unknown or malformed input resolves to the documented default.
    pub fn from_config_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "off" => Self::Off,
            "auto_switch" | "autoswitch" => Self::AutoSwitch,
            _ => Self::SuggestOnly,
        }
    }
}

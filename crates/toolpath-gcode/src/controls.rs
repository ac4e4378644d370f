//! Caller-facing controls for one G-code run.

use serde::{Deserialize, Serialize};

use crate::settings::SettingsPatch;

/// Controls for a single generation run: which device profile to start from,
/// the user's overrides, and optional output persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcodeControls {
    /// Device profile name, resolved against the catalog.
    pub printer: String,
    /// User overrides, applied with the highest precedence.
    #[serde(default)]
    pub overrides: SettingsPatch,
    /// File stem to save the output under; `None` skips persistence.
    #[serde(default)]
    pub save_as: Option<String>,
    /// Append a timestamp suffix to the saved filename.
    #[serde(default = "default_include_date")]
    pub include_date: bool,
}

fn default_include_date() -> bool {
    true
}

impl Default for GcodeControls {
    fn default() -> Self {
        Self {
            printer: "generic".into(),
            overrides: SettingsPatch::default(),
            save_as: None,
            include_date: true,
        }
    }
}

impl GcodeControls {
    /// Controls for the named device profile with no overrides.
    pub fn for_printer(printer: impl Into<String>) -> Self {
        Self {
            printer: printer.into(),
            ..Self::default()
        }
    }
}

//! Device profile catalog.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::controls::GcodeControls;
use crate::error::{GcodeError, Result};
use crate::settings::{Settings, SettingsPatch};

/// Read-only table of named device profiles.
///
/// The catalog is explicit state passed into generation, not ambient
/// configuration, so runs are reproducible from their inputs alone. Each
/// profile is a [`SettingsPatch`] layered between the built-in defaults and
/// the user's overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceCatalog {
    profiles: HashMap<String, SettingsPatch>,
}

impl DeviceCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in single-tool profiles.
    ///
    /// `generic` primes with a plain travel move and uses relative
    /// extrusion; `custom` skips priming and uses absolute extrusion,
    /// leaving everything else to user overrides.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert(
            "generic",
            SettingsPatch {
                primer: Some("travel".into()),
                ..SettingsPatch::default()
            },
        );
        catalog.insert(
            "custom",
            SettingsPatch {
                primer: Some("no_primer".into()),
                relative_extrusion: Some(false),
                ..SettingsPatch::default()
            },
        );
        catalog
    }

    /// Add or replace a profile.
    pub fn insert(&mut self, name: impl Into<String>, profile: SettingsPatch) {
        self.profiles.insert(name.into(), profile);
    }

    /// Look up a profile by name.
    pub fn get(&self, name: &str) -> Option<&SettingsPatch> {
        self.profiles.get(name)
    }

    /// Merge defaults, the named profile and the user's overrides into one
    /// effective [`Settings`].
    ///
    /// Fails fast on an unknown profile name, before any machine state
    /// exists.
    pub fn resolve(&self, controls: &GcodeControls) -> Result<Settings> {
        let profile = self
            .get(&controls.printer)
            .ok_or_else(|| GcodeError::UnknownPrinter(controls.printer.clone()))?;
        let mut settings = Settings::default();
        profile.apply_to(&mut settings);
        controls.overrides.apply_to(&mut settings);
        log::debug!(
            "resolved device profile '{}' (primer: {:?})",
            controls.printer,
            settings.primer
        );
        Ok(settings)
    }
}

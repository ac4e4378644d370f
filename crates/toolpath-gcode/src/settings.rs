//! Effective configuration for a G-code run.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use toolpath::{AreaModel, ExtrusionUnits, TravelFormat};

/// Effective configuration: the flat parameter table a run is initialized
/// from.
///
/// Built once by merging built-in defaults, a device profile and user
/// overrides (in that precedence order), then copied into the machine state
/// and never consulted again, so a `Settings` value is safely reusable
/// across independent runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Feed rate for extruding moves, units per minute.
    pub print_speed: f64,
    /// Feed rate for travel moves, units per minute.
    pub travel_speed: f64,
    /// Cross-section model for extrusion volume calculation.
    pub area_model: AreaModel,
    /// Width of extruded material, mm.
    pub extrusion_width: f64,
    /// Height of extruded material, mm.
    pub extrusion_height: f64,
    /// Units for emitted extrusion amounts.
    pub e_units: ExtrusionUnits,
    /// Feedstock filament diameter, mm.
    pub dia_feed: f64,
    /// Relative (true) or absolute (false) extrusion addressing.
    pub relative_extrusion: bool,
    /// Retraction distance on extruder-off, E units.
    pub retraction: f64,
    /// Command format for travel moves.
    pub travel_format: TravelFormat,
    /// Named priming routine inserted ahead of the design, if any.
    pub primer: Option<String>,
    /// Persistent printer command table.
    pub printer_command_list: HashMap<String, String>,
    /// Literal preamble text, split on line boundaries at emission.
    pub start_gcode: String,
    /// Literal postamble text, appended as trailing raw-text steps.
    pub end_gcode: String,
}

impl Default for Settings {
    fn default() -> Self {
        let printer_command_list = [
            ("home", "G28 ; home axes"),
            ("retract", "G10 ; retract"),
            ("unretract", "G11 ; unretract"),
            ("absolute_coords", "G90 ; absolute coordinates"),
            ("relative_coords", "G91 ; relative coordinates"),
            ("units_mm", "G21 ; set units to millimeters"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self {
            print_speed: 1000.0,
            travel_speed: 2000.0,
            area_model: AreaModel::Rectangle,
            extrusion_width: 0.4,
            extrusion_height: 0.2,
            e_units: ExtrusionUnits::Mm,
            dia_feed: 1.75,
            relative_extrusion: true,
            retraction: 0.0,
            travel_format: TravelFormat::G0,
            primer: None,
            printer_command_list,
            start_gcode: String::new(),
            end_gcode: String::new(),
        }
    }
}

/// An all-optional overlay of [`Settings`].
///
/// Device profiles and user overrides are both expressed as patches; unset
/// fields leave the lower-precedence value in place. The primer key
/// `"no_primer"` explicitly clears an inherited primer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    /// See [`Settings::print_speed`].
    pub print_speed: Option<f64>,
    /// See [`Settings::travel_speed`].
    pub travel_speed: Option<f64>,
    /// See [`Settings::area_model`].
    pub area_model: Option<AreaModel>,
    /// See [`Settings::extrusion_width`].
    pub extrusion_width: Option<f64>,
    /// See [`Settings::extrusion_height`].
    pub extrusion_height: Option<f64>,
    /// See [`Settings::e_units`].
    pub e_units: Option<ExtrusionUnits>,
    /// See [`Settings::dia_feed`].
    pub dia_feed: Option<f64>,
    /// See [`Settings::relative_extrusion`].
    pub relative_extrusion: Option<bool>,
    /// See [`Settings::retraction`].
    pub retraction: Option<f64>,
    /// See [`Settings::travel_format`].
    pub travel_format: Option<TravelFormat>,
    /// Primer routine name; `"no_primer"` clears any inherited primer.
    pub primer: Option<String>,
    /// Entries merged into the command table (existing keys replaced).
    pub printer_command_list: Option<HashMap<String, String>>,
    /// See [`Settings::start_gcode`].
    pub start_gcode: Option<String>,
    /// See [`Settings::end_gcode`].
    pub end_gcode: Option<String>,
}

impl SettingsPatch {
    /// Apply every set field of this patch onto `settings`.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(v) = self.print_speed {
            settings.print_speed = v;
        }
        if let Some(v) = self.travel_speed {
            settings.travel_speed = v;
        }
        if let Some(v) = self.area_model {
            settings.area_model = v;
        }
        if let Some(v) = self.extrusion_width {
            settings.extrusion_width = v;
        }
        if let Some(v) = self.extrusion_height {
            settings.extrusion_height = v;
        }
        if let Some(v) = self.e_units {
            settings.e_units = v;
        }
        if let Some(v) = self.dia_feed {
            settings.dia_feed = v;
        }
        if let Some(v) = self.relative_extrusion {
            settings.relative_extrusion = v;
        }
        if let Some(v) = self.retraction {
            settings.retraction = v;
        }
        if let Some(v) = self.travel_format {
            settings.travel_format = v;
        }
        if let Some(name) = &self.primer {
            settings.primer = if name == "no_primer" {
                None
            } else {
                Some(name.clone())
            };
        }
        if let Some(commands) = &self.printer_command_list {
            for (k, v) in commands {
                settings
                    .printer_command_list
                    .insert(k.clone(), v.clone());
            }
        }
        if let Some(v) = &self.start_gcode {
            settings.start_gcode = v.clone();
        }
        if let Some(v) = &self.end_gcode {
            settings.end_gcode = v.clone();
        }
    }
}

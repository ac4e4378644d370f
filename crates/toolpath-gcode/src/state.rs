//! Mutable machine state for a single translation run.

use std::collections::HashMap;
use std::f64::consts::PI;

use toolpath::{ExtrusionGeometry, ExtrusionUnits, Point, TravelFormat};

use crate::settings::Settings;

/// Extruder-side machine state: flow, addressing and volume accounting.
#[derive(Debug, Clone)]
pub struct ExtruderState {
    /// Material flow on/off.
    pub on: bool,
    /// Units for emitted extrusion amounts.
    pub units: ExtrusionUnits,
    /// Feedstock filament diameter, mm.
    pub dia_feed: f64,
    /// Relative (true) or absolute (false) addressing.
    pub relative: bool,
    /// Retraction distance on flow-off, E units.
    pub retraction: f64,
    /// Distance of an outstanding retract, restored on the next flow-on.
    pub pending_restore: Option<f64>,
    /// Command format for travel moves.
    pub travel_format: TravelFormat,
    /// Factor converting extruded volume into E units.
    pub volume_to_e: f64,
    /// Cumulative extruded volume for the whole run, mm³.
    pub total_volume: f64,
    /// Reference volume the next emitted amount is expressed against.
    pub total_volume_ref: f64,
}

impl ExtruderState {
    fn from_settings(settings: &Settings) -> Self {
        let mut state = Self {
            on: false,
            units: settings.e_units,
            dia_feed: settings.dia_feed,
            relative: settings.relative_extrusion,
            retraction: settings.retraction,
            pending_restore: None,
            travel_format: settings.travel_format,
            volume_to_e: 1.0,
            total_volume: 0.0,
            total_volume_ref: 0.0,
        };
        state.update_ratio();
        state
    }

    /// Recompute the volumetric-to-linear conversion factor: 1 for
    /// volumetric units, the reciprocal of the filament cross-sectional area
    /// for linear units.
    pub fn update_ratio(&mut self) {
        self.volume_to_e = match self.units {
            ExtrusionUnits::Mm3 => 1.0,
            ExtrusionUnits::Mm => 1.0 / (PI * (self.dia_feed / 2.0).powi(2)),
        };
    }

    /// Add `volume` to the running total and return the amount to emit.
    ///
    /// The emitted amount is always `total - reference`. Under relative
    /// addressing the reference then advances to the new total, so each
    /// emission is a step delta; under absolute addressing the reference
    /// stays put and emissions are running totals. One routine serves both
    /// conventions without caller branching.
    pub fn consume_volume(&mut self, volume: f64) -> f64 {
        self.total_volume += volume;
        let emitted = self.total_volume - self.total_volume_ref;
        if self.relative {
            self.total_volume_ref = self.total_volume;
        }
        emitted
    }
}

/// Printer-side machine state: feed rates and the command table.
#[derive(Debug, Clone)]
pub struct PrinterState {
    /// Feed rate for extruding moves.
    pub print_speed: f64,
    /// Feed rate for travel moves.
    pub travel_speed: f64,
    /// Last feed rate actually emitted; `None` until the first emission, so
    /// the first move of a run always carries an explicit feed token.
    pub last_feed: Option<f64>,
    /// Persistent printer command table.
    pub command_list: HashMap<String, String>,
}

/// Mutable aggregate of everything the translator tracks across a run.
///
/// Exclusively owned by one translator run; concurrent generation requires
/// one state per run.
#[derive(Debug, Clone)]
pub struct MachineState {
    /// Current position. Axes resolve as moves are processed; once an axis
    /// is set it stays defined for the rest of the run.
    pub position: Point,
    /// Extruder state and volume accounting.
    pub extruder: ExtruderState,
    /// Feed rates and command table.
    pub printer: PrinterState,
    /// Live extrudate cross-section geometry.
    pub geometry: ExtrusionGeometry,
}

impl MachineState {
    /// Build the initial state from an effective configuration. Settings
    /// values are copied in, not referenced afterwards.
    pub fn new(settings: &Settings) -> Self {
        let mut geometry = ExtrusionGeometry {
            area_model: Some(settings.area_model),
            width: Some(settings.extrusion_width),
            height: Some(settings.extrusion_height),
            ..ExtrusionGeometry::default()
        };
        geometry.update_area();
        Self {
            position: Point::default(),
            extruder: ExtruderState::from_settings(settings),
            printer: PrinterState {
                print_speed: settings.print_speed,
                travel_speed: settings.travel_speed,
                last_feed: None,
                command_list: settings.printer_command_list.clone(),
            },
            geometry,
        }
    }
}

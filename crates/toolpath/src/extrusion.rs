//! Extrusion geometry and extruder settings.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{DesignError, Result};

/// Cross-sectional area model for the extrudate.
///
/// The model converts a move's length into deposited material volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaModel {
    /// Rectangular cross-section (width × height).
    #[default]
    Rectangle,
    /// Stadium cross-section: a rectangle capped with semicircular ends.
    Stadium,
    /// Circular cross-section (diameter).
    Circle,
    /// Caller-supplied area; never recomputed.
    Manual,
}

/// Units for emitted extrusion amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExtrusionUnits {
    /// Filament length in millimeters.
    #[default]
    #[serde(rename = "mm")]
    Mm,
    /// Volume in cubic millimeters.
    #[serde(rename = "mm3")]
    Mm3,
}

/// Command format for travel (non-extruding) moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TravelFormat {
    /// Plain `G0` rapid with no extrusion token.
    #[default]
    #[serde(rename = "G0")]
    G0,
    /// `G1` move carrying an explicit zero-extrusion token.
    #[serde(rename = "G1_E0")]
    G1E0,
}

/// Geometric description of the printed extrudate cross-section.
///
/// `area` is a derived, cached value: it is recomputed whenever an input
/// dimension changes, except under [`AreaModel::Manual`] where the caller
/// owns it. As an instruction, any `None` field leaves the corresponding
/// machine-state field unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtrusionGeometry {
    /// How the cross-sectional area is defined.
    pub area_model: Option<AreaModel>,
    /// Width of the printed line (rectangle/stadium models), mm.
    pub width: Option<f64>,
    /// Height of the printed line (rectangle/stadium models), mm.
    pub height: Option<f64>,
    /// Diameter of the printed line (circle model), mm.
    pub diameter: Option<f64>,
    /// Cross-sectional area, mm². Derived for all models except manual.
    pub area: Option<f64>,
}

impl ExtrusionGeometry {
    /// Recompute the cached area for the current model.
    ///
    /// Silently does nothing while the required dimensions are unset; that is
    /// not an error, the area simply stays unavailable. Manual mode never
    /// recomputes.
    pub fn update_area(&mut self) {
        match self.area_model {
            Some(AreaModel::Rectangle) => {
                if let (Some(w), Some(h)) = (self.width, self.height) {
                    self.area = Some(w * h);
                }
            }
            Some(AreaModel::Stadium) => {
                if let (Some(w), Some(h)) = (self.width, self.height) {
                    self.area = Some((w - h) * h + PI * (h / 2.0).powi(2));
                }
            }
            Some(AreaModel::Circle) => {
                if let Some(d) = self.diameter {
                    self.area = Some(PI * (d / 2.0).powi(2));
                }
            }
            Some(AreaModel::Manual) | None => {}
        }
    }

    /// Copy the fields set on `other` onto this geometry.
    pub fn apply(&mut self, other: &ExtrusionGeometry) {
        if let Some(m) = other.area_model {
            self.area_model = Some(m);
        }
        if let Some(w) = other.width {
            self.width = Some(w);
        }
        if let Some(h) = other.height {
            self.height = Some(h);
        }
        if let Some(d) = other.diameter {
            self.diameter = Some(d);
        }
        if let Some(a) = other.area {
            self.area = Some(a);
        }
    }
}

/// Extruder setting instruction.
///
/// Any `None` field leaves the corresponding machine-state field unchanged,
/// so a single-field instruction like `Extruder::turn_off()` only toggles
/// material flow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Extruder {
    /// Material flow on/off.
    pub on: Option<bool>,
    /// Units for emitted extrusion amounts.
    pub units: Option<ExtrusionUnits>,
    /// Feedstock filament diameter, mm.
    pub dia_feed: Option<f64>,
    /// Addressing mode: `true` for relative extrusion amounts, `false` for
    /// absolute running totals. Setting this emits a mode-select command.
    pub relative_gcode: Option<bool>,
    /// Retraction distance applied when toggling flow off (and restored when
    /// toggling back on), in E units.
    pub retraction: Option<f64>,
    /// Command format for travel moves.
    pub travel_format: Option<TravelFormat>,
}

impl Extruder {
    /// Instruction turning material flow on.
    pub fn turn_on() -> Self {
        Self {
            on: Some(true),
            ..Self::default()
        }
    }

    /// Instruction turning material flow off.
    pub fn turn_off() -> Self {
        Self {
            on: Some(false),
            ..Self::default()
        }
    }
}

/// Extrude a fixed volume without moving the nozzle.
///
/// Negative volumes retract material. Useful for priming or de-priming the
/// nozzle between printed regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationaryExtrusion {
    /// Volume of material to extrude, mm³. Negative retracts.
    pub volume: f64,
    /// Feed rate for the extrusion command, units per minute.
    pub speed: f64,
}

impl StationaryExtrusion {
    /// Build a stationary extrusion, rejecting non-positive speeds.
    pub fn new(volume: f64, speed: f64) -> Result<Self> {
        if speed <= 0.0 {
            return Err(DesignError::NonPositiveSpeed(speed));
        }
        Ok(Self { volume, speed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangle_area() {
        let mut geom = ExtrusionGeometry {
            area_model: Some(AreaModel::Rectangle),
            width: Some(0.4),
            height: Some(0.2),
            ..ExtrusionGeometry::default()
        };
        geom.update_area();
        assert_relative_eq!(geom.area.unwrap(), 0.08, max_relative = 1e-12);
    }

    #[test]
    fn test_circle_area() {
        let mut geom = ExtrusionGeometry {
            area_model: Some(AreaModel::Circle),
            diameter: Some(0.4),
            ..ExtrusionGeometry::default()
        };
        geom.update_area();
        assert_relative_eq!(geom.area.unwrap(), PI * 0.04, max_relative = 1e-12);
        assert!((geom.area.unwrap() - 0.12566).abs() < 1e-4);
    }

    #[test]
    fn test_stadium_area() {
        let mut geom = ExtrusionGeometry {
            area_model: Some(AreaModel::Stadium),
            width: Some(0.4),
            height: Some(0.2),
            ..ExtrusionGeometry::default()
        };
        geom.update_area();
        let expected = (0.4 - 0.2) * 0.2 + PI * 0.01;
        assert_relative_eq!(geom.area.unwrap(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_manual_area_is_never_recomputed() {
        let mut geom = ExtrusionGeometry {
            area_model: Some(AreaModel::Manual),
            width: Some(1.0),
            height: Some(1.0),
            area: Some(0.5),
            ..ExtrusionGeometry::default()
        };
        geom.update_area();
        assert_eq!(geom.area, Some(0.5));
    }

    #[test]
    fn test_incomplete_dimensions_skip_recompute() {
        let mut geom = ExtrusionGeometry {
            area_model: Some(AreaModel::Rectangle),
            width: Some(0.4),
            ..ExtrusionGeometry::default()
        };
        geom.update_area();
        assert!(geom.area.is_none());
        // Supplying the missing dimension makes the area available.
        geom.apply(&ExtrusionGeometry {
            height: Some(0.2),
            ..ExtrusionGeometry::default()
        });
        geom.update_area();
        assert!(geom.area.is_some());
    }

    #[test]
    fn test_stationary_extrusion_rejects_bad_speed() {
        assert!(StationaryExtrusion::new(1.0, 0.0).is_err());
        assert!(StationaryExtrusion::new(-2.0, 300.0).is_ok());
    }
}

//! The closed set of design instructions.

use serde::{Deserialize, Serialize};

use crate::extrusion::{Extruder, ExtrusionGeometry, StationaryExtrusion};
use crate::point::Point;
use crate::printer::{
    Buildplate, Fan, GcodeComment, Hotend, ManualGcode, Printer, PrinterCommand,
};

/// A single design instruction.
///
/// The set is closed: the translator dispatches on this enum with one
/// exhaustive match, one render path per variant. Steps are produced by the
/// designer, consumed exactly once, and never mutated by the translator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Step {
    /// Move to a (possibly partially specified) target position.
    Move(Point),
    /// Update feed rates and/or the custom-command table.
    Printer(Printer),
    /// Update extruder state (flow, units, addressing, retraction).
    Extruder(Extruder),
    /// Update the extrudate cross-section geometry.
    ExtrusionGeometry(ExtrusionGeometry),
    /// Extrude a fixed volume without moving.
    StationaryExtrusion(StationaryExtrusion),
    /// Set the part-cooling fan speed.
    Fan(Fan),
    /// Set the hotend temperature.
    Hotend(Hotend),
    /// Set the buildplate temperature.
    Buildplate(Buildplate),
    /// Emit a named entry from the printer command table.
    PrinterCommand(PrinterCommand),
    /// Emit caller-supplied literal text.
    Raw(ManualGcode),
    /// Emit a comment line.
    Comment(GcodeComment),
}

impl From<Point> for Step {
    fn from(p: Point) -> Self {
        Step::Move(p)
    }
}

impl From<Printer> for Step {
    fn from(p: Printer) -> Self {
        Step::Printer(p)
    }
}

impl From<Extruder> for Step {
    fn from(e: Extruder) -> Self {
        Step::Extruder(e)
    }
}

impl From<ExtrusionGeometry> for Step {
    fn from(g: ExtrusionGeometry) -> Self {
        Step::ExtrusionGeometry(g)
    }
}

impl From<StationaryExtrusion> for Step {
    fn from(s: StationaryExtrusion) -> Self {
        Step::StationaryExtrusion(s)
    }
}

impl From<Fan> for Step {
    fn from(f: Fan) -> Self {
        Step::Fan(f)
    }
}

impl From<Hotend> for Step {
    fn from(h: Hotend) -> Self {
        Step::Hotend(h)
    }
}

impl From<Buildplate> for Step {
    fn from(b: Buildplate) -> Self {
        Step::Buildplate(b)
    }
}

impl From<PrinterCommand> for Step {
    fn from(c: PrinterCommand) -> Self {
        Step::PrinterCommand(c)
    }
}

impl From<ManualGcode> for Step {
    fn from(m: ManualGcode) -> Self {
        Step::Raw(m)
    }
}

impl From<GcodeComment> for Step {
    fn from(c: GcodeComment) -> Self {
        Step::Comment(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_serde_round_trip() {
        let step: Step = Point::new(1.0, 2.0, 3.0).into();
        let json = serde_json::to_string(&step).unwrap();
        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(step, back);
    }

    #[test]
    fn test_partial_point_serializes_nulls() {
        let step: Step = Point {
            x: Some(5.0),
            ..Point::default()
        }
        .into();
        let json = serde_json::to_string(&step).unwrap();
        assert_eq!(json, r#"{"Move":{"x":5.0,"y":null,"z":null}}"#);
    }
}

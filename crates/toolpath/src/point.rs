//! Points in 3D space with independently optional axes.

use serde::{Deserialize, Serialize};

/// A point in 3D space.
///
/// Each axis is independently optional: when the point is used as a move
/// target, `None` means "unchanged from the current position". This is an
/// explicit absent state, not a sentinel, so an explicit `0.0` is never
/// confused with "unspecified".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: Option<f64>,
    /// Y coordinate (mm).
    pub y: Option<f64>,
    /// Z coordinate (mm).
    pub z: Option<f64>,
    /// Explicit extrusion amount for the move to this point, in the E units
    /// of the run. A positive value forces an extrusion move regardless of
    /// the extruder on/off state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<f64>,
    /// Raw command override: emitted verbatim instead of a computed move
    /// line. Position is still updated from the defined axes, but no feed or
    /// extrusion bookkeeping is advanced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Point {
    /// A fully-defined point.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            ..Self::default()
        }
    }

    /// A point carrying only a raw command override.
    pub fn raw_line(line: impl Into<String>) -> Self {
        Self {
            raw: Some(line.into()),
            ..Self::default()
        }
    }

    /// Are all three axes defined?
    pub fn is_fully_defined(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.z.is_some()
    }

    /// Distance to `other`, ignoring any axis that is not defined in both
    /// points.
    pub fn distance_forgiving(&self, other: &Point) -> f64 {
        let axis = |a: Option<f64>, b: Option<f64>| match (a, b) {
            (Some(a), Some(b)) => a - b,
            _ => 0.0,
        };
        let dx = axis(self.x, other.x);
        let dy = axis(self.y, other.y);
        let dz = axis(self.z, other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Copy the axes defined on `other` onto this point, leaving the rest
    /// unchanged.
    pub fn inherit_axes(&mut self, other: &Point) {
        if let Some(x) = other.x {
            self.x = Some(x);
        }
        if let Some(y) = other.y {
            self.y = Some(y);
        }
        if let Some(z) = other.z {
            self.z = Some(z);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_defined() {
        assert!(Point::new(1.0, 2.0, 3.0).is_fully_defined());
        let partial = Point {
            x: Some(1.0),
            ..Point::default()
        };
        assert!(!partial.is_fully_defined());
    }

    #[test]
    fn test_distance_ignores_undefined_axes() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point {
            x: Some(3.0),
            y: Some(4.0),
            z: None,
            ..Point::default()
        };
        assert!((a.distance_forgiving(&b) - 5.0).abs() < 1e-12);
        // Undefined on both sides contributes nothing.
        assert!((Point::default().distance_forgiving(&a) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_inherit_axes_keeps_unspecified() {
        let mut pos = Point::new(1.0, 2.0, 3.0);
        let target = Point {
            y: Some(9.0),
            ..Point::default()
        };
        pos.inherit_axes(&target);
        assert_eq!(pos, Point::new(1.0, 9.0, 3.0));
    }

    #[test]
    fn test_explicit_zero_is_not_unspecified() {
        let p = Point {
            x: Some(0.0),
            ..Point::default()
        };
        assert!(p.x.is_some());
        assert!(p.y.is_none());
    }
}

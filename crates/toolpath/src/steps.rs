//! Helpers over step sequences.

use crate::error::{DesignError, Result};
use crate::point::Point;
use crate::step::Step;

/// First move point in `steps`.
///
/// With `fully_defined`, partial points are skipped and only a point with
/// all three axes set qualifies.
pub fn first_point(steps: &[Step], fully_defined: bool) -> Option<&Point> {
    steps.iter().find_map(|step| match step {
        Step::Move(p) if !fully_defined || p.is_fully_defined() => Some(p),
        _ => None,
    })
}

/// Last move point in `steps`, with the same `fully_defined` filter as
/// [`first_point`].
pub fn last_point(steps: &[Step], fully_defined: bool) -> Option<&Point> {
    steps.iter().rev().find_map(|step| match step {
        Step::Move(p) if !fully_defined || p.is_fully_defined() => Some(p),
        _ => None,
    })
}

/// Extract only the move points from a step sequence.
///
/// With `track_xyz`, each returned point inherits any unspecified axis from
/// the previous returned point, so the result describes resolved positions
/// rather than raw targets. Points before the first definition of an axis
/// keep that axis unset.
pub fn points_only(steps: &[Step], track_xyz: bool) -> Vec<Point> {
    let mut points: Vec<Point> = Vec::new();
    for step in steps {
        if let Step::Move(p) = step {
            let mut p = p.clone();
            if track_xyz {
                if let Some(prev) = points.last() {
                    p.x = p.x.or(prev.x);
                    p.y = p.y.or(prev.y);
                    p.z = p.z.or(prev.z);
                }
            }
            points.push(p);
        }
    }
    points
}

/// A new fully-defined point offset from a reference point.
///
/// The reference must have all three axes defined.
pub fn relative_point(reference: &Point, dx: f64, dy: f64, dz: f64) -> Result<Point> {
    match (reference.x, reference.y, reference.z) {
        (Some(x), Some(y), Some(z)) => Ok(Point::new(x + dx, y + dy, z + dz)),
        _ => Err(DesignError::UnderdefinedReference),
    }
}

/// Flatten groups of steps into one sequence.
pub fn flatten<I>(groups: I) -> Vec<Step>
where
    I: IntoIterator<Item = Vec<Step>>,
{
    groups.into_iter().flatten().collect()
}

/// Evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count < 2 {
        return vec![start];
    }
    (0..count)
        .map(|i| start + (end - start) * i as f64 / (count - 1) as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extrusion::Extruder;

    #[test]
    fn test_first_point_skips_partial_when_fully_defined() {
        let steps: Vec<Step> = vec![
            Extruder::turn_on().into(),
            Point {
                x: Some(5.0),
                ..Point::default()
            }
            .into(),
            Point::new(1.0, 2.0, 3.0).into(),
        ];
        let p = first_point(&steps, true).unwrap();
        assert_eq!(*p, Point::new(1.0, 2.0, 3.0));
        let p = first_point(&steps, false).unwrap();
        assert_eq!(p.x, Some(5.0));
    }

    #[test]
    fn test_last_point() {
        let steps: Vec<Step> = vec![
            Point::new(1.0, 1.0, 1.0).into(),
            Point::new(2.0, 2.0, 2.0).into(),
            Extruder::turn_off().into(),
        ];
        assert_eq!(*last_point(&steps, true).unwrap(), Point::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_points_only_tracks_axes() {
        let steps: Vec<Step> = vec![
            Point::new(0.0, 0.0, 0.0).into(),
            Extruder::turn_on().into(),
            Point {
                x: Some(10.0),
                ..Point::default()
            }
            .into(),
        ];
        let points = points_only(&steps, true);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].x, Some(10.0));
        assert_eq!(points[1].y, Some(0.0));
        assert_eq!(points[1].z, Some(0.0));

        let raw = points_only(&steps, false);
        assert_eq!(raw[1].y, None);
    }

    #[test]
    fn test_relative_point() {
        let base = Point::new(10.0, 20.0, 30.0);
        let p = relative_point(&base, 5.0, -10.0, 0.0).unwrap();
        assert_eq!(p, Point::new(15.0, 10.0, 30.0));

        let partial = Point {
            x: Some(1.0),
            ..Point::default()
        };
        assert!(relative_point(&partial, 1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_flatten_and_linspace() {
        let a: Vec<Step> = vec![Point::new(0.0, 0.0, 0.0).into()];
        let b: Vec<Step> = vec![Point::new(1.0, 1.0, 1.0).into()];
        assert_eq!(flatten([a, b]).len(), 2);

        let values = linspace(0.0, 10.0, 5);
        assert_eq!(values, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }
}

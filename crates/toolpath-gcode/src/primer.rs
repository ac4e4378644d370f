//! Named priming routines.
//!
//! A priming routine is a pre-built instruction sequence inserted ahead of
//! the caller's design to establish material flow. Every routine is built
//! against the design's starting position and ends there, so the caller's
//! first move sees the position it expects.

use toolpath::{Extruder, GcodeComment, Point, Step};

use crate::error::{GcodeError, Result};

/// Build the priming steps for a named routine.
///
/// Known routines: `travel`, `x`, `y`, `front_lines_then_x`,
/// `front_lines_then_y`. An unknown name is a configuration error.
pub fn routine(name: &str, start: &Point) -> Result<Vec<Step>> {
    match name {
        "travel" => Ok(travel(start)),
        "x" => Ok(lead_in(start, -10.0, 0.0)),
        "y" => Ok(lead_in(start, 0.0, -10.0)),
        "front_lines_then_x" => Ok(front_lines(start, true)),
        "front_lines_then_y" => Ok(front_lines(start, false)),
        other => Err(GcodeError::UnknownPrimer(other.to_string())),
    }
}

fn at(start: &Point, x: f64, y: f64) -> Point {
    Point {
        x: Some(x),
        y: Some(y),
        z: start.z,
        ..Point::default()
    }
}

/// Travel to the start point with flow off, then turn flow on.
fn travel(start: &Point) -> Vec<Step> {
    vec![
        Extruder::turn_off().into(),
        Step::Move(start.clone()),
        Extruder::turn_on().into(),
    ]
}

/// Approach the start point along one axis, extruding a short lead-in line.
fn lead_in(start: &Point, dx: f64, dy: f64) -> Vec<Step> {
    let x = start.x.unwrap_or(0.0);
    let y = start.y.unwrap_or(0.0);
    vec![
        GcodeComment::new("primer begin").into(),
        Extruder::turn_off().into(),
        Step::Move(at(start, x + dx, y + dy)),
        Extruder::turn_on().into(),
        Step::Move(start.clone()),
        GcodeComment::new("primer end").into(),
    ]
}

/// Purge two short lines near the front edge of the plate, then approach the
/// start point along x (`along_x`) or y.
fn front_lines(start: &Point, along_x: bool) -> Vec<Step> {
    let x = start.x.unwrap_or(0.0);
    let y = start.y.unwrap_or(0.0);
    let mut steps: Vec<Step> = vec![GcodeComment::new("primer begin").into()];
    if along_x {
        // Lines along y at the plate's left, then travel in +x to the start.
        steps.extend([
            Extruder::turn_off().into(),
            Step::Move(at(start, 2.0, y)),
            Extruder::turn_on().into(),
            Step::Move(at(start, 2.0, y + 30.0)),
            Step::Move(at(start, 4.0, y + 30.0)),
            Step::Move(at(start, 4.0, y)),
            Extruder::turn_off().into(),
            Step::Move(start.clone()),
        ]);
    } else {
        // Lines along x at the plate's front, then travel in +y to the start.
        steps.extend([
            Extruder::turn_off().into(),
            Step::Move(at(start, x, 2.0)),
            Extruder::turn_on().into(),
            Step::Move(at(start, x + 30.0, 2.0)),
            Step::Move(at(start, x + 30.0, 4.0)),
            Step::Move(at(start, x, 4.0)),
            Extruder::turn_off().into(),
            Step::Move(start.clone()),
        ]);
    }
    steps.push(Extruder::turn_on().into());
    steps.push(GcodeComment::new("primer end").into());
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_routine_ends_at_start_with_flow_on() {
        let start = Point::new(10.0, 20.0, 0.2);
        let steps = routine("travel", &start).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], Extruder::turn_off().into());
        assert_eq!(steps[1], Step::Move(start));
        assert_eq!(steps[2], Extruder::turn_on().into());
    }

    #[test]
    fn test_front_lines_end_at_start() {
        let start = Point::new(50.0, 50.0, 0.2);
        for name in ["front_lines_then_x", "front_lines_then_y"] {
            let steps = routine(name, &start).unwrap();
            let last_move = steps
                .iter()
                .rev()
                .find_map(|s| match s {
                    Step::Move(p) => Some(p.clone()),
                    _ => None,
                })
                .unwrap();
            assert_eq!(last_move, start);
        }
    }

    #[test]
    fn test_unknown_routine_is_an_error() {
        let err = routine("spiral", &Point::new(0.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, GcodeError::UnknownPrimer(name) if name == "spiral"));
    }
}

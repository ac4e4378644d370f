#![warn(missing_docs)]

//! Design-side instruction model for toolpath-to-G-code compilation.
//!
//! A design is an ordered sequence of [`Step`]s: target positions, extruder
//! and feed-rate settings, device commands (fan, hotend, buildplate), raw
//! passthrough text and comments. This crate holds the pure data model; the
//! stateful translation into machine commands lives in `toolpath-gcode`.
//!
//! # Example
//!
//! ```
//! use toolpath::{Extruder, Point, Step};
//!
//! let steps: Vec<Step> = vec![
//!     Point::new(0.0, 0.0, 0.2).into(),
//!     Extruder::turn_on().into(),
//!     Point::new(20.0, 0.0, 0.2).into(),
//! ];
//! assert_eq!(steps.len(), 3);
//! ```

pub mod error;
pub mod extrusion;
pub mod point;
pub mod printer;
pub mod step;
pub mod steps;

pub use error::{DesignError, Result};
pub use extrusion::{
    AreaModel, Extruder, ExtrusionGeometry, ExtrusionUnits, StationaryExtrusion, TravelFormat,
};
pub use point::Point;
pub use printer::{
    Buildplate, Fan, GcodeComment, Hotend, ManualGcode, Printer, PrinterCommand,
};
pub use step::Step;
pub use steps::{first_point, flatten, last_point, linspace, points_only, relative_point};

#![warn(missing_docs)]

//! Stateful translation of toolpath designs into G-code.
//!
//! The design-side instruction model lives in the `toolpath` crate; this
//! crate walks a design step by step, tracking machine state (position, feed
//! memory, extrusion volume accounting, extrudate geometry) and emitting one
//! command stream per run. Configuration is resolved once up front by
//! layering a device profile and user overrides onto built-in defaults.
//!
//! # Example
//!
//! ```
//! use toolpath::{Extruder, Point, Step};
//! use toolpath_gcode::{generate_gcode, DeviceCatalog, GcodeControls};
//!
//! let steps: Vec<Step> = vec![
//!     Point::new(0.0, 0.0, 0.2).into(),
//!     Extruder::turn_on().into(),
//!     Point::new(20.0, 0.0, 0.2).into(),
//! ];
//! let gcode = generate_gcode(
//!     &steps,
//!     &GcodeControls::for_printer("generic"),
//!     &DeviceCatalog::builtin(),
//! )
//! .unwrap();
//! assert!(gcode.lines().count() >= 2);
//! ```

pub mod controls;
pub mod device;
pub mod error;
pub mod format;
pub mod generate;
pub mod output;
pub mod primer;
pub mod settings;
pub mod state;

pub use controls::GcodeControls;
pub use device::DeviceCatalog;
pub use error::{GcodeError, Result};
pub use generate::GcodeGenerator;
pub use settings::{Settings, SettingsPatch};

use toolpath::Step;

/// Translate a design into G-code in one call: resolve the effective
/// configuration from the catalog, run the translator, and persist the
/// output if the controls ask for it.
pub fn generate_gcode(
    steps: &[Step],
    controls: &GcodeControls,
    catalog: &DeviceCatalog,
) -> Result<String> {
    let settings = catalog.resolve(controls)?;
    let gcode = GcodeGenerator::new(settings).generate(steps)?;
    if let Some(path) = output::save(&gcode, controls)? {
        log::info!("saved G-code to {}", path.display());
    }
    Ok(gcode)
}

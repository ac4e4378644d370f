//! Persisting generated output to disk.

use std::fs;
use std::path::PathBuf;

use crate::controls::GcodeControls;
use crate::error::Result;

/// Filename the output would be saved under, or `None` when persistence is
/// disabled.
///
/// The timestamp suffix makes repeated runs of the same design
/// non-clobbering; disable it via [`GcodeControls::include_date`] to get a
/// stable filename instead.
pub fn output_filename(controls: &GcodeControls) -> Option<String> {
    let stem = controls.save_as.as_deref()?;
    let mut name = String::from(stem);
    if controls.include_date {
        name.push_str(
            &chrono::Local::now()
                .format("__%d-%m-%Y__%H-%M-%S")
                .to_string(),
        );
    }
    name.push_str(".gcode");
    Some(name)
}

/// Write `gcode` to the file named by `controls`, creating parent
/// directories as needed. Returns the written path, or `None` when
/// persistence is disabled.
pub fn save(gcode: &str, controls: &GcodeControls) -> Result<Option<PathBuf>> {
    let Some(name) = output_filename(controls) else {
        return Ok(None);
    };
    let path = PathBuf::from(name);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&path, gcode)?;
    Ok(Some(path))
}

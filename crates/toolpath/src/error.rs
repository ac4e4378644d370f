//! Error types for design construction.

use thiserror::Error;

/// Errors raised while constructing design instructions.
///
/// These are validation errors: an instruction whose fields are out of
/// domain is rejected here and never reaches the translator.
#[derive(Error, Debug)]
pub enum DesignError {
    /// Fan speed must be a percentage.
    #[error("fan speed percent {0} is out of range 0-100")]
    FanSpeedOutOfRange(f64),

    /// Stationary extrusion needs a usable feed rate.
    #[error("stationary extrusion speed must be positive, got {0}")]
    NonPositiveSpeed(f64),

    /// A reference point was missing one or more axes.
    #[error("reference point must have x, y and z defined")]
    UnderdefinedReference,
}

/// Result type for design operations.
pub type Result<T> = std::result::Result<T, DesignError>;

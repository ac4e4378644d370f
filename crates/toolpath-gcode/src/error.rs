//! Error types for G-code generation.

use thiserror::Error;

/// Errors that can occur while translating a design into G-code.
///
/// Configuration errors are raised before any machine state exists;
/// state-precondition errors abort the run mid-translation. Neither is
/// retried and partial output is discarded by the caller.
#[derive(Error, Debug)]
pub enum GcodeError {
    /// The requested device profile is not in the catalog.
    #[error("unknown device profile '{0}'")]
    UnknownPrinter(String),

    /// The requested priming routine is not known.
    #[error("unknown primer routine '{0}'")]
    UnknownPrimer(String),

    /// An extruding move was requested before the extrusion geometry had a
    /// computable area.
    #[error("extrusion requested before the extrusion geometry has a computable area")]
    AreaNotSet,

    /// A printer command id was not found in the command table.
    #[error("unknown printer command '{0}'")]
    UnknownCommand(String),

    /// Writing the output file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for G-code generation.
pub type Result<T> = std::result::Result<T, GcodeError>;

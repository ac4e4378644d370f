//! Printer settings, device settings and passthrough instructions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DesignError, Result};

/// Feed-rate and custom-command settings instruction.
///
/// Updates are consumed by the next move; this instruction never emits a
/// feed line itself, because feed selection depends on whether that move
/// extrudes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Printer {
    /// Feed rate for extruding moves, units per minute.
    pub print_speed: Option<f64>,
    /// Feed rate for travel moves, units per minute.
    pub travel_speed: Option<f64>,
    /// Commands merged into the persistent printer command table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_command: Option<HashMap<String, String>>,
}

impl Printer {
    /// Instruction setting only the print feed rate.
    pub fn print_speed(speed: f64) -> Self {
        Self {
            print_speed: Some(speed),
            ..Self::default()
        }
    }

    /// Instruction setting only the travel feed rate.
    pub fn travel_speed(speed: f64) -> Self {
        Self {
            travel_speed: Some(speed),
            ..Self::default()
        }
    }
}

/// Emit a named entry from the printer command table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterCommand {
    /// Key into the command table (e.g. `home`, `retract`).
    pub id: String,
}

impl PrinterCommand {
    /// Command instruction for the given table key.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Part-cooling fan setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fan {
    /// Fan speed as a percentage, 0-100.
    pub speed_percent: f64,
}

impl Fan {
    /// Build a fan setting, rejecting percentages outside 0-100.
    pub fn new(speed_percent: f64) -> Result<Self> {
        if !(0.0..=100.0).contains(&speed_percent) {
            return Err(DesignError::FanSpeedOutOfRange(speed_percent));
        }
        Ok(Self { speed_percent })
    }
}

/// Hotend temperature setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotend {
    /// Target temperature, °C.
    pub temp: u32,
    /// Block until the temperature is reached.
    #[serde(default)]
    pub wait: bool,
    /// Tool number for multi-tool machines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<u32>,
}

impl Hotend {
    /// Non-blocking temperature setting.
    pub fn new(temp: u32) -> Self {
        Self {
            temp,
            wait: false,
            tool: None,
        }
    }
}

/// Buildplate (bed) temperature setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buildplate {
    /// Target temperature, °C.
    pub temp: u32,
    /// Block until the temperature is reached.
    #[serde(default)]
    pub wait: bool,
}

/// Caller-supplied literal text, emitted verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualGcode {
    /// Text to emit. May span multiple lines.
    pub text: String,
}

impl ManualGcode {
    /// Raw-text instruction.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A comment line in the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcodeComment {
    /// Comment text, without the leading `;`.
    pub text: String,
}

impl GcodeComment {
    /// Comment instruction.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_percent_validated_at_construction() {
        assert!(Fan::new(0.0).is_ok());
        assert!(Fan::new(100.0).is_ok());
        assert!(Fan::new(-1.0).is_err());
        assert!(Fan::new(100.5).is_err());
    }

    #[test]
    fn test_printer_single_field_helpers() {
        let p = Printer::print_speed(1500.0);
        assert_eq!(p.print_speed, Some(1500.0));
        assert_eq!(p.travel_speed, None);
        assert!(p.new_command.is_none());
    }
}

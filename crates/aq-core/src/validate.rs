//! Range checks against static engineering tables.
//!
//! Each check returns the findings it raised; empty means in range.

use crate::engineering::{EngineeringError, Severity};

pub fn validate_flow_rate(flow_rate: f64, min_flow: f64, max_flow: f64) -> Vec<EngineeringError> {
    let mut errors = Vec::new();

    if flow_rate < min_flow {
        errors.push(EngineeringError::new(
            "FLOW_TOO_LOW",
            format!("Flow rate {flow_rate} m³/h below minimum {min_flow} m³/h"),
            Severity::Error,
        ));
    }

    if flow_rate > max_flow {
        errors.push(EngineeringError::new(
            "FLOW_TOO_HIGH",
            format!("Flow rate {flow_rate} m³/h exceeds maximum {max_flow} m³/h"),
            Severity::Warning,
        ));
    }

    errors
}

pub fn validate_pressure(pressure: f64, min_pressure: f64, max_pressure: f64) -> Vec<EngineeringError> {
    let mut errors = Vec::new();

    if pressure < min_pressure {
        errors.push(EngineeringError::new(
            "PRESSURE_TOO_LOW",
            format!("Pressure {pressure} bar below minimum {min_pressure} bar"),
            Severity::Error,
        ));
    }

    if pressure > max_pressure {
        errors.push(EngineeringError::new(
            "PRESSURE_TOO_HIGH",
            format!("Pressure {pressure} bar exceeds maximum {max_pressure} bar"),
            Severity::Error,
        ));
    }

    errors
}

/// Temperature range for water-treatment service.
pub fn validate_temperature(temperature: f64) -> Vec<EngineeringError> {
    let mut errors = Vec::new();

    if temperature < 0.0 {
        errors.push(EngineeringError::new(
            "TEMP_BELOW_FREEZING",
            format!("Temperature {temperature}°C below freezing point"),
            Severity::Error,
        ));
    }

    if temperature > 80.0 {
        errors.push(EngineeringError::new(
            "TEMP_TOO_HIGH",
            format!("Temperature {temperature}°C may damage equipment"),
            Severity::Warning,
        ));
    }

    errors
}

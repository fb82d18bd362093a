//! Property correlations for pure water.
//!
//! Closed-form fits good enough for water-treatment process design;
//! temperatures in °C, SI outputs.

/// Water density as a function of temperature (kg/m³).
pub fn density(temperature_c: f64) -> f64 {
    1000.0 * (1.0 - 0.0002 * (temperature_c - 20.0))
}

/// Water dynamic viscosity as a function of temperature (Pa·s).
pub fn dynamic_viscosity(temperature_c: f64) -> f64 {
    0.001 * (1.3272 * (20.0 - temperature_c) / (temperature_c + 105.0)).exp()
}

/// Reynolds number for flow in a duct of the given hydraulic diameter.
pub fn reynolds_number(velocity_m_s: f64, diameter_m: f64, temperature_c: f64) -> f64 {
    density(temperature_c) * velocity_m_s * diameter_m / dynamic_viscosity(temperature_c)
}

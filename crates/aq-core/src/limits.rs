//! Plant-wide engineering constants and operating limits.

/// Water density at reference temperature (kg/m³)
pub const WATER_DENSITY: f64 = 1000.0;

/// Standard gravity (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Pressure head conversion factor (m of water column per bar)
pub const METERS_PER_BAR: f64 = 10.2;

/// Maximum recommended system recovery (%)
pub const MAX_RECOVERY: f64 = 98.0;

/// Maximum recommended membrane flux (L/m²/h)
pub const MAX_FLUX: f64 = 120.0;

/// Maximum transmembrane pressure rating (bar)
pub const MAX_TMP: f64 = 3.0;

/// Default clean-membrane hydraulic resistance (m⁻¹)
pub const DEFAULT_UF_RESISTANCE: f64 = 2e11;

/// Default membrane permeability (L/m²/h/bar)
pub const DEFAULT_UF_PERMEABILITY: f64 = 50.0;

//! aq-core: stable foundation for aquaflow.
//!
//! Contains:
//! - units (uom SI types + constructors for water-treatment quantities)
//! - numeric (Real + tolerances + float helpers)
//! - water (property correlations for pure water)
//! - engineering (error taxonomy with severities)
//! - validate (range checks against engineering tables)
//! - limits (plant-wide engineering constants)
//! - error (shared error types)

pub mod engineering;
pub mod error;
pub mod limits;
pub mod numeric;
pub mod units;
pub mod validate;
pub mod water;

// Re-exports: nice ergonomics for downstream crates
pub use engineering::{EngineeringError, Severity};
pub use error::{AqError, AqResult};
pub use numeric::*;
pub use units::*;

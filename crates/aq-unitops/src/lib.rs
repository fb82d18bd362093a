//! aq-unitops: unit-operation calculators for water-treatment equipment.
//!
//! Each calculator is a pure, single-pass function of typed inputs: it
//! computes outlet performance data and never mutates shared state. Outlet
//! propagation onto streams is the solver's job (see aq-solver routing).

pub mod common;
pub mod error;
pub mod feed_tank;
pub mod pump;
pub mod tank;
pub mod types;
pub mod ultrafiltration;

// Re-exports for ergonomics
pub use error::{CalcResult, UnitError};
pub use feed_tank::{FeedTank, FeedTankInputs, SourceType, WaterQuality};
pub use pump::{Pump, PumpInputs};
pub use tank::{Tank, TankInputs};
pub use types::{FieldValue, UnitData, UnitResult};
pub use ultrafiltration::{MembraneType, UfInputs, Ultrafiltration};

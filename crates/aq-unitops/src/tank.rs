//! Storage tank pass-through model.
//!
//! A tank at steady state neither stores nor releases: outlet flow equals
//! the aggregated inlet flow, and pressure/temperature come from the
//! configured defaults. Generic (unclassified) equipment uses the same
//! behavior.

use crate::error::CalcResult;
use crate::types::{UnitData, UnitResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TankInputs {
    /// Aggregated inlet flow (m³/h)
    pub feed_flow: f64,
    /// Outlet pressure (bar)
    pub pressure: f64,
    /// Outlet temperature (°C)
    pub temperature: f64,
}

impl Default for TankInputs {
    fn default() -> Self {
        Self {
            feed_flow: 0.0,
            pressure: 1.0,
            temperature: 25.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tank {
    pub equipment_id: String,
}

impl Tank {
    pub fn new(equipment_id: impl Into<String>) -> Self {
        Self {
            equipment_id: equipment_id.into(),
        }
    }

    pub fn calculate(&self, inputs: &TankInputs) -> CalcResult<UnitResult> {
        let mut data = UnitData::new();
        data.insert("outlet_flow".into(), inputs.feed_flow.into());
        data.insert("outlet_pressure".into(), inputs.pressure.into());
        data.insert("outlet_temperature".into(), inputs.temperature.into());
        Ok(UnitResult::new(data))
    }
}

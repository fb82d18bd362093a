//! Centrifugal pump model.
//!
//! Flow passes through; discharge pressure is set by the pump curve
//! operating point from the configuration. Power draw is standard
//! hydraulic power:
//!
//! ```text
//! P = rho * g * Q * H / eta
//! ```
//!
//! with head taken from discharge pressure at 10.2 m of water per bar.

use crate::common::round_to;
use crate::error::{CalcResult, UnitError};
use crate::types::{UnitData, UnitResult};
use aq_core::engineering::{EngineeringError, Severity};
use aq_core::limits::{GRAVITY, METERS_PER_BAR, WATER_DENSITY};
use aq_core::units::{m3h, to_m3s};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PumpInputs {
    /// Aggregated inlet flow (m³/h)
    pub feed_flow: f64,
    /// Pump efficiency (0, 1]
    pub efficiency: f64,
    /// Discharge pressure (bar)
    pub discharge_pressure: f64,
}

impl Default for PumpInputs {
    fn default() -> Self {
        Self {
            feed_flow: 0.0,
            efficiency: 0.75,
            discharge_pressure: 3.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pump {
    pub equipment_id: String,
}

impl Pump {
    pub fn new(equipment_id: impl Into<String>) -> Self {
        Self {
            equipment_id: equipment_id.into(),
        }
    }

    pub fn calculate(&self, inputs: &PumpInputs) -> CalcResult<UnitResult> {
        if inputs.efficiency <= 0.0 || inputs.efficiency > 1.0 {
            return Err(UnitError::Engineering(vec![
                EngineeringError::new(
                    "INVALID_EFFICIENCY",
                    "Pump efficiency must be in (0, 1]",
                    Severity::Error,
                )
                .for_equipment(&self.equipment_id),
            ]));
        }

        let power = hydraulic_power(
            inputs.feed_flow,
            inputs.discharge_pressure,
            inputs.efficiency,
        );

        let mut data = UnitData::new();
        data.insert("discharge_flow".into(), inputs.feed_flow.into());
        data.insert(
            "discharge_pressure".into(),
            inputs.discharge_pressure.into(),
        );
        data.insert("power_consumption".into(), round_to(power, 3).into());
        Ok(UnitResult::new(data))
    }
}

/// Hydraulic power draw in kW for the given flow, head and efficiency.
pub fn hydraulic_power(flow_rate_m3h: f64, head_bar: f64, efficiency: f64) -> f64 {
    let flow_m3_s = to_m3s(m3h(flow_rate_m3h));
    let head_m = head_bar * METERS_PER_BAR;

    let power_kw = (WATER_DENSITY * GRAVITY * flow_m3_s * head_m) / (efficiency * 1000.0);
    power_kw.max(0.0)
}

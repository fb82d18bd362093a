//! Calculator result payloads.

use crate::feed_tank::WaterQuality;
use aq_core::EngineeringError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single value in a calculator's output data map.
///
/// Most fields are numbers; feed-tank characterization also emits flags,
/// ratings, recommendation lists and a nested water-quality block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Flag(bool),
    Text(String),
    List(Vec<String>),
    Quality(WaterQuality),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Flag(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

/// Keyed output data of one calculator invocation.
///
/// Key names are the routing contract: the solver maps them onto outlet
/// streams by port name (`permeate_flow`, `discharge_flow`, ...), so they
/// must stay stable across calculators.
pub type UnitData = BTreeMap<String, FieldValue>;

/// Successful calculator outcome: output data plus non-blocking findings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitResult {
    pub data: UnitData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<EngineeringError>,
}

impl UnitResult {
    pub fn new(data: UnitData) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(data: UnitData, warnings: Vec<EngineeringError>) -> Self {
        Self { data, warnings }
    }

    /// Numeric field accessor used by routing and tests.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.data.get(key).and_then(FieldValue::as_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_round_trips_through_json() {
        let mut data = UnitData::new();
        data.insert("outlet_flow".into(), 42.5.into());
        data.insert("overflow_risk".into(), false.into());
        data.insert("fouling_potential".into(), "low".into());

        let json = serde_json::to_string(&data).unwrap();
        let back: UnitData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("outlet_flow").unwrap().as_number(), Some(42.5));
        assert_eq!(back.get("fouling_potential").unwrap().as_text(), Some("low"));
    }

    #[test]
    fn as_number_rejects_other_variants() {
        assert_eq!(FieldValue::Flag(true).as_number(), None);
        assert_eq!(FieldValue::Text("high".into()).as_number(), None);
    }
}

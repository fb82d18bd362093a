//! Solve result types.

use aq_core::EngineeringError;
use aq_flowsheet::Stream;
use aq_unitops::UnitData;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one flowsheet solve.
///
/// `success=false` means the solve aborted (equipment calculation failure
/// or internal fault) and carries no stream state. An exhausted iteration
/// budget is NOT a failure: `success=true, converged=false` — callers must
/// check `converged` explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResult {
    pub success: bool,
    pub converged: bool,
    pub iterations: usize,
    pub max_error: f64,
    #[serde(default)]
    pub streams: BTreeMap<String, Stream>,
    #[serde(default)]
    pub equipment_results: BTreeMap<String, UnitData>,
    #[serde(default)]
    pub errors: Vec<EngineeringError>,
    #[serde(default)]
    pub system_recovery: f64,
}

impl SolveResult {
    /// A failure result: no streams, no equipment payloads, one error.
    pub(crate) fn failure(error: EngineeringError) -> Self {
        Self {
            success: false,
            converged: false,
            iterations: 0,
            max_error: 0.0,
            streams: BTreeMap::new(),
            equipment_results: BTreeMap::new(),
            errors: vec![error],
            system_recovery: 0.0,
        }
    }

    /// Convenience flow accessor for a result stream.
    pub fn stream_flow(&self, stream_id: &str) -> Option<f64> {
        self.streams.get(stream_id).map(|s| s.flow_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_core::Severity;

    #[test]
    fn failure_carries_no_state() {
        let result = SolveResult::failure(EngineeringError::new(
            "EQUIPMENT_CALC_ERROR",
            "boom",
            Severity::Error,
        ));
        assert!(!result.success);
        assert!(result.streams.is_empty());
        assert!(result.equipment_results.is_empty());
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn result_serializes_presentation_shape() {
        let result = SolveResult {
            success: true,
            converged: true,
            iterations: 3,
            max_error: 1e-9,
            streams: BTreeMap::new(),
            equipment_results: BTreeMap::new(),
            errors: vec![],
            system_recovery: 80.0,
        };
        let json = serde_json::to_value(&result).unwrap();
        for key in [
            "success",
            "converged",
            "iterations",
            "max_error",
            "streams",
            "equipment_results",
            "errors",
            "system_recovery",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }
}

//! Post-solve mass-balance audit.

use crate::registry::StreamRegistry;
use aq_core::engineering::{EngineeringError, Severity};
use aq_flowsheet::Flowsheet;

/// Check per-equipment mass conservation over the converged streams.
///
/// Imbalance is relative to inlet flow; equipment with zero inlet flow is
/// exempt. The 1% threshold is strict (exactly 1.0% passes); above 5% the
/// finding escalates from warning to error. Findings are advisory — they
/// never change the solve's success flag.
pub fn validate_mass_balance(
    flowsheet: &Flowsheet,
    registry: &StreamRegistry,
) -> Vec<EngineeringError> {
    let mut errors = Vec::new();

    for unit in &flowsheet.equipment {
        let inlet_flow: f64 = unit
            .inlet_streams
            .iter()
            .filter_map(|id| registry.get(id))
            .map(|s| s.flow_rate)
            .sum();

        let outlet_flow: f64 = unit
            .outlet_streams
            .iter()
            .filter_map(|id| registry.get(id))
            .map(|s| s.flow_rate)
            .sum();

        if inlet_flow > 0.0 {
            let imbalance = (inlet_flow - outlet_flow).abs() / inlet_flow * 100.0;

            if imbalance > 1.0 {
                let severity = if imbalance > 5.0 {
                    Severity::Error
                } else {
                    Severity::Warning
                };
                errors.push(
                    EngineeringError::new(
                        "MASS_BALANCE_ERROR",
                        format!(
                            "Mass balance error in {}: {:.1}% (In: {:.3}, Out: {:.3} m³/h)",
                            unit.equipment_id, imbalance, inlet_flow, outlet_flow
                        ),
                        severity,
                    )
                    .for_equipment(&unit.equipment_id),
                );
            }
        }
    }

    errors
}

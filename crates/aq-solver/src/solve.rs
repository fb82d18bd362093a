//! Gauss-Seidel mass-balance solve loop.

use crate::balance::validate_mass_balance;
use crate::error::{SolverError, SolverResult};
use crate::recovery::system_recovery;
use crate::registry::StreamRegistry;
use crate::result::SolveResult;
use crate::routing::apply_outlet_routing;
use aq_core::engineering::{EngineeringError, Severity};
use aq_flowsheet::{Equipment, EquipmentKind, Flowsheet};
use aq_unitops::{
    CalcResult, FeedTank, Pump, PumpInputs, Tank, TankInputs, UfInputs, Ultrafiltration, UnitData,
    UnitResult,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Steady-state mass-balance solver.
///
/// Carries no state beyond its tolerances, so one instance can be reused
/// across sequential solves; each `solve` call owns a fresh
/// [`StreamRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct MassBalanceSolver {
    /// Convergence tolerance on the largest flow delta (m³/h).
    pub tolerance: f64,
    /// Hard cap on Gauss-Seidel sweeps.
    pub max_iterations: usize,
}

impl Default for MassBalanceSolver {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

/// Result of one Gauss-Seidel sweep over all equipment.
#[derive(Debug, Clone, Default)]
pub struct SweepOutcome {
    /// Latest calculator output per equipment unit.
    pub equipment_results: BTreeMap<String, UnitData>,
    /// Non-blocking calculator findings per equipment unit.
    pub warnings: BTreeMap<String, Vec<EngineeringError>>,
}

impl MassBalanceSolver {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Solve the flowsheet to steady state.
    ///
    /// Never panics and never returns `Err`: every failure mode is encoded
    /// in the returned [`SolveResult`]. An exhausted iteration budget is a
    /// legitimate outcome (`success=true, converged=false`); only an
    /// equipment calculation failure or an internal fault aborts, and an
    /// abort discards all stream state accumulated so far.
    pub fn solve(&self, flowsheet: &Flowsheet) -> SolveResult {
        match self.solve_inner(flowsheet) {
            Ok(result) => result,
            Err(SolverError::EquipmentCalc {
                equipment_id,
                source,
            }) => SolveResult::failure(
                EngineeringError::new(
                    "EQUIPMENT_CALC_ERROR",
                    format!("Equipment {equipment_id} calculation failed: {source}"),
                    Severity::Error,
                )
                .for_equipment(equipment_id),
            ),
            Err(err @ SolverError::Internal { .. }) => SolveResult::failure(EngineeringError::new(
                "SOLVER_ERROR",
                format!("Mass balance solver failed: {err}"),
                Severity::Critical,
            )),
        }
    }

    fn solve_inner(&self, flowsheet: &Flowsheet) -> SolverResult<SolveResult> {
        let mut registry = StreamRegistry::from_flowsheet(flowsheet);

        let mut outcome = SweepOutcome::default();
        let mut converged = false;
        let mut iterations = 0;
        let mut max_error = f64::INFINITY;

        while !converged && iterations < self.max_iterations {
            let snapshot = registry.flow_snapshot();

            outcome = sweep(flowsheet, &mut registry)?;

            max_error = max_flow_delta(&snapshot, &registry)?;
            converged = max_error < self.tolerance;
            iterations += 1;

            debug!(iteration = iterations, max_error, converged, "sweep complete");
        }

        let mut errors: Vec<EngineeringError> =
            outcome.warnings.into_values().flatten().collect();
        let balance_errors = validate_mass_balance(flowsheet, &registry);
        for finding in &balance_errors {
            warn!(
                equipment_id = %finding.equipment_id,
                severity = %finding.severity,
                "{}", finding.message
            );
        }
        errors.extend(balance_errors);

        let streams = registry.into_map();
        let recovery = system_recovery(&streams);

        Ok(SolveResult {
            success: true,
            converged,
            iterations,
            max_error,
            streams,
            equipment_results: outcome.equipment_results,
            errors,
            system_recovery: recovery,
        })
    }
}

/// One Gauss-Seidel pass over the equipment list, in declaration order.
///
/// The registry is updated in place as the pass proceeds, so downstream
/// equipment sees upstream results from the same pass. Deliberately NOT a
/// topologically ordered traversal: convergence comes from repeated
/// sweeps, and the declaration-order iteration count is part of the
/// observable contract.
pub fn sweep(
    flowsheet: &Flowsheet,
    registry: &mut StreamRegistry,
) -> SolverResult<SweepOutcome> {
    let mut outcome = SweepOutcome::default();

    for unit in &flowsheet.equipment {
        let inlet = aggregate_inlets(unit, registry);

        let result = dispatch(unit, &inlet).map_err(|source| SolverError::EquipmentCalc {
            equipment_id: unit.equipment_id.clone(),
            source,
        })?;

        for stream_id in &unit.outlet_streams {
            // Declared outlets absent from the registry are skipped
            if let Some(stream) = registry.get_mut(stream_id) {
                apply_outlet_routing(stream, &result.data);
            }
        }

        if !result.warnings.is_empty() {
            outcome
                .warnings
                .insert(unit.equipment_id.clone(), result.warnings);
        }
        outcome
            .equipment_results
            .insert(unit.equipment_id.clone(), result.data);
    }

    Ok(outcome)
}

/// Aggregated inlet conditions for one equipment unit.
#[derive(Debug, Clone, Copy, Default)]
struct InletAggregate {
    /// Summed flow of the connected inlet streams (m³/h).
    total_flow: f64,
    /// How many declared inlets actually resolved to a stream.
    connected: usize,
}

fn aggregate_inlets(unit: &Equipment, registry: &StreamRegistry) -> InletAggregate {
    let mut aggregate = InletAggregate::default();

    for stream_id in &unit.inlet_streams {
        // Declared inlets absent from the registry are skipped
        if let Some(stream) = registry.get(stream_id) {
            aggregate.total_flow += stream.flow_rate;
            aggregate.connected += 1;
        }
    }

    aggregate
}

/// Dispatch one equipment unit to its calculator.
///
/// Config values take precedence over inlet-derived ones: an explicit
/// `feed_flow` override wins, otherwise the summed inlet flow is injected.
fn dispatch(unit: &Equipment, inlet: &InletAggregate) -> CalcResult<UnitResult> {
    match &unit.kind {
        EquipmentKind::Ultrafiltration(cfg) => {
            let inputs = UfInputs {
                feed_flow: cfg.feed_flow.unwrap_or(inlet.total_flow),
                membrane_area: cfg.membrane_area,
                transmembrane_pressure: cfg.transmembrane_pressure,
                temperature: cfg.temperature,
                feed_concentration: cfg.feed_concentration,
                crossflow_velocity: cfg.crossflow_velocity,
                operating_hours: cfg.operating_hours,
                membrane_type: cfg.membrane_type,
            };
            Ultrafiltration::new(&unit.equipment_id).calculate(&inputs)
        }
        EquipmentKind::FeedTank(cfg) => {
            let mut inputs = cfg.clone();
            // A feed tank with wired inlets runs on them; otherwise it is a
            // source fed at the configured rate.
            if inlet.connected > 0 {
                inputs.inflow_rate = inlet.total_flow;
            }
            FeedTank::new(&unit.equipment_id).calculate(&inputs)
        }
        EquipmentKind::Tank(cfg) | EquipmentKind::Generic(cfg) => {
            let inputs = TankInputs {
                feed_flow: inlet.total_flow,
                pressure: cfg.pressure,
                temperature: cfg.temperature,
            };
            Tank::new(&unit.equipment_id).calculate(&inputs)
        }
        EquipmentKind::Pump(cfg) => {
            let inputs = PumpInputs {
                feed_flow: inlet.total_flow,
                efficiency: cfg.efficiency,
                discharge_pressure: cfg.discharge_pressure,
            };
            Pump::new(&unit.equipment_id).calculate(&inputs)
        }
    }
}

/// Largest absolute flow change between a snapshot and the registry.
fn max_flow_delta(snapshot: &[f64], registry: &StreamRegistry) -> SolverResult<f64> {
    let mut max_error = 0.0f64;

    for (old, stream) in snapshot.iter().zip(registry.iter()) {
        let delta = (stream.flow_rate - old).abs();
        if !delta.is_finite() {
            return Err(SolverError::Internal {
                what: format!("non-finite flow delta on stream '{}'", stream.stream_id),
            });
        }
        max_error = max_error.max(delta);
    }

    Ok(max_error)
}

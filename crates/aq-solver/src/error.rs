//! Error types for solver operations.

use aq_unitops::UnitError;
use thiserror::Error;

/// Errors that can occur while driving a solve.
///
/// Neither variant escapes the public `solve` entry point; both are
/// converted into a failure `SolveResult` carrying the matching
/// engineering code (`EQUIPMENT_CALC_ERROR` / `SOLVER_ERROR`).
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Equipment {equipment_id} calculation failed: {source}")]
    EquipmentCalc {
        equipment_id: String,
        #[source]
        source: UnitError,
    },

    #[error("Internal fault: {what}")]
    Internal { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

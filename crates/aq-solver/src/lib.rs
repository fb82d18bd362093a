//! aq-solver: steady-state mass-balance solver for water-treatment
//! flowsheets.
//!
//! The solver runs Gauss-Seidel fixed-point sweeps over the equipment list
//! in declaration order, dispatching each unit to its calculator and
//! writing outlet results back onto streams until flows stop moving (or
//! the iteration budget runs out, which is a reportable outcome, not an
//! error). Post-solve it audits per-equipment mass conservation and
//! derives the overall system recovery.

pub mod balance;
pub mod error;
pub mod recovery;
pub mod registry;
pub mod result;
pub mod routing;
pub mod solve;

pub use balance::validate_mass_balance;
pub use error::{SolverError, SolverResult};
pub use recovery::system_recovery;
pub use registry::StreamRegistry;
pub use result::SolveResult;
pub use routing::apply_outlet_routing;
pub use solve::{MassBalanceSolver, SweepOutcome, sweep};

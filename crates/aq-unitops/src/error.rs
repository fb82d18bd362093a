//! Error types for unit-operation calculations.

use aq_core::EngineeringError;
use thiserror::Error;

/// Errors that can occur during a unit-operation calculation.
///
/// `Engineering` carries the blocking findings a calculator raised while
/// refusing to produce a result; the solver turns any of these into a fatal
/// abort of the whole solve.
#[derive(Error, Debug, Clone)]
pub enum UnitError {
    #[error("engineering checks failed: {}", codes(.0))]
    Engineering(Vec<EngineeringError>),

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl UnitError {
    /// The engineering findings behind this error, if any.
    pub fn findings(&self) -> &[EngineeringError] {
        match self {
            UnitError::Engineering(errors) => errors,
            _ => &[],
        }
    }
}

fn codes(errors: &[EngineeringError]) -> String {
    errors
        .iter()
        .map(|e| e.code.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type CalcResult<T> = Result<T, UnitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use aq_core::Severity;

    #[test]
    fn display_lists_codes() {
        let err = UnitError::Engineering(vec![
            EngineeringError::new("INVALID_TMP", "TMP must be positive", Severity::Error),
            EngineeringError::new("INVALID_FEED_FLOW", "Feed flow must be positive", Severity::Error),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("INVALID_TMP"));
        assert!(msg.contains("INVALID_FEED_FLOW"));
    }
}

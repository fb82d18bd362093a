//! Engineering error taxonomy shared by calculators and the solver.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of an engineering finding.
///
/// Severity never halts a solve on its own; only a calculator failure does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

/// A machine-readable engineering finding attached to an equipment unit
/// (or global when `equipment_id` is empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeringError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub equipment_id: String,
    pub severity: Severity,
}

impl EngineeringError {
    pub fn new(code: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            equipment_id: String::new(),
            severity,
        }
    }

    /// Attribute this finding to a specific equipment unit.
    pub fn for_equipment(mut self, equipment_id: impl Into<String>) -> Self {
        self.equipment_id = equipment_id.into();
        self
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self.severity, Severity::Error | Severity::Critical)
    }
}

impl fmt::Display for EngineeringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.equipment_id.is_empty() {
            write!(f, "[{}] {}: {}", self.severity, self.code, self.message)
        } else {
            write!(
                f,
                "[{}] {} ({}): {}",
                self.severity, self.code, self.equipment_id, self.message
            )
        }
    }
}

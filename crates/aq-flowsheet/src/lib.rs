//! aq-flowsheet: canonical flowsheet document format and validation.

pub mod builder;
pub mod schema;
pub mod validate;

pub use builder::FlowsheetBuilder;
pub use schema::*;
pub use validate::{Strictness, ValidationError, validate_flowsheet};

pub type FlowsheetResult<T> = Result<T, FlowsheetError>;

#[derive(thiserror::Error, Debug)]
pub enum FlowsheetError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> FlowsheetResult<Flowsheet> {
    let content = std::fs::read_to_string(path)?;
    let flowsheet: Flowsheet = serde_yaml::from_str(&content)?;
    validate_flowsheet(&flowsheet, Strictness::Permissive)?;
    Ok(flowsheet)
}

pub fn save_yaml(path: &std::path::Path, flowsheet: &Flowsheet) -> FlowsheetResult<()> {
    validate_flowsheet(flowsheet, Strictness::Permissive)?;
    let content = serde_yaml::to_string(flowsheet)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> FlowsheetResult<Flowsheet> {
    let content = std::fs::read_to_string(path)?;
    let flowsheet: Flowsheet = serde_json::from_str(&content)?;
    validate_flowsheet(&flowsheet, Strictness::Permissive)?;
    Ok(flowsheet)
}

pub fn save_json(path: &std::path::Path, flowsheet: &Flowsheet) -> FlowsheetResult<()> {
    validate_flowsheet(flowsheet, Strictness::Permissive)?;
    let content = serde_json::to_string_pretty(flowsheet)?;
    std::fs::write(path, content)?;
    Ok(())
}

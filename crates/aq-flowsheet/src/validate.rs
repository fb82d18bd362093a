//! Flowsheet validation logic.

use crate::schema::Flowsheet;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// How to treat equipment references to streams that are not in the
/// flowsheet.
///
/// The solver always skips unknown streams mid-sweep; `Strict` turns them
/// into up-front validation failures instead of tolerated findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    #[default]
    Permissive,
    Strict,
}

/// Validate a flowsheet's structure.
///
/// Duplicate IDs are always hard errors. Dangling stream references are
/// hard errors under `Strict` and returned as tolerated findings under
/// `Permissive`.
pub fn validate_flowsheet(
    flowsheet: &Flowsheet,
    strictness: Strictness,
) -> Result<Vec<ValidationError>, ValidationError> {
    let mut tolerated = Vec::new();

    let mut stream_ids = HashSet::new();
    for stream in &flowsheet.streams {
        if !stream_ids.insert(stream.stream_id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: stream.stream_id.clone(),
                context: "streams".to_string(),
            });
        }
    }

    let mut equipment_ids = HashSet::new();
    for unit in &flowsheet.equipment {
        if !equipment_ids.insert(unit.equipment_id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: unit.equipment_id.clone(),
                context: "equipment".to_string(),
            });
        }

        for (list, context) in [
            (&unit.inlet_streams, "inlet_streams"),
            (&unit.outlet_streams, "outlet_streams"),
        ] {
            for stream_id in list {
                if !stream_ids.contains(stream_id.as_str()) {
                    let finding = ValidationError::MissingReference {
                        id: stream_id.clone(),
                        context: format!("equipment '{}' {}", unit.equipment_id, context),
                    };
                    match strictness {
                        Strictness::Strict => return Err(finding),
                        Strictness::Permissive => tolerated.push(finding),
                    }
                }
            }
        }
    }

    // Stream endpoints may be empty (terminal streams) but must resolve
    // when named.
    for stream in &flowsheet.streams {
        for (equipment_id, context) in [
            (&stream.source_equipment, "source_equipment"),
            (&stream.target_equipment, "target_equipment"),
        ] {
            if !equipment_id.is_empty() && !equipment_ids.contains(equipment_id.as_str()) {
                let finding = ValidationError::MissingReference {
                    id: equipment_id.clone(),
                    context: format!("stream '{}' {}", stream.stream_id, context),
                };
                match strictness {
                    Strictness::Strict => return Err(finding),
                    Strictness::Permissive => tolerated.push(finding),
                }
            }
        }
    }

    Ok(tolerated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Equipment, EquipmentKind, PassThroughConfig, Stream};

    fn tank(id: &str, inlets: &[&str], outlets: &[&str]) -> Equipment {
        Equipment {
            equipment_id: id.to_string(),
            kind: EquipmentKind::Tank(PassThroughConfig::default()),
            inlet_streams: inlets.iter().map(|s| s.to_string()).collect(),
            outlet_streams: outlets.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn clean_flowsheet_validates() {
        let flowsheet = Flowsheet {
            equipment: vec![tank("T-1", &["feed_1"], &["out_1"])],
            streams: vec![Stream::new("feed_1"), Stream::new("out_1")],
            connections: vec![],
        };
        let tolerated = validate_flowsheet(&flowsheet, Strictness::Strict).unwrap();
        assert!(tolerated.is_empty());
    }

    #[test]
    fn duplicate_stream_id_is_always_fatal() {
        let flowsheet = Flowsheet {
            equipment: vec![],
            streams: vec![Stream::new("feed_1"), Stream::new("feed_1")],
            connections: vec![],
        };
        let err = validate_flowsheet(&flowsheet, Strictness::Permissive).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateId { .. }));
    }

    #[test]
    fn dangling_reference_tolerated_when_permissive() {
        let flowsheet = Flowsheet {
            equipment: vec![tank("T-1", &["ghost"], &[])],
            streams: vec![],
            connections: vec![],
        };

        let tolerated = validate_flowsheet(&flowsheet, Strictness::Permissive).unwrap();
        assert_eq!(tolerated.len(), 1);

        let err = validate_flowsheet(&flowsheet, Strictness::Strict).unwrap_err();
        assert!(matches!(err, ValidationError::MissingReference { .. }));
    }

    #[test]
    fn terminal_streams_are_fine() {
        let mut stream = Stream::new("drain_1");
        stream.source_equipment = "T-1".to_string();
        // target left empty: flows out of the plant
        let flowsheet = Flowsheet {
            equipment: vec![tank("T-1", &[], &["drain_1"])],
            streams: vec![stream],
            connections: vec![],
        };
        assert!(validate_flowsheet(&flowsheet, Strictness::Strict).is_ok());
    }
}

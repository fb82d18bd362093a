//! Incremental flowsheet builder.

use crate::schema::{Connection, Equipment, EquipmentKind, Flowsheet, Stream};
use crate::validate::{Strictness, ValidationError, validate_flowsheet};

/// Builder for constructing a flowsheet incrementally.
///
/// Use `add_equipment`, `add_stream` and `connect` to assemble the
/// topology, then call `build()` to validate and freeze it. Equipment is
/// kept in insertion order, which is the order the solver sweeps it in.
#[derive(Debug, Default)]
pub struct FlowsheetBuilder {
    equipment: Vec<Equipment>,
    streams: Vec<Stream>,
    connections: Vec<Connection>,
}

impl FlowsheetBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equipment unit with its kind/config.
    pub fn add_equipment(&mut self, equipment_id: impl Into<String>, kind: EquipmentKind) {
        self.equipment.push(Equipment {
            equipment_id: equipment_id.into(),
            kind,
            inlet_streams: Vec::new(),
            outlet_streams: Vec::new(),
        });
    }

    /// Add a stream with default state and return a mutable handle for
    /// setting initial conditions.
    pub fn add_stream(&mut self, stream_id: impl Into<String>) -> &mut Stream {
        self.streams.push(Stream::new(stream_id));
        self.streams.last_mut().expect("just pushed")
    }

    /// Wire a stream between two equipment ports.
    ///
    /// Creates the stream if it does not exist yet. Either endpoint may use
    /// an empty equipment ID for a terminal stream (plant boundary). The
    /// stream's routing metadata, the equipment inlet/outlet lists and the
    /// connections table are all kept in sync.
    pub fn connect(
        &mut self,
        stream_id: &str,
        source: (&str, &str),
        target: (&str, &str),
    ) -> &mut Self {
        if self.streams.iter().all(|s| s.stream_id != stream_id) {
            self.add_stream(stream_id.to_string());
        }

        let (source_equipment, source_port) = source;
        let (target_equipment, target_port) = target;

        let stream = self
            .streams
            .iter_mut()
            .find(|s| s.stream_id == stream_id)
            .expect("stream exists");
        stream.source_equipment = source_equipment.to_string();
        stream.source_port = source_port.to_string();
        stream.target_equipment = target_equipment.to_string();
        stream.target_port = target_port.to_string();

        if let Some(unit) = self
            .equipment
            .iter_mut()
            .find(|e| e.equipment_id == source_equipment)
        {
            if !unit.outlet_streams.iter().any(|s| s == stream_id) {
                unit.outlet_streams.push(stream_id.to_string());
            }
        }
        if let Some(unit) = self
            .equipment
            .iter_mut()
            .find(|e| e.equipment_id == target_equipment)
        {
            if !unit.inlet_streams.iter().any(|s| s == stream_id) {
                unit.inlet_streams.push(stream_id.to_string());
            }
        }

        self.connections.push(Connection {
            connection_id: format!("conn_{}", self.connections.len() + 1),
            source_equipment: source_equipment.to_string(),
            source_port: source_port.to_string(),
            target_equipment: target_equipment.to_string(),
            target_port: target_port.to_string(),
            stream_id: stream_id.to_string(),
        });

        self
    }

    /// Set initial flow on a stream (convenience for test fixtures and
    /// hand-built sheets).
    pub fn set_flow(&mut self, stream_id: &str, flow_rate: f64) -> &mut Self {
        if let Some(stream) = self.streams.iter_mut().find(|s| s.stream_id == stream_id) {
            stream.flow_rate = flow_rate;
        }
        self
    }

    /// Validate and freeze into a `Flowsheet`.
    ///
    /// Builds are checked permissively: duplicate IDs fail, dangling
    /// references are tolerated (the solver skips them).
    pub fn build(self) -> Result<Flowsheet, ValidationError> {
        let flowsheet = Flowsheet {
            equipment: self.equipment,
            streams: self.streams,
            connections: self.connections,
        };
        validate_flowsheet(&flowsheet, Strictness::Permissive)?;
        Ok(flowsheet)
    }
}

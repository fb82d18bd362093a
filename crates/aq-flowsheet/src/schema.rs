//! Flowsheet schema definitions.
//!
//! This is the persisted shape: equipment, streams and connections in
//! declaration order. Declaration order matters — the solver sweeps
//! equipment in exactly this order.

use aq_unitops::feed_tank::FeedTankInputs;
use aq_unitops::ultrafiltration::MembraneType;
use serde::{Deserialize, Serialize};

/// A process stream carrying flow between two equipment ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub stream_id: String,
    /// Flow rate (m³/h)
    #[serde(default)]
    pub flow_rate: f64,
    /// Pressure (bar)
    #[serde(default = "default_pressure")]
    pub pressure: f64,
    /// Temperature (°C)
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Suspended solids (g/L)
    #[serde(default)]
    pub concentration: f64,
    #[serde(default)]
    pub source_equipment: String,
    #[serde(default)]
    pub target_equipment: String,
    #[serde(default)]
    pub source_port: String,
    #[serde(default)]
    pub target_port: String,
}

impl Stream {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            flow_rate: 0.0,
            pressure: default_pressure(),
            temperature: default_temperature(),
            concentration: 0.0,
            source_equipment: String::new(),
            target_equipment: String::new(),
            source_port: String::new(),
            target_port: String::new(),
        }
    }
}

fn default_pressure() -> f64 {
    1.0
}

fn default_temperature() -> f64 {
    25.0
}

/// An equipment unit: its kind/config plus declared stream connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub equipment_id: String,
    #[serde(flatten)]
    pub kind: EquipmentKind,
    #[serde(default)]
    pub inlet_streams: Vec<String>,
    #[serde(default)]
    pub outlet_streams: Vec<String>,
}

/// Closed set of equipment kinds, each with its own config payload.
///
/// Serialized as `{"equipment_type": ..., "config": {...}}`. An unknown
/// `equipment_type` is a deserialization error; `generic` is the explicit
/// pass-through kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "equipment_type", content = "config", rename_all = "snake_case")]
pub enum EquipmentKind {
    Ultrafiltration(UfConfig),
    FeedTank(FeedTankInputs),
    Tank(PassThroughConfig),
    Pump(PumpConfig),
    Generic(PassThroughConfig),
}

impl EquipmentKind {
    /// The wire name of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            EquipmentKind::Ultrafiltration(_) => "ultrafiltration",
            EquipmentKind::FeedTank(_) => "feed_tank",
            EquipmentKind::Tank(_) => "tank",
            EquipmentKind::Pump(_) => "pump",
            EquipmentKind::Generic(_) => "generic",
        }
    }
}

/// Ultrafiltration skid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UfConfig {
    /// Explicit feed flow override (m³/h); when absent the solver injects
    /// the summed inlet flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_flow: Option<f64>,
    /// Membrane area (m²)
    pub membrane_area: f64,
    /// Transmembrane pressure (bar)
    pub transmembrane_pressure: f64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Feed suspended solids (g/L)
    #[serde(default = "default_feed_concentration")]
    pub feed_concentration: f64,
    /// Crossflow velocity (m/s)
    #[serde(default = "default_crossflow_velocity")]
    pub crossflow_velocity: f64,
    /// Accumulated operating time (h)
    #[serde(default)]
    pub operating_hours: f64,
    #[serde(default)]
    pub membrane_type: MembraneType,
}

fn default_feed_concentration() -> f64 {
    0.1
}

fn default_crossflow_velocity() -> f64 {
    2.0
}

/// Tank/generic pass-through configuration: outlet conditions only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassThroughConfig {
    /// Outlet pressure (bar)
    pub pressure: f64,
    /// Outlet temperature (°C)
    pub temperature: f64,
}

impl Default for PassThroughConfig {
    fn default() -> Self {
        Self {
            pressure: default_pressure(),
            temperature: default_temperature(),
        }
    }
}

/// Pump configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PumpConfig {
    /// Pump efficiency (0, 1]
    pub efficiency: f64,
    /// Discharge pressure (bar)
    pub discharge_pressure: f64,
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            efficiency: 0.75,
            discharge_pressure: 3.0,
        }
    }
}

/// Auxiliary connection record. Part of the persisted shape; the solver
/// routes through the streams' own port metadata instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub connection_id: String,
    #[serde(default)]
    pub source_equipment: String,
    #[serde(default)]
    pub source_port: String,
    #[serde(default)]
    pub target_equipment: String,
    #[serde(default)]
    pub target_port: String,
    #[serde(default)]
    pub stream_id: String,
}

/// A complete flowsheet document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flowsheet {
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub streams: Vec<Stream>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Flowsheet {
    pub fn stream(&self, stream_id: &str) -> Option<&Stream> {
        self.streams.iter().find(|s| s.stream_id == stream_id)
    }

    pub fn equipment_unit(&self, equipment_id: &str) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.equipment_id == equipment_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipment_kind_wire_names() {
        let kind = EquipmentKind::Tank(PassThroughConfig::default());
        assert_eq!(kind.type_name(), "tank");
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["equipment_type"], "tank");
        assert!(json["config"].is_object());
    }

    #[test]
    fn unknown_equipment_type_is_rejected() {
        let json = r#"{"equipment_type": "flux_capacitor", "config": {}}"#;
        assert!(serde_json::from_str::<EquipmentKind>(json).is_err());
    }

    #[test]
    fn stream_defaults() {
        let stream: Stream = serde_json::from_str(r#"{"stream_id": "feed_1"}"#).unwrap();
        assert_eq!(stream.flow_rate, 0.0);
        assert_eq!(stream.pressure, 1.0);
        assert_eq!(stream.temperature, 25.0);
        assert!(stream.source_port.is_empty());
    }

    #[test]
    fn uf_config_requires_area_and_tmp() {
        let missing = r#"{"equipment_type": "ultrafiltration", "config": {"membrane_area": 500.0}}"#;
        assert!(serde_json::from_str::<EquipmentKind>(missing).is_err());

        let full = r#"{
            "equipment_type": "ultrafiltration",
            "config": {"membrane_area": 500.0, "transmembrane_pressure": 1.0}
        }"#;
        let kind: EquipmentKind = serde_json::from_str(full).unwrap();
        match kind {
            EquipmentKind::Ultrafiltration(cfg) => {
                assert_eq!(cfg.feed_flow, None);
                assert_eq!(cfg.crossflow_velocity, 2.0);
            }
            _ => panic!("wrong kind"),
        }
    }
}

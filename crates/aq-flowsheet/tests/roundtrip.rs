use aq_flowsheet::schema::*;
use aq_flowsheet::{FlowsheetBuilder, load_json, load_yaml, save_json, save_yaml};
use aq_unitops::feed_tank::FeedTankInputs;

fn sample_flowsheet() -> Flowsheet {
    let mut builder = FlowsheetBuilder::new();
    builder.add_equipment(
        "FEED_TANK-001",
        EquipmentKind::FeedTank(FeedTankInputs {
            inflow_rate: 100.0,
            ..FeedTankInputs::default()
        }),
    );
    builder.add_equipment(
        "UF-001",
        EquipmentKind::Ultrafiltration(UfConfig {
            feed_flow: None,
            membrane_area: 500.0,
            transmembrane_pressure: 1.2,
            temperature: 25.0,
            feed_concentration: 0.1,
            crossflow_velocity: 2.0,
            operating_hours: 0.0,
            membrane_type: aq_unitops::MembraneType::Pvdf,
        }),
    );
    builder.connect("feed_1", ("FEED_TANK-001", "outlet"), ("UF-001", "feed_inlet"));
    builder.connect("permeate_1", ("UF-001", "permeate_outlet"), ("", ""));
    builder.connect("concentrate_1", ("UF-001", "concentrate_outlet"), ("", ""));
    builder.set_flow("feed_1", 100.0);
    builder.build().unwrap()
}

#[test]
fn roundtrip_yaml_empty_flowsheet() {
    let flowsheet = Flowsheet::default();

    let path = std::env::temp_dir().join("aq_flowsheet_roundtrip_empty.yaml");
    save_yaml(&path, &flowsheet).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(flowsheet, loaded);
}

#[test]
fn roundtrip_yaml_uf_train() {
    let flowsheet = sample_flowsheet();

    let path = std::env::temp_dir().join("aq_flowsheet_roundtrip_uf.yaml");
    save_yaml(&path, &flowsheet).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(flowsheet, loaded);
    // Sweep order survives persistence
    assert_eq!(loaded.equipment[0].equipment_id, "FEED_TANK-001");
    assert_eq!(loaded.equipment[1].equipment_id, "UF-001");
}

#[test]
fn roundtrip_json_uf_train() {
    let flowsheet = sample_flowsheet();

    let path = std::env::temp_dir().join("aq_flowsheet_roundtrip_uf.json");
    save_json(&path, &flowsheet).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(flowsheet, loaded);
}

#[test]
fn equipment_type_tag_is_on_the_wire() {
    let flowsheet = sample_flowsheet();
    let json = serde_json::to_value(&flowsheet).unwrap();

    assert_eq!(json["equipment"][0]["equipment_type"], "feed_tank");
    assert_eq!(json["equipment"][1]["equipment_type"], "ultrafiltration");
    assert_eq!(
        json["equipment"][1]["config"]["membrane_area"]
            .as_f64()
            .unwrap(),
        500.0
    );
    assert_eq!(json["streams"][0]["stream_id"], "feed_1");
}

#[test]
fn save_rejects_duplicate_ids() {
    let mut flowsheet = sample_flowsheet();
    flowsheet.streams.push(Stream::new("feed_1"));

    let path = std::env::temp_dir().join("aq_flowsheet_roundtrip_dup.yaml");
    assert!(save_yaml(&path, &flowsheet).is_err());
}

//! Port-name routing of calculator outputs onto outlet streams.

use aq_flowsheet::Stream;
use aq_unitops::types::{FieldValue, UnitData};

/// Update one outlet stream from a calculator's output data.
///
/// Flow assignment follows the port-name priority order; streams whose
/// port matches none of the named outputs fall back to the generic
/// `outlet_flow` field, or are left unchanged. Pressure and temperature
/// are then overlaid from the generic outlet fields when present.
pub fn apply_outlet_routing(stream: &mut Stream, data: &UnitData) {
    let number = |key: &str| data.get(key).and_then(FieldValue::as_number);

    if stream.source_port == "permeate_outlet"
        && let Some(flow) = number("permeate_flow")
    {
        stream.flow_rate = flow;
    } else if stream.source_port == "concentrate_outlet"
        && let Some(flow) = number("concentrate_flow")
    {
        stream.flow_rate = flow;
    } else if stream.source_port == "discharge"
        && let Some(flow) = number("discharge_flow")
    {
        stream.flow_rate = flow;
        if let Some(pressure) = number("discharge_pressure") {
            stream.pressure = pressure;
        }
    } else if let Some(flow) = number("outlet_flow") {
        stream.flow_rate = flow;
    }

    if let Some(pressure) = number("outlet_pressure") {
        stream.pressure = pressure;
    }
    if let Some(temperature) = number("outlet_temperature") {
        stream.temperature = temperature;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, f64)]) -> UnitData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::Number(*v)))
            .collect()
    }

    fn stream_with_port(port: &str) -> Stream {
        let mut stream = Stream::new("s");
        stream.source_port = port.to_string();
        stream
    }

    #[test]
    fn permeate_port_takes_permeate_flow() {
        let mut stream = stream_with_port("permeate_outlet");
        apply_outlet_routing(
            &mut stream,
            &data(&[("permeate_flow", 80.0), ("outlet_flow", 999.0)]),
        );
        assert_eq!(stream.flow_rate, 80.0);
    }

    #[test]
    fn concentrate_port_takes_concentrate_flow() {
        let mut stream = stream_with_port("concentrate_outlet");
        apply_outlet_routing(&mut stream, &data(&[("concentrate_flow", 20.0)]));
        assert_eq!(stream.flow_rate, 20.0);
    }

    #[test]
    fn discharge_port_copies_pressure_too() {
        let mut stream = stream_with_port("discharge");
        apply_outlet_routing(
            &mut stream,
            &data(&[("discharge_flow", 50.0), ("discharge_pressure", 3.5)]),
        );
        assert_eq!(stream.flow_rate, 50.0);
        assert_eq!(stream.pressure, 3.5);
    }

    #[test]
    fn unmatched_port_falls_back_to_outlet_flow() {
        let mut stream = stream_with_port("outlet");
        apply_outlet_routing(
            &mut stream,
            &data(&[
                ("outlet_flow", 42.0),
                ("outlet_pressure", 2.0),
                ("outlet_temperature", 30.0),
            ]),
        );
        assert_eq!(stream.flow_rate, 42.0);
        assert_eq!(stream.pressure, 2.0);
        assert_eq!(stream.temperature, 30.0);
    }

    #[test]
    fn no_matching_fields_leaves_stream_unchanged() {
        let mut stream = stream_with_port("outlet");
        stream.flow_rate = 7.0;
        apply_outlet_routing(&mut stream, &data(&[("power_consumption", 11.0)]));
        assert_eq!(stream.flow_rate, 7.0);
        assert_eq!(stream.pressure, 1.0);
    }

    #[test]
    fn permeate_port_without_permeate_field_uses_generic() {
        // Priority list falls through to outlet_flow when the named field
        // is absent from the result.
        let mut stream = stream_with_port("permeate_outlet");
        apply_outlet_routing(&mut stream, &data(&[("outlet_flow", 12.0)]));
        assert_eq!(stream.flow_rate, 12.0);
    }
}

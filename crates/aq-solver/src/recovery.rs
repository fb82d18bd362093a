//! Overall system recovery metric.

use aq_flowsheet::Stream;
use std::collections::BTreeMap;

/// Overall recovery = product flow / feed flow × 100.
///
/// This is a naming-convention heuristic, not a topology calculation:
/// streams whose ID contains "feed" (case-insensitive) count as feed,
/// otherwise those containing "product" or "permeate" count as product.
/// Streams must be named accordingly for the metric to mean anything.
/// Returns 0.0 when there is no feed flow.
pub fn system_recovery(streams: &BTreeMap<String, Stream>) -> f64 {
    let mut total_feed = 0.0;
    let mut total_product = 0.0;

    for stream in streams.values() {
        let id = stream.stream_id.to_lowercase();
        if id.contains("feed") {
            total_feed += stream.flow_rate;
        } else if id.contains("product") || id.contains("permeate") {
            total_product += stream.flow_rate;
        }
    }

    if total_feed > 0.0 {
        total_product / total_feed * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn streams(pairs: &[(&str, f64)]) -> BTreeMap<String, Stream> {
        pairs
            .iter()
            .map(|(id, flow)| {
                let mut stream = Stream::new(id.to_string());
                stream.flow_rate = *flow;
                (id.to_string(), stream)
            })
            .collect()
    }

    #[test]
    fn uf_train_recovery() {
        let streams = streams(&[
            ("feed_1", 100.0),
            ("permeate_1", 80.0),
            ("concentrate_1", 20.0),
        ]);
        assert_eq!(system_recovery(&streams), 80.0);
    }

    #[test]
    fn no_feed_means_zero() {
        let streams = streams(&[("permeate_1", 80.0)]);
        assert_eq!(system_recovery(&streams), 0.0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let streams = streams(&[("FEED_A", 50.0), ("Product_B", 25.0)]);
        assert_eq!(system_recovery(&streams), 50.0);
    }

    #[test]
    fn feed_match_wins_over_product_match() {
        // A stream named for both counts as feed only.
        let streams = streams(&[("feed_to_product", 100.0), ("permeate_1", 30.0)]);
        assert_eq!(system_recovery(&streams), 30.0);
    }
}

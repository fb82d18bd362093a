//! Owned stream state for one solve.
//!
//! The registry is the solver's exclusive working buffer: stream states in
//! declaration order with O(1) lookup by ID. One registry per solve call;
//! nothing is shared between solves.

use aq_flowsheet::{Flowsheet, Stream};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone)]
pub struct StreamRegistry {
    /// Streams in declaration order.
    streams: Vec<Stream>,
    /// Reverse lookup: stream_id -> position in `streams`.
    index: HashMap<String, usize>,
}

impl StreamRegistry {
    /// Build a registry from a flowsheet's streams.
    ///
    /// On duplicate IDs the last declaration wins, matching map-insertion
    /// semantics of the persisted shape.
    pub fn from_flowsheet(flowsheet: &Flowsheet) -> Self {
        let mut streams: Vec<Stream> = Vec::with_capacity(flowsheet.streams.len());
        let mut index = HashMap::with_capacity(flowsheet.streams.len());

        for stream in &flowsheet.streams {
            match index.get(&stream.stream_id) {
                Some(&pos) => streams[pos] = stream.clone(),
                None => {
                    index.insert(stream.stream_id.clone(), streams.len());
                    streams.push(stream.clone());
                }
            }
        }

        Self { streams, index }
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn contains(&self, stream_id: &str) -> bool {
        self.index.contains_key(stream_id)
    }

    pub fn get(&self, stream_id: &str) -> Option<&Stream> {
        self.index.get(stream_id).map(|&pos| &self.streams[pos])
    }

    pub fn get_mut(&mut self, stream_id: &str) -> Option<&mut Stream> {
        let pos = *self.index.get(stream_id)?;
        Some(&mut self.streams[pos])
    }

    /// Iterate streams in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Stream> {
        self.streams.iter()
    }

    /// Flow rates in declaration order, for convergence snapshots.
    ///
    /// Streams are never added or removed mid-solve, so positions line up
    /// across snapshots.
    pub fn flow_snapshot(&self) -> Vec<f64> {
        self.streams.iter().map(|s| s.flow_rate).collect()
    }

    /// Consume into the result-facing map shape.
    pub fn into_map(self) -> BTreeMap<String, Stream> {
        self.streams
            .into_iter()
            .map(|s| (s.stream_id.clone(), s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_flowsheet::FlowsheetBuilder;

    fn registry_of(ids: &[&str]) -> StreamRegistry {
        let mut builder = FlowsheetBuilder::new();
        for id in ids {
            builder.add_stream(id.to_string());
        }
        StreamRegistry::from_flowsheet(&builder.build().unwrap())
    }

    #[test]
    fn preserves_declaration_order() {
        let registry = registry_of(&["z_9", "a_1", "m_5"]);
        let order: Vec<_> = registry.iter().map(|s| s.stream_id.as_str()).collect();
        assert_eq!(order, ["z_9", "a_1", "m_5"]);
    }

    #[test]
    fn lookup_and_mutation() {
        let mut registry = registry_of(&["feed_1", "out_1"]);
        registry.get_mut("feed_1").unwrap().flow_rate = 42.0;
        assert_eq!(registry.get("feed_1").unwrap().flow_rate, 42.0);
        assert!(registry.get("missing").is_none());
        assert!(registry.contains("out_1"));
    }

    #[test]
    fn snapshot_lines_up_with_order() {
        let mut registry = registry_of(&["a", "b"]);
        registry.get_mut("b").unwrap().flow_rate = 7.0;
        assert_eq!(registry.flow_snapshot(), vec![0.0, 7.0]);
    }

    #[test]
    fn duplicate_ids_last_wins() {
        let mut flowsheet = Flowsheet::default();
        let mut first = Stream::new("s");
        first.flow_rate = 1.0;
        let mut second = Stream::new("s");
        second.flow_rate = 2.0;
        flowsheet.streams = vec![first, second];

        let registry = StreamRegistry::from_flowsheet(&flowsheet);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("s").unwrap().flow_rate, 2.0);
    }
}

//! Observer protocol for [`crate::contraction_graph::DynamicContractionGraph`].
//!
//! Four hooks fire, in order, around every `contract_edge` call:
//! `contract_edge -> merge_nodes -> (merge_edges)* -> contract_edge_done`.
//! `merge_edges` fires zero or more times, once per parallel edge coalesced
//! while shifting the dead node's adjacency onto the alive node, in
//! ascending order of the dead node's stored adjacency.

/// Observes edge contractions as they happen.
pub trait Callback {
    fn contract_edge(&mut self, edge: usize);
    fn merge_nodes(&mut self, alive: usize, dead: usize);
    fn merge_edges(&mut self, alive_edge: usize, dead_edge: usize);
    fn contract_edge_done(&mut self, edge: usize);

    /// Called when the owning contraction graph resets to the base graph.
    fn reset(&mut self) {}
}

/// A callback that does nothing, for callers that only want the contraction
/// machinery itself (e.g. tests of [`crate::contraction_graph`] in isolation).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCallback;

impl Callback for NullCallback {
    fn contract_edge(&mut self, _edge: usize) {}
    fn merge_nodes(&mut self, _alive: usize, _dead: usize) {}
    fn merge_edges(&mut self, _alive_edge: usize, _dead_edge: usize) {}
    fn contract_edge_done(&mut self, _edge: usize) {}
}

/// The "WithSets" composite observer: wraps an inner callback and maintains
/// ordered sets of live node and edge ids alongside it, so callers can
/// iterate live ids in O(live count) instead of scanning the full id range.
///
/// Every hook is forwarded to the wrapped callback after this one updates
/// its own bookkeeping, mirroring the original's `InnerCallback` /
/// `EdgeContractionGraphWithSets` pairing.
#[derive(Debug, Clone)]
pub struct LiveSetCallback<C: Callback> {
    inner: C,
    live_nodes: std::collections::BTreeSet<usize>,
    live_edges: std::collections::BTreeSet<usize>,
}

impl<C: Callback> LiveSetCallback<C> {
    /// Wraps `inner`, seeding the live sets from every node/edge id in
    /// `[0, node_upper_bound]` / `[0, edge_upper_bound]`.
    pub fn new(inner: C, node_upper_bound: usize, edge_upper_bound: usize) -> Self {
        let mut cb = LiveSetCallback {
            inner,
            live_nodes: std::collections::BTreeSet::new(),
            live_edges: std::collections::BTreeSet::new(),
        };
        cb.seed(node_upper_bound, edge_upper_bound);
        cb
    }

    fn seed(&mut self, node_upper_bound: usize, edge_upper_bound: usize) {
        self.live_nodes.clear();
        self.live_nodes.extend(0..=node_upper_bound);
        self.live_edges.clear();
        self.live_edges.extend(0..=edge_upper_bound);
    }

    pub fn live_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.live_nodes.iter().copied()
    }

    pub fn live_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.live_edges.iter().copied()
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }
}

impl<C: Callback> Callback for LiveSetCallback<C> {
    fn contract_edge(&mut self, edge: usize) {
        self.live_edges.remove(&edge);
        self.inner.contract_edge(edge);
    }

    fn merge_nodes(&mut self, alive: usize, dead: usize) {
        self.live_nodes.remove(&dead);
        self.inner.merge_nodes(alive, dead);
    }

    fn merge_edges(&mut self, alive_edge: usize, dead_edge: usize) {
        self.live_edges.remove(&dead_edge);
        self.inner.merge_edges(alive_edge, dead_edge);
    }

    fn contract_edge_done(&mut self, edge: usize) {
        self.inner.contract_edge_done(edge);
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCallback {
        events: Vec<String>,
    }

    impl Callback for RecordingCallback {
        fn contract_edge(&mut self, edge: usize) {
            self.events.push(format!("contract_edge({edge})"));
        }
        fn merge_nodes(&mut self, alive: usize, dead: usize) {
            self.events.push(format!("merge_nodes({alive},{dead})"));
        }
        fn merge_edges(&mut self, alive_edge: usize, dead_edge: usize) {
            self.events
                .push(format!("merge_edges({alive_edge},{dead_edge})"));
        }
        fn contract_edge_done(&mut self, edge: usize) {
            self.events.push(format!("contract_edge_done({edge})"));
        }
    }

    #[test]
    fn live_set_callback_forwards_and_tracks() {
        let mut cb = LiveSetCallback::new(RecordingCallback::default(), 2, 2);
        cb.contract_edge(0);
        cb.merge_nodes(0, 1);
        cb.merge_edges(2, 1);
        cb.contract_edge_done(0);

        assert_eq!(cb.live_nodes().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(cb.live_edges().collect::<Vec<_>>(), vec![2]);
        assert_eq!(
            cb.inner().events,
            vec![
                "contract_edge(0)".to_string(),
                "merge_nodes(0,1)".to_string(),
                "merge_edges(2,1)".to_string(),
                "contract_edge_done(0)".to_string(),
            ]
        );
    }
}

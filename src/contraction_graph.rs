//! A mutable view over a [`BaseGraph`] that supports online edge contraction
//! with parallel-edge coalescing, backed by a [`DisjointSets`] for node
//! identity.
//!
//! This is the reusable core abstraction multicut algorithms in general
//! build on; the CGC driver in [`crate::driver`] does not use it directly —
//! it only needs the submodel machinery and a standalone `DisjointSets` for
//! label compression (see [`crate::driver::CgcDriver`]) — but it shares the
//! callback-driven design with [`crate::submodel::SubmodelOptimizer`] and is
//! kept here as the general-purpose building block.

use std::collections::BTreeMap;

use crate::callback::Callback;
use crate::disjoint_sets::DisjointSets;
use crate::graph::{BaseGraph, EdgeMap, NodeMap};

/// Dynamic, contractible view over a static `G: BaseGraph`.
pub struct DynamicContractionGraph<'g, G: BaseGraph, C: Callback> {
    graph: &'g G,
    callback: C,
    adj: NodeMap<BTreeMap<usize, usize>>,
    endpoints: EdgeMap<(usize, usize)>,
    edge_alive: EdgeMap<bool>,
    ufd: DisjointSets,
    live_node_count: usize,
    live_edge_count: usize,
}

impl<'g, G: BaseGraph, C: Callback> DynamicContractionGraph<'g, G, C> {
    pub fn new(graph: &'g G, callback: C) -> Self {
        let node_ub = graph.node_id_upper_bound();
        let edge_ub = graph.edge_id_upper_bound();
        let mut dcg = DynamicContractionGraph {
            graph,
            callback,
            adj: NodeMap::new(node_ub),
            endpoints: EdgeMap::filled(edge_ub, (0, 0)),
            edge_alive: EdgeMap::filled(edge_ub, false),
            ufd: DisjointSets::new(node_ub + 1),
            live_node_count: 0,
            live_edge_count: 0,
        };
        dcg.reset();
        dcg
    }

    /// Restores state to exactly match the base graph.
    pub fn reset(&mut self) {
        self.ufd.reset(self.graph.node_id_upper_bound() + 1);
        self.live_node_count = self.graph.number_of_nodes();
        self.live_edge_count = self.graph.number_of_edges();

        for node in self.graph.nodes() {
            let dadj = &mut self.adj[node];
            dadj.clear();
            for (neighbor, edge) in self.graph.adjacency(node) {
                dadj.insert(neighbor, edge);
            }
        }
        for edge in self.graph.edges() {
            self.endpoints[edge] = self.graph.uv(edge);
            self.edge_alive[edge] = true;
        }
        self.callback.reset();
    }

    pub fn base_graph(&self) -> &'g G {
        self.graph
    }

    pub fn ufd(&self) -> &DisjointSets {
        &self.ufd
    }

    pub fn ufd_mut(&mut self) -> &mut DisjointSets {
        &mut self.ufd
    }

    pub fn callback(&self) -> &C {
        &self.callback
    }

    pub fn callback_mut(&mut self) -> &mut C {
        &mut self.callback
    }

    pub fn number_of_nodes(&self) -> usize {
        self.live_node_count
    }

    pub fn number_of_edges(&self) -> usize {
        self.live_edge_count
    }

    pub fn node_id_upper_bound(&self) -> usize {
        self.graph.node_id_upper_bound()
    }

    pub fn edge_id_upper_bound(&self) -> usize {
        self.graph.edge_id_upper_bound()
    }

    pub fn uv(&self, edge: usize) -> (usize, usize) {
        self.endpoints[edge]
    }

    pub fn u(&self, edge: usize) -> usize {
        self.endpoints[edge].0
    }

    pub fn v(&self, edge: usize) -> usize {
        self.endpoints[edge].1
    }

    /// `(neighbor, edge)` pairs of `node`, sorted by neighbor id.
    pub fn adjacency(&self, node: usize) -> Vec<(usize, usize)> {
        self.adj[node].iter().map(|(&n, &e)| (n, e)).collect()
    }

    /// The current representative of `node`'s dynamic identity.
    pub fn find_representative_node(&mut self, node: usize) -> usize {
        self.ufd.find(node)
    }

    /// The representative node both endpoints of a previously-contracted
    /// edge now share. Panics (precondition violation) if the edge's stored
    /// endpoints are not currently in the same set — i.e. if it was never
    /// actually collapsed.
    pub fn node_of_dead_edge(&mut self, dead_edge: usize) -> usize {
        let (u, v) = self.endpoints[dead_edge];
        let ru = self.ufd.find(u);
        let rv = self.ufd.find(v);
        assert_eq!(
            ru, rv,
            "precondition violation: edge {dead_edge} has not collapsed to a single node"
        );
        ru
    }

    /// Contracts `edge_to_contract`, merging its two endpoints into a single
    /// dynamic node and coalescing any resulting parallel edges.
    ///
    /// Fatal (panics) if the edge is not live, or if its endpoints are
    /// already in the same dynamic node.
    pub fn contract_edge(&mut self, edge_to_contract: usize) {
        assert!(
            self.edge_alive[edge_to_contract],
            "precondition violation: edge {edge_to_contract} is not live"
        );

        self.callback.contract_edge(edge_to_contract);
        self.edge_alive[edge_to_contract] = false;
        self.live_edge_count -= 1;

        let (u, v) = self.endpoints[edge_to_contract];
        assert_ne!(
            u, v,
            "precondition violation: contracting edge {edge_to_contract} whose endpoints already share a node"
        );

        self.ufd.merge(u, v);
        self.live_node_count -= 1;

        let alive = self.ufd.find(u);
        debug_assert!(alive == u || alive == v);
        let dead = if alive == u { v } else { u };

        self.callback.merge_nodes(alive, dead);

        self.adj[alive].remove(&dead);
        self.adj[dead].remove(&alive);

        let dead_adjacency: Vec<(usize, usize)> =
            self.adj[dead].iter().map(|(&n, &e)| (n, e)).collect();

        for (w, e_dead) in dead_adjacency {
            if let Some(&e_alive) = self.adj[alive].get(&w) {
                // parallel edge: coalesce e_dead into e_alive.
                self.callback.merge_edges(e_alive, e_dead);
                self.edge_alive[e_dead] = false;
                self.live_edge_count -= 1;
                self.adj[w].remove(&dead);
            } else {
                self.adj[alive].insert(w, e_dead);
                self.adj[w].remove(&dead);
                self.adj[w].insert(alive, e_dead);
                self.relabel_edge(e_dead, dead, alive);
            }
        }

        self.callback.contract_edge_done(edge_to_contract);
    }

    fn relabel_edge(&mut self, edge: usize, dead_node: usize, alive_node: usize) {
        let uv = &mut self.endpoints[edge];
        if uv.0 == dead_node {
            uv.0 = alive_node;
        } else if uv.1 == dead_node {
            uv.1 = alive_node;
        } else {
            unreachable!("invariant violation: edge {edge} does not touch node {dead_node}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::NullCallback;
    use crate::graph::UndirectedGraph;

    fn triangle() -> UndirectedGraph {
        let mut g = UndirectedGraph::new();
        let n0 = g.add_node();
        let n1 = g.add_node();
        let n2 = g.add_node();
        g.add_edge(n0, n1, 1.0); // e0
        g.add_edge(n1, n2, 1.0); // e1
        g.add_edge(n0, n2, 1.0); // e2
        g
    }

    #[derive(Default)]
    struct RecordingCallback {
        events: Vec<String>,
    }
    impl Callback for RecordingCallback {
        fn contract_edge(&mut self, edge: usize) {
            self.events.push(format!("contractEdge({edge})"));
        }
        fn merge_nodes(&mut self, alive: usize, dead: usize) {
            self.events.push(format!("mergeNodes({alive},{dead})"));
        }
        fn merge_edges(&mut self, alive_edge: usize, dead_edge: usize) {
            self.events
                .push(format!("mergeEdges({alive_edge},{dead_edge})"));
        }
        fn contract_edge_done(&mut self, edge: usize) {
            self.events.push(format!("contractEdgeDone({edge})"));
        }
    }

    #[test]
    fn s1_triangle_contraction_coalesces_parallel_edge() {
        let g = triangle();
        let mut dcg = DynamicContractionGraph::new(&g, RecordingCallback::default());

        dcg.contract_edge(0); // e0 = {0,1}

        assert_eq!(dcg.number_of_nodes(), 2);
        assert_eq!(dcg.number_of_edges(), 1);
        assert_eq!(dcg.find_representative_node(0), 0);
        assert_eq!(dcg.find_representative_node(1), 0);

        let adj0 = dcg.adjacency(0);
        assert_eq!(adj0, vec![(2, 2)]); // single live edge to node 2, id e2

        assert_eq!(
            dcg.callback().events,
            vec![
                "contractEdge(0)".to_string(),
                "mergeNodes(0,1)".to_string(),
                "mergeEdges(2,1)".to_string(),
                "contractEdgeDone(0)".to_string(),
            ]
        );
    }

    #[test]
    fn s2_chain_contraction_collapses_to_one_node() {
        let mut g = UndirectedGraph::new();
        let nodes: Vec<_> = (0..4).map(|_| g.add_node()).collect();
        g.add_edge(nodes[0], nodes[1], 1.0); // e0
        g.add_edge(nodes[1], nodes[2], 1.0); // e1
        g.add_edge(nodes[2], nodes[3], 1.0); // e2

        let mut dcg = DynamicContractionGraph::new(&g, NullCallback);
        dcg.contract_edge(1);
        dcg.contract_edge(0);
        dcg.contract_edge(2);

        assert_eq!(dcg.number_of_nodes(), 1);
        assert_eq!(dcg.number_of_edges(), 0);
        for n in 0..4 {
            assert_eq!(dcg.find_representative_node(n), 0);
        }
    }

    #[test]
    fn reset_restores_base_graph_counts() {
        let g = triangle();
        let mut dcg = DynamicContractionGraph::new(&g, NullCallback);
        dcg.contract_edge(0);
        dcg.reset();

        assert_eq!(dcg.number_of_nodes(), 3);
        assert_eq!(dcg.number_of_edges(), 3);
        assert_eq!(dcg.adjacency(0).len(), 2);
        assert_eq!(dcg.find_representative_node(1), 1);
    }

    #[test]
    #[should_panic]
    fn contracting_self_merged_edge_panics() {
        let g = triangle();
        let mut dcg = DynamicContractionGraph::new(&g, NullCallback);
        dcg.contract_edge(0); // merges 0 and 1
        dcg.contract_edge(0); // already dead, precondition violation
    }

    #[test]
    fn node_of_dead_edge_resolves_to_alive_root() {
        let g = triangle();
        let mut dcg = DynamicContractionGraph::new(&g, NullCallback);
        dcg.contract_edge(0); // e0 = {0,1} is now dead, both in set rooted at 0
        assert_eq!(dcg.node_of_dead_edge(0), 0);
    }

    #[test]
    fn random_contractions_preserve_adjacency_invariants_and_reset_round_trips() {
        use crate::callback::LiveSetCallback;

        for seed in [1u64, 2, 3, 4, 5] {
            let (g, _weights) = crate::testing::random_weighted_graph(12, 6, seed);
            let node_ub = g.node_id_upper_bound();
            let edge_ub = g.edge_id_upper_bound();
            let mut dcg =
                DynamicContractionGraph::new(&g, LiveSetCallback::new(NullCallback, node_ub, edge_ub));

            let mut step = 0usize;
            loop {
                let live: Vec<usize> = dcg.callback().live_edges().collect();
                if live.is_empty() || step >= 2 * (edge_ub + 1) {
                    break;
                }
                let edge = live[step % live.len()];
                dcg.contract_edge(edge);
                step += 1;
            }

            // P1 (adjacency symmetry) and P2 (endpoints-adjacency consistency).
            for n in 0..=node_ub {
                for (m, e) in dcg.adjacency(n) {
                    assert!(
                        dcg.adjacency(m).contains(&(n, e)),
                        "seed {seed}: adjacency({n}) has ({m},{e}) but adjacency({m}) doesn't have ({n},{e})"
                    );
                    let (u, v) = dcg.uv(e);
                    assert!(u == n || v == n, "seed {seed}: endpoints of {e} don't touch {n}");
                }
            }

            // P4 (no parallel edges): each node's adjacency has distinct neighbors.
            for n in 0..=node_ub {
                let neighbors: Vec<usize> = dcg.adjacency(n).into_iter().map(|(m, _)| m).collect();
                let mut sorted = neighbors.clone();
                sorted.sort_unstable();
                sorted.dedup();
                assert_eq!(
                    neighbors.len(),
                    sorted.len(),
                    "seed {seed}: node {n} has a parallel edge"
                );
            }

            // R1: reset() reproduces the base graph's node/edge counts and
            // adjacency sizes.
            dcg.reset();
            assert_eq!(dcg.number_of_nodes(), g.number_of_nodes());
            assert_eq!(dcg.number_of_edges(), g.number_of_edges());
            for n in 0..=node_ub {
                assert_eq!(dcg.adjacency(n).len(), g.adjacency(n).len());
                assert_eq!(dcg.find_representative_node(n), n);
            }
        }
    }
}

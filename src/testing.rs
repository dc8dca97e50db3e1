//! Seeded random graph generation for property-style tests. Not exhaustive
//! fuzzing — just enough variety to exercise the driver beyond the literal
//! scenarios in [`crate::driver`]'s tests.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::graph::{EdgeMap, UndirectedGraph};

/// Builds a connected random graph over `n` nodes (`n - 1` spanning edges
/// plus `extra_edges` additional random edges), with each edge weight drawn
/// uniformly from `[-1.0, 1.0)`.
pub fn random_weighted_graph(
    n: usize,
    extra_edges: usize,
    seed: u64,
) -> (UndirectedGraph, EdgeMap<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = UndirectedGraph::new();
    for _ in 0..n {
        graph.add_node();
    }

    let mut weights = Vec::new();
    for i in 1..n {
        let j = rng.random_range(0..i);
        let w = rng.random_range(-1.0..1.0);
        graph.add_edge(i, j, w);
        weights.push(w);
    }
    for _ in 0..extra_edges {
        let u = rng.random_range(0..n);
        let mut v = rng.random_range(0..n);
        while v == u {
            v = rng.random_range(0..n);
        }
        let w = rng.random_range(-1.0..1.0);
        graph.add_edge(u, v, w);
        weights.push(w);
    }

    let mut weight_map = EdgeMap::new(graph.edge_id_upper_bound());
    for (edge, &w) in weights.iter().enumerate() {
        weight_map[edge] = w;
    }
    (graph, weight_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::BaseGraph;

    #[test]
    fn produces_requested_node_and_edge_counts() {
        let (g, weights) = random_weighted_graph(10, 5, 42);
        assert_eq!(g.number_of_nodes(), 10);
        assert_eq!(g.number_of_edges(), 9 + 5);
        for edge in g.edges() {
            assert!(weights[edge] >= -1.0 && weights[edge] < 1.0);
        }
    }

    #[test]
    fn same_seed_is_reproducible() {
        let (g1, w1) = random_weighted_graph(8, 3, 7);
        let (g2, w2) = random_weighted_graph(8, 3, 7);
        assert_eq!(g1.number_of_edges(), g2.number_of_edges());
        for edge in g1.edges() {
            assert_eq!(w1[edge], w2[edge]);
        }
    }
}

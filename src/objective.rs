//! The multicut objective: a base graph plus edge weights, and the energy
//! function CGC is minimizing.

use crate::graph::{BaseGraph, NodeMap};

/// Node id -> component id. Densified (values form a contiguous
/// `[0, k)` range) only at the points spec'd in [`crate::driver`]; between
/// those points fresh labels may exceed `k`.
pub type NodeLabels = NodeMap<usize>;

/// A [`BaseGraph`] together with a real-valued weight per edge (positive =
/// attractive, negative = repulsive).
pub struct MulticutObjective<'g, G: BaseGraph> {
    graph: &'g G,
    weights: crate::graph::EdgeMap<f64>,
}

impl<'g, G: BaseGraph> MulticutObjective<'g, G> {
    pub fn new(graph: &'g G, weights: crate::graph::EdgeMap<f64>) -> Self {
        MulticutObjective { graph, weights }
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    pub fn weight(&self, edge: usize) -> f64 {
        self.weights[edge]
    }

    /// `sum(weight(e) for e in graph.edges() if labels[u(e)] != labels[v(e)])`.
    pub fn eval_node_labels(&self, labels: &NodeLabels) -> f64 {
        self.graph
            .edges()
            .into_iter()
            .filter(|&e| {
                let (u, v) = self.graph.uv(e);
                labels[u] != labels[v]
            })
            .map(|e| self.weights[e])
            .sum()
    }
}

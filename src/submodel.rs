//! Submodel extraction and the two local moves CGC drives: splitting a
//! single component (`optimize1`) and redrawing the boundary between two
//! adjacent components (`optimize2`).

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;

use crate::disjoint_sets::DisjointSets;
use crate::error::CgcError;
use crate::graph::{BaseGraph, NodeMap};
use crate::mincut::{SubGraph, eval_sub_labels, MincutSolver, MincutSolverFactory};
use crate::objective::{MulticutObjective, NodeLabels};

/// Outcome of [`SubmodelOptimizer::optimize1`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optimize1Result {
    pub improvement: bool,
    pub min_cut_value: f64,
}

/// Outcome of [`SubmodelOptimizer::optimize2`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optimize2Result {
    pub improvement: bool,
    pub improved_by: f64,
}

/// Builds local induced subgraphs around one or two component anchors,
/// solves the two-way mincut on them, and lifts the result back into the
/// global labeling. Scratch buffers are reused across calls.
pub struct SubmodelOptimizer<'a, G: BaseGraph> {
    objective: &'a MulticutObjective<'a, G>,
    global_to_local: NodeMap<usize>,
    local_to_global: Vec<usize>,
    n_local_nodes: usize,
    inside_edges: Vec<usize>,
    border_edges: Vec<usize>,
    local_ufd: DisjointSets,
    mincut_factory: Box<dyn MincutSolverFactory>,
}

impl<'a, G: BaseGraph> SubmodelOptimizer<'a, G> {
    pub fn new(
        objective: &'a MulticutObjective<'a, G>,
        mincut_factory: Box<dyn MincutSolverFactory>,
    ) -> Self {
        let node_ub = objective.graph().node_id_upper_bound();
        SubmodelOptimizer {
            objective,
            global_to_local: NodeMap::new(node_ub),
            local_to_global: Vec::with_capacity(objective.graph().number_of_nodes()),
            n_local_nodes: 0,
            inside_edges: Vec::new(),
            border_edges: Vec::with_capacity(objective.graph().number_of_nodes() / 4 + 1),
            local_ufd: DisjointSets::new(0),
            mincut_factory,
        }
    }

    pub fn number_of_local_nodes(&self) -> usize {
        self.n_local_nodes
    }

    pub fn inside_edges(&self) -> &[usize] {
        &self.inside_edges
    }

    pub fn border_edges(&self) -> &[usize] {
        &self.border_edges
    }

    /// Selects every node whose label equals `node_labels[a0]` or
    /// `node_labels[a1]`, assigns them dense local ids in base-graph
    /// node-iteration order, and recomputes `inside_edges`/`border_edges`.
    /// Marks every inside edge clean. Returns the maximum label value
    /// observed across the *entire* graph.
    fn var_mapping(
        &mut self,
        node_labels: &NodeLabels,
        a0: usize,
        a1: usize,
        is_dirty_edge: &mut FixedBitSet,
    ) -> usize {
        self.inside_edges.clear();
        self.border_edges.clear();
        self.local_to_global.clear();
        self.n_local_nodes = 0;

        let mut max_node_label = 0usize;
        let label0 = node_labels[a0];
        let label1 = node_labels[a1];
        let graph = self.objective.graph();

        for node in graph.nodes() {
            let node_label = node_labels[node];
            max_node_label = max_node_label.max(node_label);

            if node_label == label0 || node_label == label1 {
                self.global_to_local[node] = self.n_local_nodes;
                self.local_to_global.push(node);
                self.n_local_nodes += 1;

                for (other_node, edge) in graph.adjacency(node) {
                    if node < other_node {
                        let other_label = node_labels[other_node];
                        if other_label == label0 || other_label == label1 {
                            self.inside_edges.push(edge);
                            is_dirty_edge.set(edge, false);
                        } else {
                            self.border_edges.push(edge);
                        }
                    }
                }
            }
        }
        max_node_label
    }

    /// Builds the dense local subgraph matching `inside_edges`' order (which
    /// is itself the order the submodel discovered them in during
    /// `var_mapping`), together with the parallel weights and
    /// `(u_local, v_local, edge)` triples used to re-union after solving.
    fn build_sub_problem(&self) -> (SubGraph, Vec<f64>, Vec<(usize, usize, usize)>) {
        let mut sub_graph = SubGraph::new(self.n_local_nodes);
        let mut weights = Vec::with_capacity(self.inside_edges.len());
        let mut internal = Vec::with_capacity(self.inside_edges.len());
        for &edge in &self.inside_edges {
            let (gu, gv) = self.objective.graph().uv(edge);
            let u_local = self.global_to_local[gu];
            let v_local = self.global_to_local[gv];
            sub_graph.insert_edge(u_local, v_local);
            weights.push(self.objective.weight(edge));
            internal.push((u_local, v_local, edge));
        }
        (sub_graph, weights, internal)
    }

    fn solve(&self, sub_graph: &SubGraph, weights: &[f64]) -> Result<Vec<u8>, CgcError> {
        let mut solver = self
            .mincut_factory
            .create_solver(sub_graph, weights)
            .ok_or_else(|| {
                CgcError::ExternalSolverFailure("mincut factory produced no solver".to_string())
            })?;
        let labels = solver.optimize();
        if labels.len() != sub_graph.number_of_nodes() {
            return Err(CgcError::ExternalSolverFailure(format!(
                "mincut solver returned {} labels, expected {}",
                labels.len(),
                sub_graph.number_of_nodes()
            )));
        }
        Ok(labels)
    }

    /// Re-unions local nodes that received the same mincut label, computes a
    /// dense relabeling of the resulting local components, and writes fresh
    /// global labels (`dense_id + max_node_label + 1`) back for every
    /// submodel node. Returns the number of resulting local components.
    fn relabel_from_solution(
        &mut self,
        node_labels: &mut NodeLabels,
        internal: &[(usize, usize, usize)],
        local_labels: &[u8],
        max_node_label: usize,
    ) -> (usize, Vec<usize>, Vec<usize>) {
        self.local_ufd.reset(self.n_local_nodes);
        for &(u_local, v_local, _edge) in internal {
            if local_labels[u_local] == local_labels[v_local] {
                self.local_ufd.merge(u_local, v_local);
            }
        }
        let mut mapping = HashMap::new();
        self.local_ufd.representative_labeling(&mut mapping);
        let k = mapping.len();

        let mut anchors = vec![0usize; k];
        let mut anchor_component_size = vec![0usize; k];
        for local_node in 0..self.n_local_nodes {
            let global_node = self.local_to_global[local_node];
            let root = self.local_ufd.find(local_node);
            let dense = mapping[&root];
            anchor_component_size[dense] += 1;
            anchors[dense] = global_node; // last-visited wins
            node_labels[global_node] = dense + max_node_label + 1;
        }
        (k, anchors, anchor_component_size)
    }

    /// Tests whether the single component containing `anchor_node` should be
    /// split. Pushes an anchor for every new subcomponent of size >= 2 onto
    /// `anchor_queue`.
    pub fn optimize1(
        &mut self,
        node_labels: &mut NodeLabels,
        anchor_node: usize,
        anchor_queue: &mut VecDeque<usize>,
        is_dirty_edge: &mut FixedBitSet,
    ) -> Result<Optimize1Result, CgcError> {
        let max_node_label = self.var_mapping(node_labels, anchor_node, anchor_node, is_dirty_edge);

        if self.n_local_nodes < 2 {
            return Ok(Optimize1Result {
                improvement: false,
                min_cut_value: 0.0,
            });
        }

        let (sub_graph, weights, internal) = self.build_sub_problem();
        let local_labels = self.solve(&sub_graph, &weights)?;
        let min_cut_value = eval_sub_labels(&sub_graph, &weights, &local_labels);

        if min_cut_value >= 0.0 {
            return Ok(Optimize1Result {
                improvement: false,
                min_cut_value,
            });
        }

        let (k, anchors, sizes) =
            self.relabel_from_solution(node_labels, &internal, &local_labels, max_node_label);
        for i in 0..k {
            if sizes[i] >= 2 {
                anchor_queue.push_back(anchors[i]);
            }
        }

        Ok(Optimize1Result {
            improvement: true,
            min_cut_value,
        })
    }

    /// Tests whether the boundary between the components containing
    /// `anchor0` and `anchor1` should be redrawn. On improvement, updates
    /// `is_dirty_edge` per the conservative policy: if the new solution has
    /// at most 2 subcomponents, only border edges are marked dirty (inside
    /// edges were already marked clean by `var_mapping`); otherwise both
    /// inside and border edges are marked dirty.
    pub fn optimize2(
        &mut self,
        node_labels: &mut NodeLabels,
        anchor0: usize,
        anchor1: usize,
        is_dirty_edge: &mut FixedBitSet,
    ) -> Result<Optimize2Result, CgcError> {
        let max_node_label = self.var_mapping(node_labels, anchor0, anchor1, is_dirty_edge);

        let (sub_graph, weights, internal) = self.build_sub_problem();
        let current_cut_value: f64 = internal
            .iter()
            .zip(weights.iter())
            .filter(|((u_local, v_local, _), _)| {
                node_labels[self.local_to_global[*u_local]]
                    != node_labels[self.local_to_global[*v_local]]
            })
            .map(|(_, &w)| w)
            .sum();

        let local_labels = self.solve(&sub_graph, &weights)?;
        let min_cut_value = eval_sub_labels(&sub_graph, &weights, &local_labels);

        if min_cut_value + 1e-7 >= current_cut_value {
            return Ok(Optimize2Result {
                improvement: false,
                improved_by: 0.0,
            });
        }

        let (k, _anchors, _sizes) =
            self.relabel_from_solution(node_labels, &internal, &local_labels, max_node_label);

        if k <= 2 {
            for &edge in &self.border_edges {
                is_dirty_edge.set(edge, true);
            }
        } else {
            for &edge in &self.inside_edges {
                is_dirty_edge.set(edge, true);
            }
            for &edge in &self.border_edges {
                is_dirty_edge.set(edge, true);
            }
        }

        Ok(Optimize2Result {
            improvement: true,
            improved_by: current_cut_value - min_cut_value,
        })
    }
}

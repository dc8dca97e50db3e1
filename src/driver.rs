//! The CGC ("Cut, Glue & Cut") driver: alternates a cut phase (split every
//! component) and a glue-and-cut phase (redraw the boundary of every
//! adjacent component pair) until no local move improves the objective.

use std::collections::VecDeque;

use hashbrown::HashMap;

pub use crate::error::CgcError;
use crate::disjoint_sets::DisjointSets;
use crate::graph::BaseGraph;
use crate::mincut::MincutSolverFactory;
use crate::objective::{MulticutObjective, NodeLabels};
use crate::submodel::SubmodelOptimizer;
use crate::visitor::Visitor;
use fixedbitset::FixedBitSet;

/// Driver configuration. `mincut_factory` is required — there is no
/// meaningful default two-way mincut backend — so it is a plain constructor
/// argument rather than an `Option` field a caller could forget to set.
pub struct Settings {
    pub do_cut_phase: bool,
    pub do_glue_and_cut_phase: bool,
    pub mincut_factory: Box<dyn MincutSolverFactory>,
}

impl Settings {
    pub fn new(mincut_factory: Box<dyn MincutSolverFactory>) -> Self {
        Settings {
            do_cut_phase: true,
            do_glue_and_cut_phase: true,
            mincut_factory,
        }
    }
}

/// Runs the Cut, Glue & Cut local-search loop over a [`MulticutObjective`].
pub struct CgcDriver<'a, G: BaseGraph> {
    objective: &'a MulticutObjective<'a, G>,
    do_cut_phase: bool,
    do_glue_and_cut_phase: bool,
    submodel: SubmodelOptimizer<'a, G>,
    is_dirty_edge: FixedBitSet,
    ufd: DisjointSets,
    current_best_energy: f64,
    current_best_node_labels: Option<NodeLabels>,
}

impl<'a, G: BaseGraph> CgcDriver<'a, G> {
    pub fn new(objective: &'a MulticutObjective<'a, G>, settings: Settings) -> Self {
        let edge_ub = objective.graph().edge_id_upper_bound();
        let mut is_dirty_edge = FixedBitSet::with_capacity(edge_ub + 1);
        is_dirty_edge.insert_range(..);

        CgcDriver {
            objective,
            do_cut_phase: settings.do_cut_phase,
            do_glue_and_cut_phase: settings.do_glue_and_cut_phase,
            submodel: SubmodelOptimizer::new(objective, settings.mincut_factory),
            is_dirty_edge,
            ufd: DisjointSets::new(0),
            current_best_energy: 0.0,
            current_best_node_labels: None,
        }
    }

    pub fn objective(&self) -> &MulticutObjective<'a, G> {
        self.objective
    }

    pub fn current_best_energy(&self) -> f64 {
        self.current_best_energy
    }

    /// The labeling `optimize` left `node_labels` in on its most recent call.
    /// `None` until `optimize` has run at least once.
    pub fn current_best_node_labels(&self) -> Option<&NodeLabels> {
        self.current_best_node_labels.as_ref()
    }

    pub fn name(&self) -> &'static str {
        "Cgc"
    }

    /// No-op hook: this driver does not cache anything derived from edge
    /// weights across calls, so there is nothing to invalidate.
    pub fn weights_changed(&mut self) {}

    /// Runs the cut phase (if enabled) then the glue-and-cut phase (if
    /// enabled) against `node_labels`, tracking the best energy seen.
    /// `node_labels` is mutated in place and also returned via
    /// [`CgcDriver::current_best_energy`]; the caller reads the labels back
    /// out of the same buffer they passed in.
    pub fn optimize<V: Visitor<Self>>(
        &mut self,
        node_labels: &mut NodeLabels,
        visitor: &mut V,
    ) -> Result<(), CgcError> {
        self.current_best_energy = self.objective.eval_node_labels(node_labels);
        visitor.begin(self);

        if self.do_cut_phase {
            self.cut_phase(node_labels, visitor)?;
        }
        if self.do_glue_and_cut_phase {
            self.glue_and_cut_phase(node_labels, visitor)?;
        }

        self.current_best_node_labels = Some(node_labels.clone());
        visitor.end(self);
        Ok(())
    }

    fn cut_phase<V: Visitor<Self>>(
        &mut self,
        node_labels: &mut NodeLabels,
        visitor: &mut V,
    ) -> Result<(), CgcError> {
        let graph = self.objective.graph();
        self.ufd.reset(graph.node_id_upper_bound() + 1);
        for edge in graph.edges() {
            let (u, v) = graph.uv(edge);
            if node_labels[u] == node_labels[v] {
                self.ufd.merge(u, v);
            }
        }
        let mut mapping = HashMap::new();
        self.ufd.representative_labeling(&mut mapping);

        let mut anchors: HashMap<usize, usize> = HashMap::new();
        for node in graph.nodes() {
            let root = self.ufd.find(node);
            let dense = mapping[&root];
            node_labels[node] = dense;
            anchors.insert(dense, node); // last-encountered wins
        }

        let n_components = anchors.len();
        let mut ordered_anchors = vec![0usize; n_components];
        for (component, anchor) in &anchors {
            ordered_anchors[*component] = *anchor;
        }
        let mut queue: VecDeque<usize> = ordered_anchors.into_iter().collect();
        while let Some(anchor) = queue.pop_front() {
            let result = self
                .submodel
                .optimize1(node_labels, anchor, &mut queue, &mut self.is_dirty_edge)?;
            if result.improvement {
                self.current_best_energy += result.min_cut_value;
            }
            visitor.visit(self);
        }
        Ok(())
    }

    fn glue_and_cut_phase<V: Visitor<Self>>(
        &mut self,
        node_labels: &mut NodeLabels,
        visitor: &mut V,
    ) -> Result<(), CgcError> {
        let graph = self.objective.graph();
        loop {
            let mut anchor_edges: HashMap<(usize, usize), usize> = HashMap::new();
            for edge in graph.edges() {
                let (u, v) = graph.uv(edge); // u < v
                let lu = node_labels[u];
                let lv = node_labels[v];
                if lu != lv {
                    // keyed by the label of whichever *node id* is smaller, not
                    // by min/max of the labels themselves.
                    anchor_edges.insert((lu, lv), edge); // last-visited wins
                }
            }

            let mut ordered_anchor_edges: Vec<((usize, usize), usize)> =
                anchor_edges.into_iter().collect();
            ordered_anchor_edges.sort_unstable_by_key(|&(key, _)| key);

            let mut continue_search = false;
            for &(_, edge) in &ordered_anchor_edges {
                let (u, v) = graph.uv(edge);
                if self.is_dirty_edge.contains(edge) && node_labels[u] != node_labels[v] {
                    let result = self.submodel.optimize2(
                        node_labels,
                        u,
                        v,
                        &mut self.is_dirty_edge,
                    )?;
                    if result.improvement {
                        self.current_best_energy -= result.improved_by;
                        continue_search = true;
                        visitor.visit(self);
                    }
                }
            }

            if !continue_search {
                break;
            }
        }
        Ok(())
    }
}

//! The two-way mincut solver seam: a small dense subgraph goes in, a
//! `{0,1}` label per local node comes out. The production solver this crate
//! was built to plug into is QPBO-style and lives elsewhere (out of scope,
//! per the purpose note on submodel optimization); [`BruteForceMincut`] is a
//! reference implementation for small submodels, used by the tests and
//! usable standalone for graphs too small to need anything smarter.

/// A small, dense, local subgraph handed to a [`MincutSolver`] — node ids
/// are `0..number_of_nodes()`, edges are inserted in a fixed order that the
/// caller must also use when building the parallel weights slice.
#[derive(Debug, Clone)]
pub struct SubGraph {
    n_nodes: usize,
    edges: Vec<(usize, usize)>,
}

impl SubGraph {
    pub fn new(n_nodes: usize) -> Self {
        SubGraph {
            n_nodes,
            edges: Vec::new(),
        }
    }

    /// Inserts an edge, returning its local id (= insertion order).
    pub fn insert_edge(&mut self, u: usize, v: usize) -> usize {
        let id = self.edges.len();
        self.edges.push((u, v));
        id
    }

    pub fn number_of_nodes(&self) -> usize {
        self.n_nodes
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

/// Evaluates `sum(weight(e) for e in graph.edges() if labels differ)`, the
/// same objective [`crate::objective::MulticutObjective`] computes on the
/// full graph, specialized to a dense local subgraph and label slice.
pub fn eval_sub_labels(graph: &SubGraph, weights: &[f64], labels: &[u8]) -> f64 {
    graph
        .edges()
        .iter()
        .enumerate()
        .filter(|(eid, (u, v))| labels[*u] != labels[*v] && weights.len() > *eid)
        .map(|(eid, _)| weights[eid])
        .sum()
}

/// A solver consumed by exactly one call to [`MincutSolver::optimize`].
pub trait MincutSolver {
    /// Writes one `{0,1}` label per local node.
    fn optimize(&mut self) -> Vec<u8>;
}

/// Builds a [`MincutSolver`] bound to one submodel. `CgcDriver` requires one
/// of these at construction (a missing factory is a precondition
/// violation).
pub trait MincutSolverFactory {
    /// Returns `None` if the solver backend could not be constructed for
    /// this submodel; the driver surfaces that as
    /// [`crate::driver::CgcError::ExternalSolverFailure`].
    fn create_solver(&self, graph: &SubGraph, weights: &[f64]) -> Option<Box<dyn MincutSolver>>;
}

/// Exhaustive two-way partition search: tries every assignment (fixing node
/// 0's label to break the label-swap symmetry) and keeps the one minimizing
/// the cut objective. Exact, exponential in node count — only suitable for
/// the small dense submodels CGC builds.
pub struct BruteForceMincut {
    graph: SubGraph,
    weights: Vec<f64>,
}

impl BruteForceMincut {
    pub fn new(graph: SubGraph, weights: Vec<f64>) -> Self {
        BruteForceMincut { graph, weights }
    }
}

impl MincutSolver for BruteForceMincut {
    fn optimize(&mut self) -> Vec<u8> {
        let n = self.graph.number_of_nodes();
        if n == 0 {
            return Vec::new();
        }
        if n == 1 {
            return vec![0];
        }

        let mut best_labels = vec![0u8; n];
        let mut best_value = eval_sub_labels(&self.graph, &self.weights, &best_labels);

        // Node 0 is pinned to label 0; enumerate the remaining n-1 nodes.
        let combinations = 1u64 << (n - 1);
        let mut labels = vec![0u8; n];
        for mask in 0..combinations {
            labels[0] = 0;
            for (i, slot) in labels.iter_mut().enumerate().skip(1) {
                *slot = ((mask >> (i - 1)) & 1) as u8;
            }
            let value = eval_sub_labels(&self.graph, &self.weights, &labels);
            if value < best_value {
                best_value = value;
                best_labels.copy_from_slice(&labels);
            }
        }
        best_labels
    }
}

/// Factory producing [`BruteForceMincut`] solvers.
#[derive(Debug, Default, Clone, Copy)]
pub struct BruteForceMincutFactory;

impl MincutSolverFactory for BruteForceMincutFactory {
    fn create_solver(&self, graph: &SubGraph, weights: &[f64]) -> Option<Box<dyn MincutSolver>> {
        Some(Box::new(BruteForceMincut::new(
            graph.clone(),
            weights.to_vec(),
        )))
    }
}

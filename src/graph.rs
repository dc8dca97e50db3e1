//! The static base-graph capability set and one concrete implementation of it.
//!
//! [`BaseGraph`] is the read-only collaborator the rest of the crate is built
//! against — node/edge iteration, adjacency, endpoint lookup, upper-bound ids
//! and typed node/edge maps. The concrete representation underneath it
//! (which static graph storage, how deletions are handled, and so on) is
//! someone else's problem in the wider ecosystem this crate is meant to plug
//! into; [`UndirectedGraph`] exists so the crate is runnable and testable on
//! its own, backed by [`petgraph`]'s dense undirected graph.

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::ops::{Index, IndexMut};

/// Read-only capability set a static weighted graph must expose.
///
/// Node and edge ids are dense integers in `[0, upper_bound]`, though gaps
/// are allowed after deletions performed by whatever produced the graph —
/// `number_of_nodes()` need not equal `node_id_upper_bound() + 1`.
pub trait BaseGraph {
    fn number_of_nodes(&self) -> usize;
    fn number_of_edges(&self) -> usize;
    fn node_id_upper_bound(&self) -> usize;
    fn edge_id_upper_bound(&self) -> usize;

    /// All live node ids, in an unspecified but stable order.
    fn nodes(&self) -> Vec<usize>;
    /// All live edge ids, in an unspecified but stable order.
    fn edges(&self) -> Vec<usize>;

    /// The endpoints of `edge`, normalized so the first is smaller.
    fn uv(&self, edge: usize) -> (usize, usize);
    fn u(&self, edge: usize) -> usize {
        self.uv(edge).0
    }
    fn v(&self, edge: usize) -> usize {
        self.uv(edge).1
    }

    /// `(neighbor, edge)` pairs incident to `node`, in an unspecified but
    /// stable order.
    fn adjacency(&self, node: usize) -> Vec<(usize, usize)>;
}

/// A generic dense-ish map from node id to `V`.
#[derive(Debug, Clone)]
pub struct NodeMap<V> {
    data: Vec<V>,
}

impl<V: Clone> NodeMap<V> {
    /// Builds a map covering `[0, upper_bound]`, every slot set to `fill`.
    pub fn filled(upper_bound: usize, fill: V) -> Self {
        NodeMap {
            data: vec![fill; upper_bound + 1],
        }
    }
}

impl<V: Default + Clone> NodeMap<V> {
    pub fn new(upper_bound: usize) -> Self {
        Self::filled(upper_bound, V::default())
    }
}

impl<V> Index<usize> for NodeMap<V> {
    type Output = V;
    fn index(&self, node: usize) -> &V {
        &self.data[node]
    }
}

impl<V> IndexMut<usize> for NodeMap<V> {
    fn index_mut(&mut self, node: usize) -> &mut V {
        &mut self.data[node]
    }
}

/// A generic dense-ish map from edge id to `V`. Structurally identical to
/// [`NodeMap`] but kept as a distinct type so the two id spaces can't be
/// mixed up at a call site.
#[derive(Debug, Clone)]
pub struct EdgeMap<V> {
    data: Vec<V>,
}

impl<V: Clone> EdgeMap<V> {
    pub fn filled(upper_bound: usize, fill: V) -> Self {
        EdgeMap {
            data: vec![fill; upper_bound + 1],
        }
    }
}

impl<V: Default + Clone> EdgeMap<V> {
    pub fn new(upper_bound: usize) -> Self {
        Self::filled(upper_bound, V::default())
    }
}

impl<V> Index<usize> for EdgeMap<V> {
    type Output = V;
    fn index(&self, edge: usize) -> &V {
        &self.data[edge]
    }
}

impl<V> IndexMut<usize> for EdgeMap<V> {
    fn index_mut(&mut self, edge: usize) -> &mut V {
        &mut self.data[edge]
    }
}

/// A simple connected-or-not undirected weighted graph, built on
/// [`petgraph::graph::UnGraph`]. Node and edge ids are dense — this crate
/// never deletes from the base graph, only contracts a dynamic view over it.
#[derive(Debug, Clone)]
pub struct UndirectedGraph {
    inner: UnGraph<(), f64, u32>,
}

impl UndirectedGraph {
    pub fn new() -> Self {
        UndirectedGraph {
            inner: UnGraph::with_capacity(0, 0),
        }
    }

    /// Adds a node, returning its dense id.
    pub fn add_node(&mut self) -> usize {
        self.inner.add_node(()).index()
    }

    /// Adds an edge with the given affinity weight (positive = attractive,
    /// negative = repulsive), returning its dense id.
    ///
    /// Self-loops are a precondition violation: a base graph edge must
    /// connect two distinct nodes.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: f64) -> usize {
        assert_ne!(u, v, "base graph edges must not be self-loops");
        self.inner
            .add_edge(NodeIndex::new(u), NodeIndex::new(v), weight)
            .index()
    }

    pub fn weight(&self, edge: usize) -> f64 {
        *self
            .inner
            .edge_weight(EdgeIndex::new(edge))
            .expect("edge id should be live")
    }
}

impl Default for UndirectedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseGraph for UndirectedGraph {
    fn number_of_nodes(&self) -> usize {
        self.inner.node_count()
    }

    fn number_of_edges(&self) -> usize {
        self.inner.edge_count()
    }

    fn node_id_upper_bound(&self) -> usize {
        self.inner.node_count().saturating_sub(1)
    }

    fn edge_id_upper_bound(&self) -> usize {
        self.inner.edge_count().saturating_sub(1)
    }

    fn nodes(&self) -> Vec<usize> {
        self.inner.node_indices().map(|n| n.index()).collect()
    }

    fn edges(&self) -> Vec<usize> {
        self.inner.edge_indices().map(|e| e.index()).collect()
    }

    fn uv(&self, edge: usize) -> (usize, usize) {
        let (a, b) = self
            .inner
            .edge_endpoints(EdgeIndex::new(edge))
            .expect("edge id should be live");
        let (a, b) = (a.index(), b.index());
        if a < b { (a, b) } else { (b, a) }
    }

    fn adjacency(&self, node: usize) -> Vec<(usize, usize)> {
        self.inner
            .edges(NodeIndex::new(node))
            .map(|e| (e.target().index(), e.id().index()))
            .collect()
    }
}

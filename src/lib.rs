#![warn(missing_docs)]

//! # cgc_multicut
//!
//! A dynamic edge-contraction graph and the CGC ("Cut, Glue & Cut")
//! multicut local-search optimizer built on top of it.
//!
//! Given an undirected weighted graph whose edges carry real-valued
//! affinities (positive = attractive, negative = repulsive), the multicut
//! problem asks for a partition of the nodes minimizing the sum of cut-edge
//! weights. [`driver::CgcDriver`] attacks this by alternating a cut phase
//! (split each component via a two-way mincut) and a glue-and-cut phase
//! (redraw the boundary of each adjacent component pair), driven by a
//! pluggable [`mincut::MincutSolver`].
//!
//! Based on [`petgraph`](https://docs.rs/petgraph).

pub mod callback;
pub mod contraction_graph;
pub mod disjoint_sets;
pub mod driver;
pub mod error;
pub mod graph;
pub mod mincut;
pub mod objective;
pub mod submodel;
pub mod visitor;

#[cfg(test)]
pub mod testing;

pub use contraction_graph::DynamicContractionGraph;
pub use disjoint_sets::DisjointSets;
pub use driver::{CgcDriver, Settings};
pub use error::CgcError;
pub use graph::{BaseGraph, EdgeMap, NodeMap, UndirectedGraph};
pub use objective::{MulticutObjective, NodeLabels};
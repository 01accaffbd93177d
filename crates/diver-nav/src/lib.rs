//! Weighted digraph capability and single-source shortest paths.
//!
//! Graph storage lives with the caller; this crate only sees it through
//! [`WeightedDigraph`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod graph;
pub mod shortest_paths;

pub use error::PathError;
pub use graph::{Cost, Vertex, WeightedDigraph};
pub use shortest_paths::ShortestPaths;

use core::fmt::Debug;
use core::hash::Hash;

/// Edge weight / path length. Unsigned, so every weight is nonnegative.
pub type Cost = u64;

/// Opaque vertex identity.
///
/// Needs a total order (deterministic tie-breaking and `BTree*` use) as well as
/// `Hash` for the engine's tables.
pub trait Vertex: Clone + Eq + Hash + Ord + Debug {}

impl<T> Vertex for T where T: Clone + Eq + Hash + Ord + Debug {}

/// Minimal contract a graph must satisfy to be routed over.
///
/// Self-loops and parallel edges are valid and must be reported as-is; callers
/// never pre-filter them.
pub trait WeightedDigraph {
    type Vertex: Vertex;
    type Edge: Clone + Debug;

    /// Outgoing edges of `vertex`. A vertex the graph does not know has none.
    fn outgoing_edges(&self, vertex: &Self::Vertex) -> Vec<Self::Edge>;

    fn source(&self, edge: &Self::Edge) -> Self::Vertex;

    fn dest(&self, edge: &Self::Edge) -> Self::Vertex;

    fn weight(&self, edge: &Self::Edge) -> Cost;

    /// Destinations of the outgoing edges of `vertex`, deduplicated, ascending,
    /// with self-loops removed.
    fn successors(&self, vertex: &Self::Vertex) -> Vec<Self::Vertex> {
        let mut out: Vec<Self::Vertex> = self
            .outgoing_edges(vertex)
            .iter()
            .map(|e| self.dest(e))
            .filter(|d| d != vertex)
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Cheapest direct edge from `from` to `to`, if any.
    fn edge_between(&self, from: &Self::Vertex, to: &Self::Vertex) -> Option<Self::Edge> {
        self.outgoing_edges(from)
            .into_iter()
            .filter(|e| &self.dest(e) == to)
            .min_by_key(|e| self.weight(e))
    }
}

use diver_nav::{Cost, Vertex, WeightedDigraph};

use crate::MoveError;

/// Collectible value sitting on a vertex.
pub type Value = u64;

/// What the agent learns about a neighbour when it arrives next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborStatus<V> {
    pub id: V,
    /// Environment's estimate of the remaining distance to the target.
    pub distance_to_target: Cost,
}

impl<V> NeighborStatus<V> {
    pub fn new(id: V, distance_to_target: Cost) -> Self {
        Self {
            id,
            distance_to_target,
        }
    }
}

/// Environment view during the seek phase.
///
/// The graph is unknown up front: only the neighbours of the current vertex
/// are visible.
pub trait SeekEnv {
    type Vertex: Vertex;

    fn current(&self) -> Self::Vertex;

    /// Zero exactly when the agent stands on the target.
    fn distance_to_target(&self) -> Cost;

    fn neighbors(&self) -> Vec<NeighborStatus<Self::Vertex>>;

    /// Move to an adjacent vertex. Moving anywhere else is a caller bug.
    fn move_to(&mut self, to: &Self::Vertex) -> Result<(), MoveError<Self::Vertex>>;
}

/// Environment view during the scram phase.
///
/// The whole graph is known; every move is charged against a shrinking step
/// budget, and arriving on a vertex collects its value.
pub trait ScramEnv {
    type Vertex: Vertex;
    type Graph: WeightedDigraph<Vertex = Self::Vertex>;

    fn current(&self) -> Self::Vertex;

    fn exit(&self) -> Self::Vertex;

    fn steps_to_go(&self) -> Cost;

    fn graph(&self) -> &Self::Graph;

    /// Snapshot of every vertex in the graph.
    fn vertices(&self) -> Vec<Self::Vertex>;

    /// Value currently lying on `vertex` (zero once collected).
    ///
    /// Whatever lies on the vertex the scram starts from is forfeited: the
    /// forager treats it as consumed and never counts or returns for it.
    fn value(&self, vertex: &Self::Vertex) -> Value;

    /// Move along an edge out of the current vertex. Moving anywhere else,
    /// or past the budget, is a caller bug.
    fn move_to(&mut self, to: &Self::Vertex) -> Result<(), MoveError<Self::Vertex>>;
}

use crate::{Cost, PathError, WeightedDigraph};
use core::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

#[derive(Debug)]
struct OpenNode<V> {
    dist: Cost,
    tie: u64,
    vertex: V,
}

impl<V> OpenNode<V> {
    fn key(&self) -> (Cost, u64) {
        (self.dist, self.tie)
    }
}

impl<V> PartialEq for OpenNode<V> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<V> Eq for OpenNode<V> {}

impl<V> PartialOrd for OpenNode<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V> Ord for OpenNode<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

/// Dijkstra single-source shortest paths over a [`WeightedDigraph`].
///
/// Construct with [`ShortestPaths::new`], run
/// [`single_source_distances`](Self::single_source_distances), then query. A
/// new run discards the previous tables.
#[derive(Debug)]
pub struct ShortestPaths<'g, G: WeightedDigraph> {
    graph: &'g G,
    source: Option<G::Vertex>,
    dist: HashMap<G::Vertex, Cost>,
    pred: HashMap<G::Vertex, G::Edge>,
    settled: HashSet<G::Vertex>,
}

impl<'g, G: WeightedDigraph> ShortestPaths<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            source: None,
            dist: HashMap::new(),
            pred: HashMap::new(),
            settled: HashSet::new(),
        }
    }

    /// Convenience: construct and run from `source` in one go.
    pub fn from_source(graph: &'g G, source: G::Vertex) -> Self {
        let mut paths = Self::new(graph);
        paths.single_source_distances(source);
        paths
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Settle every vertex reachable from `source`.
    pub fn single_source_distances(&mut self, source: G::Vertex) {
        self.dist.clear();
        self.pred.clear();
        self.settled.clear();

        let mut open = BinaryHeap::<OpenNode<G::Vertex>>::new();
        let mut tie: u64 = 0;

        self.dist.insert(source.clone(), 0);
        open.push(OpenNode {
            dist: 0,
            tie,
            vertex: source.clone(),
        });
        tie += 1;

        while let Some(node) = open.pop() {
            if self.settled.contains(&node.vertex) {
                // Stale heap entry.
                continue;
            }
            let u = node.vertex;
            let du = node.dist;
            self.settled.insert(u.clone());
            tracing::trace!(vertex = ?u, dist = du, "settled");

            for edge in self.graph.outgoing_edges(&u) {
                let v = self.graph.dest(&edge);
                if self.settled.contains(&v) {
                    continue;
                }

                let candidate = du.saturating_add(self.graph.weight(&edge));
                let best = self.dist.get(&v).copied().unwrap_or(Cost::MAX);
                if candidate >= best {
                    continue;
                }

                self.dist.insert(v.clone(), candidate);
                self.pred.insert(v.clone(), edge);
                open.push(OpenNode {
                    dist: candidate,
                    tie,
                    vertex: v,
                });
                tie += 1;
            }
        }

        tracing::debug!(
            source = ?source,
            settled = self.settled.len(),
            pushes = tie,
            "single-source distances computed"
        );
        self.source = Some(source);
    }

    pub fn source(&self) -> Option<&G::Vertex> {
        self.source.as_ref()
    }

    pub fn is_settled(&self, vertex: &G::Vertex) -> bool {
        self.settled.contains(vertex)
    }

    pub fn settled_count(&self) -> usize {
        self.settled.len()
    }

    /// Every settled vertex with its final distance, nearest first (ties by
    /// vertex order).
    pub fn settled(&self) -> Vec<(G::Vertex, Cost)> {
        let mut out: Vec<(G::Vertex, Cost)> = self
            .settled
            .iter()
            .filter_map(|v| self.dist.get(v).map(|d| (v.clone(), *d)))
            .collect();
        out.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        out
    }

    /// Final distance from the source to `vertex`.
    pub fn distance(&self, vertex: &G::Vertex) -> Result<Cost, PathError<G::Vertex>> {
        self.check_computed()?;
        if !self.settled.contains(vertex) {
            return Err(PathError::Unreachable(vertex.clone()));
        }
        self.dist
            .get(vertex)
            .copied()
            .ok_or_else(|| PathError::Unreachable(vertex.clone()))
    }

    /// Edges of a shortest path from the source to `vertex`, source first.
    ///
    /// Empty for the source itself. The weights sum to
    /// [`distance`](Self::distance) exactly.
    pub fn best_path(&self, vertex: &G::Vertex) -> Result<Vec<G::Edge>, PathError<G::Vertex>> {
        self.check_computed()?;
        if !self.settled.contains(vertex) {
            return Err(PathError::Unreachable(vertex.clone()));
        }

        let mut out = Vec::new();
        let mut current = vertex.clone();
        while let Some(edge) = self.pred.get(&current) {
            current = self.graph.source(edge);
            out.push(edge.clone());
        }
        out.reverse();
        Ok(out)
    }

    /// Vertices along [`best_path`](Self::best_path), source through `vertex`.
    pub fn path_vertices(&self, vertex: &G::Vertex) -> Result<Vec<G::Vertex>, PathError<G::Vertex>> {
        let edges = self.best_path(vertex)?;
        let mut out = Vec::with_capacity(edges.len() + 1);
        match edges.first() {
            Some(first) => out.push(self.graph.source(first)),
            None => out.push(vertex.clone()),
        }
        out.extend(edges.iter().map(|e| self.graph.dest(e)));
        Ok(out)
    }

    fn check_computed(&self) -> Result<(), PathError<G::Vertex>> {
        if self.source.is_none() {
            return Err(PathError::NotComputed);
        }
        Ok(())
    }
}

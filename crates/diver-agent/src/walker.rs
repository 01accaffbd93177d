use std::collections::HashSet;

use diver_nav::Vertex;
use serde::Serialize;

use crate::{SeekEnv, SeekError};

/// Outcome of a successful seek phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeekReport<V> {
    pub moves: usize,
    pub backtracks: usize,
    /// Vertices in the order they were first entered, start included.
    pub visit_order: Vec<V>,
}

#[derive(Debug)]
struct Frame<V> {
    at: V,
    /// Neighbours known on arrival, closest-to-target first.
    candidates: Vec<V>,
    next: usize,
}

/// Depth-first search toward a target that is only recognisable on arrival.
///
/// Neighbours are tried in ascending order of the environment's
/// distance-to-target estimate. The visited set lives for one walk and is
/// never reset between branches, so every vertex is entered at most once.
/// A dead-end branch is left by explicitly moving back to its parent.
#[derive(Debug)]
pub struct ExplorationWalker<V> {
    visited: HashSet<V>,
    stack: Vec<Frame<V>>,
    report: SeekReport<V>,
}

impl<V: Vertex> Default for ExplorationWalker<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> ExplorationWalker<V> {
    pub fn new() -> Self {
        Self {
            visited: HashSet::new(),
            stack: Vec::new(),
            report: SeekReport {
                moves: 0,
                backtracks: 0,
                visit_order: Vec::new(),
            },
        }
    }

    /// Walk until the environment reports distance zero, leaving the agent on
    /// the target.
    pub fn seek<E>(mut self, env: &mut E) -> Result<SeekReport<V>, SeekError<V>>
    where
        E: SeekEnv<Vertex = V>,
    {
        let start = env.current();
        self.visit(start.clone());
        if env.distance_to_target() == 0 {
            return Ok(self.report);
        }
        self.stack.push(Self::frame(env, start));

        while let Some(frame) = self.stack.last_mut() {
            let next = frame.candidates[frame.next..]
                .iter()
                .position(|v| !self.visited.contains(v))
                .map(|offset| frame.next + offset);

            match next {
                Some(idx) => {
                    frame.next = idx + 1;
                    let to = frame.candidates[idx].clone();
                    self.visit(to.clone());
                    env.move_to(&to)?;
                    self.report.moves += 1;

                    if env.distance_to_target() == 0 {
                        tracing::debug!(
                            vertex = ?to,
                            moves = self.report.moves,
                            visited = self.visited.len(),
                            "target reached"
                        );
                        return Ok(self.report);
                    }
                    self.stack.push(Self::frame(env, to));
                }
                None => {
                    let dead_end = self.stack.pop();
                    if let Some(parent) = self.stack.last() {
                        tracing::trace!(from = ?dead_end.map(|f| f.at), to = ?parent.at, "backtrack");
                        env.move_to(&parent.at)?;
                        self.report.moves += 1;
                        self.report.backtracks += 1;
                    }
                }
            }
        }

        Err(SeekError::TargetUnreachable {
            visited: self.visited.len(),
        })
    }

    fn visit(&mut self, vertex: V) {
        if self.visited.insert(vertex.clone()) {
            self.report.visit_order.push(vertex);
        }
    }

    fn frame<E>(env: &E, at: V) -> Frame<V>
    where
        E: SeekEnv<Vertex = V>,
    {
        let mut neighbors = env.neighbors();
        neighbors.sort_by(|a, b| {
            a.distance_to_target
                .cmp(&b.distance_to_target)
                .then_with(|| a.id.cmp(&b.id))
        });
        let mut candidates: Vec<V> = neighbors.into_iter().map(|n| n.id).collect();
        candidates.dedup();
        candidates.retain(|v| v != &at);
        Frame {
            at,
            candidates,
            next: 0,
        }
    }
}

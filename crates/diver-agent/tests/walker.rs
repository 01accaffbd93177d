use std::collections::{BTreeMap, HashSet};

use diver_agent::{
    ExplorationWalker, MoveError, NeighborStatus, SeekEnv, SeekError, SewerMap, SimulatedSewer,
};
use diver_nav::Cost;

/// Seek-only maze with a hand-written (possibly misleading) heuristic.
struct ScriptedMaze {
    adjacency: BTreeMap<u32, Vec<u32>>,
    estimate: BTreeMap<u32, Cost>,
    target: u32,
    at: u32,
    entered: Vec<u32>,
}

impl ScriptedMaze {
    fn new(edges: &[(u32, u32)], estimate: &[(u32, Cost)], start: u32, target: u32) -> Self {
        let mut adjacency: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for &(a, b) in edges {
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }
        Self {
            adjacency,
            estimate: estimate.iter().copied().collect(),
            target,
            at: start,
            entered: vec![start],
        }
    }
}

impl SeekEnv for ScriptedMaze {
    type Vertex = u32;

    fn current(&self) -> u32 {
        self.at
    }

    fn distance_to_target(&self) -> Cost {
        if self.at == self.target {
            0
        } else {
            self.estimate.get(&self.at).copied().unwrap_or(1)
        }
    }

    fn neighbors(&self) -> Vec<NeighborStatus<u32>> {
        self.adjacency
            .get(&self.at)
            .into_iter()
            .flatten()
            .map(|&n| NeighborStatus::new(n, self.estimate.get(&n).copied().unwrap_or(1)))
            .collect()
    }

    fn move_to(&mut self, to: &u32) -> Result<(), MoveError<u32>> {
        let adjacent = self
            .adjacency
            .get(&self.at)
            .is_some_and(|out| out.contains(to));
        if !adjacent {
            return Err(MoveError::NotAdjacent {
                from: self.at,
                to: *to,
            });
        }
        self.at = *to;
        self.entered.push(*to);
        Ok(())
    }
}

/// Vertices entered by forward moves, replaying `walk` against a stack so
/// that a step back to the parent counts as a backtrack.
fn forward_entries<V: Clone + PartialEq>(walk: &[V]) -> Vec<V> {
    let mut stack: Vec<V> = walk.first().cloned().into_iter().collect();
    let mut forward = stack.clone();
    for v in walk.iter().skip(1) {
        if stack.len() >= 2 && stack[stack.len() - 2] == *v {
            stack.pop();
        } else {
            stack.push(v.clone());
            forward.push(v.clone());
        }
    }
    forward
}

fn assert_no_repeats<V: std::hash::Hash + Eq + std::fmt::Debug>(order: &[V]) {
    let mut seen = HashSet::new();
    for v in order {
        assert!(seen.insert(v), "vertex {v:?} entered twice");
    }
}

#[test]
fn walker_starting_on_target_does_not_move() {
    let mut maze = ScriptedMaze::new(&[(1, 2)], &[], 1, 1);
    let report = ExplorationWalker::new().seek(&mut maze).expect("already there");

    assert_eq!(report.moves, 0);
    assert_eq!(report.visit_order, vec![1]);
    assert_eq!(maze.entered, vec![1]);
}

#[test]
fn walker_prefers_neighbours_closest_to_target() {
    //   2 - 4
    //  /
    // 1 - 3 - 5 (target)
    let mut maze = ScriptedMaze::new(
        &[(1, 2), (2, 4), (1, 3), (3, 5)],
        &[(2, 5), (4, 6), (3, 1), (5, 0)],
        1,
        5,
    );
    let report = ExplorationWalker::new().seek(&mut maze).expect("reachable");

    assert_eq!(maze.at, 5);
    assert_eq!(maze.entered, vec![1, 3, 5]);
    assert_eq!(report.backtracks, 0);
}

#[test]
fn walker_backtracks_out_of_misleading_dead_ends() {
    // The heuristic lures the walker down 1-2-4 before it finds 1-3-5.
    let mut maze = ScriptedMaze::new(
        &[(1, 2), (2, 4), (1, 3), (3, 5)],
        &[(2, 1), (4, 1), (3, 9), (5, 0)],
        1,
        5,
    );
    let report = ExplorationWalker::new().seek(&mut maze).expect("reachable");

    assert_eq!(maze.at, 5);
    assert_eq!(maze.entered, vec![1, 2, 4, 2, 1, 3, 5]);
    assert_eq!(report.backtracks, 2);
    assert_eq!(report.moves, 6);
    assert_eq!(report.visit_order, vec![1, 2, 4, 3, 5]);
    assert_eq!(forward_entries(&maze.entered), report.visit_order);
}

#[test]
fn walker_never_reenters_a_vertex_through_a_cycle() {
    // Square 1-2-3-4-1 with the target hanging off 4.
    let mut maze = ScriptedMaze::new(
        &[(1, 2), (2, 3), (3, 4), (4, 1), (4, 9)],
        &[(2, 1), (3, 1), (4, 5), (9, 0)],
        1,
        9,
    );
    let report = ExplorationWalker::new().seek(&mut maze).expect("reachable");

    assert_eq!(maze.at, 9);
    assert_eq!(report.visit_order, vec![1, 2, 3, 4, 9]);
    assert_no_repeats(&forward_entries(&maze.entered));
}

#[test]
fn walker_does_not_reenter_a_triangle_from_another_branch() {
    // Triangle 1-2-3 is a dead end; the target sits behind 4.
    let mut maze = ScriptedMaze::new(
        &[(1, 2), (2, 3), (1, 3), (1, 4), (4, 5)],
        &[(2, 1), (3, 2), (4, 9), (5, 0)],
        1,
        5,
    );
    let report = ExplorationWalker::new().seek(&mut maze).expect("reachable");

    assert_eq!(maze.entered, vec![1, 2, 3, 2, 1, 4, 5]);
    assert_eq!(forward_entries(&maze.entered), vec![1, 2, 3, 4, 5]);
    assert_eq!(report.backtracks, 2);
    assert_eq!(report.moves, 6);
}

#[test]
fn walker_reports_unreachable_target_and_ends_at_start() {
    let mut maze = ScriptedMaze::new(&[(1, 2), (2, 3), (7, 8)], &[], 1, 8);
    let err = ExplorationWalker::new()
        .seek(&mut maze)
        .expect_err("target is in another component");

    assert_eq!(err, SeekError::TargetUnreachable { visited: 3 });
    assert_eq!(maze.at, 1);
}

#[test]
fn walker_finds_target_on_simulated_sewer() {
    let mut map = SewerMap::new();
    for id in ["a", "b", "c", "d", "e", "ring"] {
        map.add_node(id, 0).expect("fresh id");
    }
    for (a, b, w) in [
        ("a", "b", 3),
        ("b", "c", 4),
        ("a", "d", 2),
        ("d", "e", 6),
        ("e", "ring", 1),
        ("c", "ring", 9),
    ] {
        map.add_edge(a, b, w).expect("known ids");
    }
    let mut sewer = SimulatedSewer::new(map, "a", "ring", "a", 0).expect("valid");

    let report = ExplorationWalker::new().seek(&mut sewer).expect("reachable");

    assert_eq!(SeekEnv::current(&sewer), "ring");
    assert_eq!(SeekEnv::distance_to_target(&sewer), 0);
    assert_no_repeats(&forward_entries(sewer.history()));
    assert_eq!(sewer.history().len(), report.moves + 1);
}

//! In-memory sewer used to drive both phases without an external game.
//!
//! Edges are undirected: each declared edge is stored in both directions.
//! The distance-to-target estimate is the exact weighted distance.

use std::collections::{BTreeMap, HashMap};

use diver_nav::{Cost, ShortestPaths, WeightedDigraph};
use serde::{Deserialize, Serialize};

use crate::{
    ForagerConfig, MoveError, NeighborStatus, ScenarioError, ScramEnv, SeekEnv, Value,
};

/// Serialized sewer layout plus the phase parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub start: String,
    pub target: String,
    pub exit: String,
    pub budget: Cost,
    #[serde(default)]
    pub forager: ForagerConfig,
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub weight: Cost,
}

impl Scenario {
    pub fn from_yaml_str(content: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn max_edge_weight(&self) -> Cost {
        self.edges.iter().map(|e| e.weight).max().unwrap_or(0)
    }

    pub fn total_value(&self) -> Value {
        self.nodes.iter().map(|n| n.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SewerEdge {
    pub from: String,
    pub to: String,
    pub weight: Cost,
}

/// Undirected weighted graph with a value on every vertex.
#[derive(Debug, Clone, Default)]
pub struct SewerMap {
    adjacency: BTreeMap<String, Vec<SewerEdge>>,
    values: BTreeMap<String, Value>,
}

impl SewerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: impl Into<String>, value: Value) -> Result<(), ScenarioError> {
        let id = id.into();
        if self.values.contains_key(&id) {
            return Err(ScenarioError::DuplicateVertex(id));
        }
        self.adjacency.insert(id.clone(), Vec::new());
        self.values.insert(id, value);
        Ok(())
    }

    /// Connect `a` and `b` both ways. A self-loop is stored once.
    pub fn add_edge(
        &mut self,
        a: impl Into<String>,
        b: impl Into<String>,
        weight: Cost,
    ) -> Result<(), ScenarioError> {
        let (a, b) = (a.into(), b.into());
        if !self.contains(&a) || !self.contains(&b) {
            return Err(ScenarioError::UnknownEdgeEndpoint { from: a, to: b });
        }

        let forward = SewerEdge {
            from: a.clone(),
            to: b.clone(),
            weight,
        };
        if let Some(out) = self.adjacency.get_mut(&a) {
            out.push(forward);
        }
        if a != b {
            if let Some(out) = self.adjacency.get_mut(&b) {
                out.push(SewerEdge {
                    from: b,
                    to: a,
                    weight,
                });
            }
        }
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &String> + '_ {
        self.values.keys()
    }

    pub fn value(&self, id: &str) -> Value {
        self.values.get(id).copied().unwrap_or(0)
    }

    /// Take whatever value is on `id`, leaving zero behind.
    pub fn take_value(&mut self, id: &str) -> Value {
        self.values
            .get_mut(id)
            .map(std::mem::take)
            .unwrap_or(0)
    }
}

impl WeightedDigraph for SewerMap {
    type Vertex = String;
    type Edge = SewerEdge;

    fn outgoing_edges(&self, vertex: &String) -> Vec<SewerEdge> {
        self.adjacency.get(vertex).cloned().unwrap_or_default()
    }

    fn source(&self, edge: &SewerEdge) -> String {
        edge.from.clone()
    }

    fn dest(&self, edge: &SewerEdge) -> String {
        edge.to.clone()
    }

    fn weight(&self, edge: &SewerEdge) -> Cost {
        edge.weight
    }
}

/// Reference environment implementing both [`SeekEnv`] and [`ScramEnv`].
///
/// Seek moves are tallied but not charged; scram moves are charged against
/// the budget and collect value on arrival.
#[derive(Debug, Clone)]
pub struct SimulatedSewer {
    map: SewerMap,
    current: String,
    target: String,
    exit: String,
    steps_to_go: Cost,
    seek_cost: Cost,
    collected: Value,
    target_distance: HashMap<String, Cost>,
    history: Vec<String>,
}

impl SimulatedSewer {
    pub fn new(
        map: SewerMap,
        start: impl Into<String>,
        target: impl Into<String>,
        exit: impl Into<String>,
        budget: Cost,
    ) -> Result<Self, ScenarioError> {
        let (start, target, exit) = (start.into(), target.into(), exit.into());
        for (role, id) in [("start", &start), ("target", &target), ("exit", &exit)] {
            if !map.contains(id) {
                return Err(ScenarioError::MissingVertex {
                    role,
                    id: id.clone(),
                });
            }
        }

        let target_distance: HashMap<String, Cost> = {
            let paths = ShortestPaths::from_source(&map, target.clone());
            paths.settled().into_iter().collect()
        };

        Ok(Self {
            map,
            history: vec![start.clone()],
            current: start,
            target,
            exit,
            steps_to_go: budget,
            seek_cost: 0,
            collected: 0,
            target_distance,
        })
    }

    pub fn from_scenario(scenario: &Scenario) -> Result<Self, ScenarioError> {
        let mut map = SewerMap::new();
        for node in &scenario.nodes {
            map.add_node(node.id.clone(), node.value)?;
        }
        for edge in &scenario.edges {
            map.add_edge(edge.from.clone(), edge.to.clone(), edge.weight)?;
        }
        Self::new(
            map,
            scenario.start.clone(),
            scenario.target.clone(),
            scenario.exit.clone(),
            scenario.budget,
        )
    }

    pub fn map(&self) -> &SewerMap {
        &self.map
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Every vertex the agent has stood on, in order, start first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn seek_cost(&self) -> Cost {
        self.seek_cost
    }

    pub fn collected(&self) -> Value {
        self.collected
    }

    fn edge_to(&self, to: &String) -> Result<SewerEdge, MoveError<String>> {
        self.map
            .edge_between(&self.current, to)
            .ok_or_else(|| MoveError::NotAdjacent {
                from: self.current.clone(),
                to: to.clone(),
            })
    }

    fn arrive(&mut self, to: &String) {
        self.current = to.clone();
        self.history.push(to.clone());
    }
}

impl SeekEnv for SimulatedSewer {
    type Vertex = String;

    fn current(&self) -> String {
        self.current.clone()
    }

    fn distance_to_target(&self) -> Cost {
        self.target_distance
            .get(&self.current)
            .copied()
            .unwrap_or(Cost::MAX)
    }

    fn neighbors(&self) -> Vec<NeighborStatus<String>> {
        self.map
            .successors(&self.current)
            .into_iter()
            .map(|id| {
                let estimate = self.target_distance.get(&id).copied().unwrap_or(Cost::MAX);
                NeighborStatus::new(id, estimate)
            })
            .collect()
    }

    fn move_to(&mut self, to: &String) -> Result<(), MoveError<String>> {
        let edge = self.edge_to(to)?;
        self.seek_cost = self.seek_cost.saturating_add(edge.weight);
        self.arrive(to);
        Ok(())
    }
}

impl ScramEnv for SimulatedSewer {
    type Vertex = String;
    type Graph = SewerMap;

    fn current(&self) -> String {
        self.current.clone()
    }

    fn exit(&self) -> String {
        self.exit.clone()
    }

    fn steps_to_go(&self) -> Cost {
        self.steps_to_go
    }

    fn graph(&self) -> &SewerMap {
        &self.map
    }

    fn vertices(&self) -> Vec<String> {
        self.map.ids().cloned().collect()
    }

    fn value(&self, vertex: &String) -> Value {
        self.map.value(vertex)
    }

    fn move_to(&mut self, to: &String) -> Result<(), MoveError<String>> {
        let edge = self.edge_to(to)?;
        if edge.weight > self.steps_to_go {
            return Err(MoveError::BudgetExhausted {
                to: to.clone(),
                needed: edge.weight,
                remaining: self.steps_to_go,
            });
        }
        self.steps_to_go -= edge.weight;
        self.arrive(to);
        self.collected += self.map.take_value(to);
        Ok(())
    }
}

use std::collections::{BTreeSet, HashSet};

use diver_nav::{Cost, ShortestPaths, Vertex, WeightedDigraph};
use serde::Serialize;

use crate::{ForagerConfig, ScramEnv, ScramError, Value};

/// Outcome of a scram phase. The agent is on the exit when this is returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScramReport {
    pub collected: Value,
    pub moves: usize,
    /// Steps chosen by the bounded hop lookahead.
    pub lookahead_moves: usize,
    /// Steps taken while travelling to the nearest known value.
    pub travel_moves: usize,
    /// Steps of the final trip to the exit.
    pub return_moves: usize,
    pub steps_remaining: Cost,
}

enum Decision<V> {
    Step(V),
    Travel(Vec<V>),
    ReturnHome,
}

enum TravelOutcome {
    Resume,
    ReturnHome,
}

/// Greedy value collection under a shrinking step budget.
///
/// Before every step the cost of the cheapest way back to the exit is
/// recomputed from the current position; as soon as the remaining budget
/// minus that cost drops below the safety margin the forager stops and walks
/// straight home.
#[derive(Debug)]
pub struct BudgetedForager<V> {
    config: ForagerConfig,
    consumed: HashSet<V>,
    report: ScramReport,
}

impl<V: Vertex> BudgetedForager<V> {
    pub fn new(config: ForagerConfig) -> Self {
        Self {
            config,
            consumed: HashSet::new(),
            report: ScramReport::default(),
        }
    }

    pub fn config(&self) -> &ForagerConfig {
        &self.config
    }

    pub fn scram<E>(mut self, env: &mut E) -> Result<ScramReport, ScramError<V>>
    where
        E: ScramEnv<Vertex = V>,
    {
        let exit = env.exit();
        // Value on the starting vertex is forfeited.
        self.consumed.insert(env.current());
        tracing::info!(
            start = ?env.current(),
            exit = ?exit,
            budget = env.steps_to_go(),
            margin = self.config.safety_margin,
            "scram started"
        );

        loop {
            let here = env.current();
            let decision = {
                let paths = ShortestPaths::from_source(env.graph(), here.clone());
                let return_cost = paths.distance(&exit)?;
                if !self.is_safe(env.steps_to_go(), return_cost) {
                    tracing::debug!(
                        budget = env.steps_to_go(),
                        return_cost,
                        "safety margin reached"
                    );
                    Decision::ReturnHome
                } else if let Some(next) = self.lookahead(env, &here) {
                    Decision::Step(next)
                } else if let Some(route) = self.nearest_value_route(env, &paths) {
                    Decision::Travel(route)
                } else {
                    tracing::debug!("no value left to collect");
                    Decision::ReturnHome
                }
            };

            match decision {
                Decision::Step(next) => {
                    self.step(env, next)?;
                    self.report.lookahead_moves += 1;
                }
                Decision::Travel(route) => match self.travel(env, route)? {
                    TravelOutcome::Resume => {}
                    TravelOutcome::ReturnHome => break,
                },
                Decision::ReturnHome => break,
            }
        }

        self.return_to_exit(env)?;
        self.report.steps_remaining = env.steps_to_go();
        tracing::info!(
            collected = self.report.collected,
            moves = self.report.moves,
            steps_remaining = self.report.steps_remaining,
            "scram finished"
        );
        Ok(self.report)
    }

    fn is_safe(&self, budget: Cost, return_cost: Cost) -> bool {
        budget
            .checked_sub(return_cost)
            .is_some_and(|slack| slack >= self.config.safety_margin)
    }

    fn return_cost<E>(&self, env: &E) -> Result<Cost, ScramError<V>>
    where
        E: ScramEnv<Vertex = V>,
    {
        let paths = ShortestPaths::from_source(env.graph(), env.current());
        Ok(paths.distance(&env.exit())?)
    }

    fn collectible<E>(&self, env: &E, vertex: &V) -> Value
    where
        E: ScramEnv<Vertex = V>,
    {
        if self.consumed.contains(vertex) {
            return 0;
        }
        env.value(vertex)
    }

    /// First-hop neighbour leading to the best value at the shallowest hop
    /// level that has any.
    fn lookahead<E>(&self, env: &E, here: &V) -> Option<V>
    where
        E: ScramEnv<Vertex = V>,
    {
        let graph = env.graph();
        let first_hops = graph.successors(here);

        for depth in 1..=self.config.effective_hops() {
            let mut best: Option<(Value, &V)> = None;
            for first in &first_hops {
                let mut layer = BTreeSet::from([first.clone()]);
                for _ in 1..depth {
                    layer = layer.iter().flat_map(|v| graph.successors(v)).collect();
                }
                let value = layer
                    .iter()
                    .map(|v| self.collectible(env, v))
                    .max()
                    .unwrap_or(0);
                if value > 0 && best.map_or(true, |(b, _)| value > b) {
                    best = Some((value, first));
                }
            }

            if let Some((value, first)) = best {
                tracing::debug!(depth, value, via = ?first, "lookahead found value");
                return Some(first.clone());
            }
        }
        None
    }

    /// Route (excluding the current vertex) to the closest vertex still
    /// holding value.
    fn nearest_value_route<E>(
        &self,
        env: &E,
        paths: &ShortestPaths<'_, E::Graph>,
    ) -> Option<Vec<V>>
    where
        E: ScramEnv<Vertex = V>,
    {
        let mut reachable: Vec<(Cost, V)> = env
            .vertices()
            .into_iter()
            .filter_map(|v| paths.distance(&v).ok().map(|d| (d, v)))
            .collect();
        reachable.sort();

        let (dist, target) = reachable
            .into_iter()
            .find(|(_, v)| self.collectible(env, v) > 0)?;
        tracing::debug!(target_vertex = ?target, dist, "travelling to nearest value");

        let mut route = paths.path_vertices(&target).ok()?;
        route.remove(0);
        Some(route)
    }

    fn travel<E>(&mut self, env: &mut E, route: Vec<V>) -> Result<TravelOutcome, ScramError<V>>
    where
        E: ScramEnv<Vertex = V>,
    {
        for next in route {
            let return_cost = self.return_cost(env)?;
            if !self.is_safe(env.steps_to_go(), return_cost) {
                tracing::debug!(return_cost, "safety margin reached while travelling");
                return Ok(TravelOutcome::ReturnHome);
            }

            let here = env.current();
            let closer = env
                .graph()
                .successors(&here)
                .into_iter()
                .any(|v| self.collectible(env, &v) > 0);
            if closer {
                tracing::debug!(at = ?here, "value visible nearby, abandoning travel");
                return Ok(TravelOutcome::Resume);
            }

            self.step(env, next)?;
            self.report.travel_moves += 1;
        }
        Ok(TravelOutcome::Resume)
    }

    fn return_to_exit<E>(&mut self, env: &mut E) -> Result<(), ScramError<V>>
    where
        E: ScramEnv<Vertex = V>,
    {
        let route = {
            let paths = ShortestPaths::from_source(env.graph(), env.current());
            paths.path_vertices(&env.exit())?
        };
        tracing::debug!(hops = route.len() - 1, "returning to exit");

        for next in route.into_iter().skip(1) {
            self.step(env, next)?;
            self.report.return_moves += 1;
        }
        Ok(())
    }

    fn step<E>(&mut self, env: &mut E, next: V) -> Result<(), ScramError<V>>
    where
        E: ScramEnv<Vertex = V>,
    {
        let gain = self.collectible(env, &next);
        env.move_to(&next)?;
        self.report.moves += 1;
        if self.consumed.insert(next) {
            self.report.collected += gain;
        }
        Ok(())
    }
}

use diver_nav::Vertex;
use serde::Serialize;

use crate::{
    BudgetedForager, ExpeditionError, ExplorationWalker, ForagerConfig, ScramEnv, ScramReport,
    SeekEnv, SeekReport,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpeditionReport<V> {
    pub seek: SeekReport<V>,
    pub scram: ScramReport,
}

/// Seek the target, then scram for the exit, on one environment.
pub fn run_expedition<E, V>(
    env: &mut E,
    config: ForagerConfig,
) -> Result<ExpeditionReport<V>, ExpeditionError<V>>
where
    V: Vertex,
    E: SeekEnv<Vertex = V> + ScramEnv<Vertex = V>,
{
    let seek = ExplorationWalker::new().seek(env)?;
    tracing::info!(
        moves = seek.moves,
        visited = seek.visit_order.len(),
        "seek phase complete"
    );

    let scram = BudgetedForager::new(config).scram(env)?;
    Ok(ExpeditionReport { seek, scram })
}

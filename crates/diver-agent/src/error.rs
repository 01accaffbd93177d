use diver_nav::{Cost, PathError};
use thiserror::Error;

/// Rejected move. The phases never issue one; seeing this means the
/// environment and the agent disagree about the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError<V> {
    #[error("cannot move from {from:?} to non-adjacent vertex {to:?}")]
    NotAdjacent { from: V, to: V },

    #[error("move to {to:?} costs {needed} but only {remaining} steps remain")]
    BudgetExhausted { to: V, needed: Cost, remaining: Cost },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeekError<V> {
    #[error("target not reachable: search exhausted after visiting {visited} vertices")]
    TargetUnreachable { visited: usize },

    #[error(transparent)]
    Move(#[from] MoveError<V>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScramError<V> {
    #[error("exit unreachable: {0}")]
    ExitUnreachable(#[from] PathError<V>),

    #[error(transparent)]
    Move(#[from] MoveError<V>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpeditionError<V> {
    #[error("seek phase failed: {0}")]
    Seek(#[from] SeekError<V>),

    #[error("scram phase failed: {0}")]
    Scram(#[from] ScramError<V>),
}

/// Problems building a [`crate::SimulatedSewer`] from a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("vertex {0:?} is declared more than once")]
    DuplicateVertex(String),

    #[error("edge {from:?} -> {to:?} references an undeclared vertex")]
    UnknownEdgeEndpoint { from: String, to: String },

    #[error("{role} vertex {id:?} is not declared")]
    MissingVertex { role: &'static str, id: String },
}

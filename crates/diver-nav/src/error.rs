use thiserror::Error;

/// Query failures on a [`crate::ShortestPaths`] result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError<V> {
    #[error("no single-source computation has been run")]
    NotComputed,

    #[error("vertex {0:?} is unreachable from the source")]
    Unreachable(V),
}

//! Seek and scram phases for an agent exploring a weighted graph.
//!
//! The agent first walks an only-partially-revealed graph until it stands on
//! the target ([`walker`]), then forages for value on the fully known graph
//! while always keeping enough budget to reach the exit ([`forager`]).
//! Environments plug in through the traits in [`env`]; [`sim`] is a small
//! in-memory implementation used by tests and the CLI.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod env;
pub mod error;
pub mod expedition;
pub mod forager;
pub mod sim;
pub mod walker;

pub use config::ForagerConfig;
pub use env::{NeighborStatus, ScramEnv, SeekEnv, Value};
pub use error::{ExpeditionError, MoveError, ScenarioError, ScramError, SeekError};
pub use expedition::{run_expedition, ExpeditionReport};
pub use forager::{BudgetedForager, ScramReport};
pub use sim::{Scenario, SewerEdge, SewerMap, SimulatedSewer};
pub use walker::{ExplorationWalker, SeekReport};

//! Forager tuning.

use diver_nav::Cost;
use serde::{Deserialize, Serialize};

/// Budget and lookahead settings for the scram phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForagerConfig {
    /// Slack that must remain after paying for the trip home before another
    /// foraging step is allowed. Must cover the cost of one step out plus the
    /// extra it can add to the trip home, i.e. twice the heaviest edge.
    #[serde(default = "default_safety_margin")]
    pub safety_margin: Cost,

    /// Deepest hop level scanned for visible value before falling back to
    /// travelling to the nearest value. Clamped to at least 1.
    #[serde(default = "default_lookahead_hops")]
    pub lookahead_hops: usize,
}

fn default_safety_margin() -> Cost {
    30
}
fn default_lookahead_hops() -> usize {
    3
}

impl Default for ForagerConfig {
    fn default() -> Self {
        Self {
            safety_margin: default_safety_margin(),
            lookahead_hops: default_lookahead_hops(),
        }
    }
}

impl ForagerConfig {
    /// Margin sized for a graph whose heaviest single step costs `max_step`.
    pub fn for_max_step_cost(max_step: Cost) -> Self {
        Self {
            safety_margin: max_step.saturating_mul(2),
            ..Self::default()
        }
    }

    pub fn with_lookahead_hops(mut self, hops: usize) -> Self {
        self.lookahead_hops = hops;
        self
    }

    pub(crate) fn effective_hops(&self) -> usize {
        self.lookahead_hops.max(1)
    }
}

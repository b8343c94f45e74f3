//! Two-tier convergence detection.
//!
//! # Tier 1: Spread
//!
//! If every value lies within `epsilon` of every other (max − min < ε), the
//! network has converged. This tier is read-only.
//!
//! # Tier 2: Change Ratio
//!
//! Otherwise, count the agents whose value moved by more than ε since the last
//! snapshot. Fewer than 20% moving counts as converged. The snapshot is
//! refreshed every time this tier runs, whatever it decides.
//!
//! The second tier can stop a run while a small minority of agents is still
//! moving. Round counts depend on exactly when the snapshot is refreshed, so
//! tier order and refresh timing must not change.

use std::collections::HashMap;

use concord_topology::{AgentId, Network};
use serde::{Deserialize, Serialize};

use crate::rule::CHANGE_RATIO_THRESHOLD;

/// Which tier decided a convergence check, and with what figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tier")]
pub enum Convergence {
    /// No agents at all
    Vacuous,
    /// Values lie within epsilon of each other
    Spread { spread: f64 },
    /// Under the change-ratio threshold of agents moved
    Settled { changed: usize, total: usize },
    /// Too many agents moved since the last snapshot
    Moving { changed: usize, total: usize },
}

impl Convergence {
    /// Whether this outcome counts as converged.
    pub fn is_converged(&self) -> bool {
        !matches!(self, Convergence::Moving { .. })
    }

    /// Fraction of agents that moved, for change-ratio outcomes.
    pub fn change_ratio(&self) -> Option<f64> {
        match *self {
            Convergence::Settled { changed, total } | Convergence::Moving { changed, total } => {
                Some(changed as f64 / total as f64)
            }
            _ => None,
        }
    }
}

/// `max − min` over the network's values, `None` when it has no agents.
pub fn spread(network: &Network) -> Option<f64> {
    let mut values = network.agents().iter().map(|a| a.value());
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some(max - min)
}

/// Holds the previous-value snapshot and evaluates the two-tier predicate.
#[derive(Debug, Clone, Default)]
pub struct ConvergenceMonitor {
    previous: HashMap<AgentId, f64>,
}

impl ConvergenceMonitor {
    /// Create a monitor with an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with the network's current values.
    pub fn capture(&mut self, network: &Network) {
        self.previous = network
            .agents()
            .iter()
            .map(|a| (a.id(), a.value()))
            .collect();
    }

    /// Snapshotted value of an agent, if any.
    pub fn previous_value(&self, id: AgentId) -> Option<f64> {
        self.previous.get(&id).copied()
    }

    /// Evaluate both tiers in order.
    pub fn check(&mut self, network: &Network, epsilon: f64) -> Convergence {
        let Some(spread) = spread(network) else {
            return Convergence::Vacuous;
        };
        if spread < epsilon {
            return Convergence::Spread { spread };
        }

        let total = network.len();
        let changed = network
            .agents()
            .iter()
            .filter(|a| {
                let old = self.previous.get(&a.id()).copied().unwrap_or(a.value());
                (a.value() - old).abs() > epsilon
            })
            .count();
        self.capture(network);

        if (changed as f64 / total as f64) < CHANGE_RATIO_THRESHOLD {
            Convergence::Settled { changed, total }
        } else {
            Convergence::Moving { changed, total }
        }
    }
}

//! Neighbor-Averaging Consensus
//!
//! Agents on a fixed graph repeatedly blend their value with their neighbors'
//! until the network stabilizes. There is no messaging and no failure model:
//! every round is a pure function of the previous one.
//!
//! # Rounds
//!
//! A round is synchronous. All new values are computed from a snapshot of the
//! values at round start, then committed together:
//!
//! ```text
//! next(a) = a + α × ((a + Σ neighbors(a)) / (1 + deg(a)) − a)
//! ```
//!
//! Isolated agents keep their value.
//!
//! # Stopping
//!
//! After each round a two-tier predicate runs:
//! 1. spread (max − min) below ε → converged
//! 2. fewer than 20% of agents moved by more than ε since the last check → converged
//!
//! The second tier is a heuristic. It can stop a run while a few agents are
//! still moving, and the value the network settles on is not in general the
//! arithmetic mean of the initial values.
//!
//! # Usage
//!
//! ```
//! use concord_consensus::ConsensusSimulation;
//! use concord_topology::Network;
//!
//! let mut net = Network::new();
//! net.add_agent(0, 0.0)?;
//! net.add_agent(1, 10.0)?;
//! net.add_edge(0, 1)?;
//!
//! let rounds = ConsensusSimulation::new(&mut net, 0.5)?.run(1000, 1e-3);
//! assert!(rounds < 1000);
//! // The change-ratio tier may stop before the spread drops below epsilon.
//! assert!((net.value(0).unwrap() - net.value(1).unwrap()).abs() < 1e-2);
//! # Ok::<(), concord_consensus::Error>(())
//! ```

mod config;
mod convergence;
mod error;
mod rule;
mod simulation;

pub use config::SimulationConfig;
pub use convergence::{spread, Convergence, ConvergenceMonitor};
pub use error::{Error, Result};
pub use rule::{
    blend, is_valid_step_size, local_average, CHANGE_RATIO_THRESHOLD, DEFAULT_EPSILON,
    DEFAULT_MAX_ROUNDS, DEFAULT_STEP_SIZE,
};
pub use simulation::{ConsensusSimulation, RunOutcome};

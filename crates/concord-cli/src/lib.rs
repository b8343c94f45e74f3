//! Concord Example Driver
//!
//! Builds a small sample graph, runs the consensus engine on it and reports
//! the result.
//!
//! # Usage
//!
//! ```text
//! concord [step_size] [max_rounds] [epsilon]
//! ```
//!
//! Missing or unparsable arguments fall back to [`SimulationConfig`] defaults,
//! except epsilon, which defaults to [`SAMPLE_EPSILON`].

use std::collections::BTreeMap;

use concord_consensus::{ConsensusSimulation, Convergence, Result, SimulationConfig};
use concord_topology::Network;
use serde::Serialize;
use tracing::info;

/// Initial values of the sample line graph, by agent id.
pub const SAMPLE_VALUES: [f64; 4] = [10.0, 0.0, 20.0, 30.0];

/// Convergence tolerance for the sample run when none is given.
pub const SAMPLE_EPSILON: f64 = 1e-4;

/// The sample graph: agents 0..3 in a line (0-1, 1-2, 2-3).
pub fn sample_network() -> Result<Network> {
    let mut net = Network::new();
    for (id, &value) in SAMPLE_VALUES.iter().enumerate() {
        net.add_agent(id as i64, value)?;
    }
    net.add_edge(0, 1)?;
    net.add_edge(1, 2)?;
    net.add_edge(2, 3)?;
    Ok(net)
}

/// Read `[step_size] [max_rounds] [epsilon]` (program name already stripped).
pub fn config_from_args<I, S>(args: I) -> SimulationConfig
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<S> = args.into_iter().collect();
    let defaults = SimulationConfig::default();

    SimulationConfig {
        step_size: parse_arg(&args, 0).unwrap_or(defaults.step_size),
        max_rounds: parse_arg(&args, 1).unwrap_or(defaults.max_rounds),
        epsilon: parse_arg(&args, 2).unwrap_or(SAMPLE_EPSILON),
    }
}

fn parse_arg<S: AsRef<str>, T: std::str::FromStr>(args: &[S], index: usize) -> Option<T> {
    args.get(index).and_then(|s| s.as_ref().parse().ok())
}

/// Result of one driver run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub config: SimulationConfig,
    pub rounds: usize,
    pub converged: bool,
    pub last_check: Option<Convergence>,
    pub initial_values: BTreeMap<i64, f64>,
    pub final_values: BTreeMap<i64, f64>,
}

/// Run the configured simulation on `network` and collect a report.
pub fn run(network: &mut Network, config: &SimulationConfig) -> Result<RunReport> {
    let initial_values = plain_values(network);
    info!(?initial_values, "initial values");

    let outcome = ConsensusSimulation::with_config(network, config)?.run_configured();
    info!(rounds = outcome.rounds, converged = outcome.converged, "simulation complete");

    Ok(RunReport {
        config: config.clone(),
        rounds: outcome.rounds,
        converged: outcome.converged,
        last_check: outcome.last,
        initial_values,
        final_values: plain_values(network),
    })
}

fn plain_values(network: &Network) -> BTreeMap<i64, f64> {
    network
        .get_all_values()
        .into_iter()
        .map(|(id, value)| (id.value(), value))
        .collect()
}

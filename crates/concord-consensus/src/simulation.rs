//! Round orchestration: synchronous updates and the run loop.

use concord_topology::Network;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::convergence::{self, Convergence, ConvergenceMonitor};
use crate::error::{Error, Result};
use crate::rule::{blend, is_valid_step_size};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Rounds completed by the simulation so far
    pub rounds: usize,
    /// Whether the last check reported convergence
    pub converged: bool,
    /// The last convergence check, if any round ran
    pub last: Option<Convergence>,
}

/// Drives a [`Network`] through synchronous averaging rounds.
///
/// The simulation borrows the network mutably; values written by each round
/// are visible through [`network`](Self::network) and, once the simulation is
/// dropped, through the network itself.
#[derive(Debug)]
pub struct ConsensusSimulation<'a> {
    network: &'a mut Network,
    config: SimulationConfig,
    current_round: usize,
    monitor: ConvergenceMonitor,
}

impl<'a> ConsensusSimulation<'a> {
    /// Create a simulation with the given step size in (0, 1].
    pub fn new(network: &'a mut Network, step_size: f64) -> Result<Self> {
        if !is_valid_step_size(step_size) {
            return Err(Error::InvalidConfiguration {
                parameter: "step_size",
                value: step_size,
            });
        }
        let config = SimulationConfig {
            step_size,
            ..SimulationConfig::default()
        };
        Ok(Self::from_parts(network, config))
    }

    /// Create a simulation from a full configuration.
    ///
    /// The config's round budget and epsilon are used by
    /// [`run_configured`](Self::run_configured).
    pub fn with_config(network: &'a mut Network, config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(network, config.clone()))
    }

    fn from_parts(network: &'a mut Network, config: SimulationConfig) -> Self {
        Self {
            network,
            config,
            current_round: 0,
            monitor: ConvergenceMonitor::new(),
        }
    }

    /// The fixed step size α.
    pub fn step_size(&self) -> f64 {
        self.config.step_size
    }

    /// Rounds completed so far.
    pub fn current_round(&self) -> usize {
        self.current_round
    }

    /// Read access to the network being simulated.
    pub fn network(&self) -> &Network {
        self.network
    }

    /// Current spread of values, `None` for an empty network.
    pub fn spread(&self) -> Option<f64> {
        convergence::spread(self.network)
    }

    /// Run one synchronous round.
    ///
    /// Every new value is computed from the values in effect when the round
    /// started; nothing is written until all of them are known.
    pub fn step(&mut self) {
        let snapshot = self.network.values();
        let step_size = self.config.step_size;

        let next: Vec<f64> = self
            .network
            .agents()
            .iter()
            .zip(&snapshot)
            .map(|(agent, &own)| {
                let neighbor_sum: f64 = self
                    .network
                    .neighbor_slots(agent)
                    .map(|slot| snapshot[slot])
                    .sum();
                blend(own, neighbor_sum, agent.degree(), step_size)
            })
            .collect();

        self.network.commit_values(&next);
        self.current_round += 1;
        debug!(round = self.current_round, agents = next.len(), "round applied");
    }

    /// Snapshot current values as the baseline for the change-ratio tier.
    ///
    /// [`run`](Self::run) does this itself. Callers driving [`step`](Self::step)
    /// and [`has_converged`](Self::has_converged) by hand call it first;
    /// without a baseline every agent counts as unchanged.
    pub fn initialize_previous_values(&mut self) {
        self.monitor.capture(self.network);
    }

    /// Two-tier convergence predicate. See [`ConvergenceMonitor::check`].
    pub fn has_converged(&mut self, epsilon: f64) -> bool {
        self.check_convergence(epsilon).is_converged()
    }

    /// Same as [`has_converged`](Self::has_converged), reporting which tier decided.
    pub fn check_convergence(&mut self, epsilon: f64) -> Convergence {
        let verdict = self.monitor.check(self.network, epsilon);
        debug!(round = self.current_round, ?verdict, "convergence check");
        verdict
    }

    /// Run until convergence or until `max_rounds` rounds have executed.
    ///
    /// Returns the number of completed rounds. The check follows each round,
    /// so any budget of at least one runs at least one round.
    pub fn run(&mut self, max_rounds: usize, epsilon: f64) -> usize {
        self.run_to_outcome(max_rounds, epsilon).rounds
    }

    /// Run with the round budget and epsilon from the configuration.
    pub fn run_configured(&mut self) -> RunOutcome {
        let (max_rounds, epsilon) = (self.config.max_rounds, self.config.epsilon);
        self.run_to_outcome(max_rounds, epsilon)
    }

    /// Like [`run`](Self::run), also reporting whether the run converged.
    pub fn run_to_outcome(&mut self, max_rounds: usize, epsilon: f64) -> RunOutcome {
        self.initialize_previous_values();

        let mut last = None;
        for _ in 0..max_rounds {
            self.step();
            let verdict = self.check_convergence(epsilon);
            last = Some(verdict);

            if verdict.is_converged() {
                info!(rounds = self.current_round, ?verdict, "converged");
                return RunOutcome {
                    rounds: self.current_round,
                    converged: true,
                    last,
                };
            }
        }

        if max_rounds > 0 {
            warn!(
                rounds = self.current_round,
                spread = ?self.spread(),
                "round budget exhausted before convergence"
            );
        }
        RunOutcome {
            rounds: self.current_round,
            converged: false,
            last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_topology::AgentId;
    use proptest::prelude::*;

    fn line() -> Network {
        let mut net = Network::new();
        for i in 0..4 {
            net.add_agent(i, (i * 10) as f64).unwrap();
        }
        net.add_edge(0, 1).unwrap();
        net.add_edge(1, 2).unwrap();
        net.add_edge(2, 3).unwrap();
        net
    }

    #[test]
    fn invalid_step_sizes_rejected() {
        for step_size in [0.0, 1.5, -0.2, f64::NAN] {
            let mut net = line();
            let result = ConsensusSimulation::new(&mut net, step_size);
            assert!(
                matches!(result, Err(Error::InvalidConfiguration { parameter: "step_size", .. })),
                "step size {} should be rejected",
                step_size
            );
        }
    }

    #[test]
    fn boundary_step_sizes_accepted() {
        for step_size in [1.0, 0.0001] {
            let mut net = line();
            let sim = ConsensusSimulation::new(&mut net, step_size).unwrap();
            assert_eq!(sim.step_size(), step_size);
            assert_eq!(sim.current_round(), 0);
        }
    }

    #[test]
    fn with_config_validates_epsilon() {
        let mut net = line();
        let config = SimulationConfig { epsilon: 0.0, ..Default::default() };
        assert!(ConsensusSimulation::with_config(&mut net, &config).is_err());
    }

    #[test]
    fn step_uses_round_start_values() {
        let mut net = line();
        let mut sim = ConsensusSimulation::new(&mut net, 0.5).unwrap();
        sim.step();
        assert_eq!(sim.current_round(), 1);
        // Sequential application would have fed agent 0's 2.5 into agent 1.
        assert_eq!(sim.network().values(), vec![2.5, 10.0, 20.0, 27.5]);
    }

    #[test]
    fn full_step_moves_to_local_average() {
        let mut net = line();
        let mut sim = ConsensusSimulation::new(&mut net, 1.0).unwrap();
        sim.step();
        assert_eq!(sim.network().values(), vec![5.0, 10.0, 20.0, 25.0]);
    }

    #[test]
    fn self_edge_counts_the_agent_twice() {
        let mut net = line();
        net.add_edge(0, 0).unwrap();
        let mut sim = ConsensusSimulation::new(&mut net, 0.5).unwrap();
        sim.step();
        // Agent 0 sees neighbors [1, 0, 0]: (0 + 10 + 0 + 0) / 4 = 2.5.
        assert_eq!(sim.network().value(0), Some(1.25));
    }

    #[test]
    fn run_on_empty_network_is_one_round() {
        let mut net = Network::new();
        let mut sim = ConsensusSimulation::new(&mut net, 0.5).unwrap();
        let outcome = sim.run_to_outcome(1000, 1e-3);
        assert_eq!(outcome.rounds, 1);
        assert!(outcome.converged);
        assert_eq!(outcome.last, Some(Convergence::Vacuous));
    }

    #[test]
    fn run_on_single_agent_is_one_round() {
        let mut net = Network::new();
        net.add_agent(0, 42.0).unwrap();
        {
            let mut sim = ConsensusSimulation::new(&mut net, 0.5).unwrap();
            assert_eq!(sim.run(1000, 1e-3), 1);
        }
        assert_eq!(net.value(0), Some(42.0));
    }

    #[test]
    fn zero_budget_runs_nothing() {
        let mut net = line();
        let mut sim = ConsensusSimulation::new(&mut net, 0.5).unwrap();
        let outcome = sim.run_to_outcome(0, 1e-3);
        assert_eq!(outcome.rounds, 0);
        assert!(!outcome.converged);
        assert_eq!(outcome.last, None);
        assert_eq!(sim.network().values(), vec![0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn line_converges_near_fifteen() {
        let mut net = line();
        let rounds = {
            let mut sim = ConsensusSimulation::new(&mut net, 0.5).unwrap();
            sim.run(200, 1e-5)
        };
        assert!(rounds < 200, "took {} rounds", rounds);
        for (id, value) in net.get_all_values() {
            assert!((value - 15.0).abs() < 0.5, "agent {} ended at {}", id, value);
        }
    }

    #[test]
    fn loose_epsilon_stops_earlier() {
        let mut net = line();
        let mut sim = ConsensusSimulation::new(&mut net, 0.5).unwrap();
        assert!(sim.run(100, 1e-3) < 100);
    }

    #[test]
    fn budget_exhaustion_is_reported() {
        let mut net = line();
        let mut sim = ConsensusSimulation::new(&mut net, 0.0001).unwrap();
        let outcome = sim.run_to_outcome(3, 1e-9);
        assert_eq!(outcome.rounds, 3);
        assert!(!outcome.converged);
        assert!(matches!(outcome.last, Some(Convergence::Moving { .. })));
    }

    #[test]
    fn run_configured_uses_config_budget() {
        let mut net = line();
        let config = SimulationConfig {
            step_size: 0.5,
            max_rounds: 2,
            epsilon: 1e-9,
        };
        let mut sim = ConsensusSimulation::with_config(&mut net, &config).unwrap();
        assert_eq!(sim.run_configured().rounds, 2);
    }

    #[test]
    fn manual_rounds_compare_against_initial_values() {
        let mut net = line();
        let mut sim = ConsensusSimulation::new(&mut net, 0.5).unwrap();
        sim.initialize_previous_values();
        sim.step();
        // Only the endpoints move in the first round: 0 -> 2.5 and 30 -> 27.5.
        assert_eq!(
            sim.check_convergence(1e-3),
            Convergence::Moving { changed: 2, total: 4 }
        );
        assert!(!sim.has_converged(1e-3));
    }

    #[test]
    fn manual_rounds_without_baseline_see_no_change() {
        let mut net = line();
        let mut sim = ConsensusSimulation::new(&mut net, 0.5).unwrap();
        sim.step();
        assert_eq!(
            sim.check_convergence(1e-3),
            Convergence::Settled { changed: 0, total: 4 }
        );
    }

    #[test]
    fn spread_check_does_not_touch_snapshot() {
        let mut net = Network::new();
        net.add_agent(0, 1.0).unwrap();
        net.add_agent(1, 1.0).unwrap();
        net.add_edge(0, 1).unwrap();

        let mut sim = ConsensusSimulation::new(&mut net, 0.5).unwrap();
        sim.step();
        assert_eq!(sim.check_convergence(1e-3), Convergence::Spread { spread: 0.0 });
        assert_eq!(sim.monitor.previous_value(AgentId(0)), None);
    }

    proptest! {
        #[test]
        fn isolated_agents_never_move(
            values in proptest::collection::vec(-1e6f64..1e6, 1..12),
            step_size in 0.0001f64..=1.0,
            rounds in 1usize..30,
        ) {
            let mut net = Network::new();
            for (i, v) in values.iter().enumerate() {
                net.add_agent(i as i64, *v).unwrap();
            }
            // Chain every agent except the last, which stays isolated.
            for i in 1..values.len().saturating_sub(1) {
                net.add_edge(i as i64 - 1, i as i64).unwrap();
            }
            let isolated = (values.len() - 1) as i64;

            let mut sim = ConsensusSimulation::new(&mut net, step_size).unwrap();
            for _ in 0..rounds {
                sim.step();
            }
            prop_assert_eq!(sim.current_round(), rounds);
            prop_assert_eq!(sim.network().value(isolated), values.last().copied());
        }

        #[test]
        fn step_matches_snapshot_formula(
            values in proptest::collection::vec(-100f64..100.0, 2..10),
            edges in proptest::collection::vec((0usize..10, 0usize..10), 0..20),
            step_size in 0.0001f64..=1.0,
        ) {
            let n = values.len();
            let mut net = Network::new();
            for (i, v) in values.iter().enumerate() {
                net.add_agent(i as i64, *v).unwrap();
            }
            for (a, b) in edges {
                if a < n && b < n {
                    net.add_edge(a as i64, b as i64).unwrap();
                }
            }

            let before = net.get_all_values();
            let expected: Vec<f64> = net
                .agents()
                .iter()
                .map(|agent| {
                    let sum: f64 = agent.neighbors().iter().map(|id| before[id]).sum();
                    blend(agent.value(), sum, agent.neighbors().len(), step_size)
                })
                .collect();

            let mut sim = ConsensusSimulation::new(&mut net, step_size).unwrap();
            sim.step();
            prop_assert_eq!(sim.network().values(), expected);
        }
    }
}

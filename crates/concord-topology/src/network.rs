//! The agent network: insertion-ordered storage with an id index.
//!
//! Agents live in a dense `Vec` in the order they were added. Each agent's
//! position in that vector is its *slot*; the engine snapshots and commits
//! values slot by slot so a round never interleaves reads and writes.

use std::collections::{BTreeMap, HashMap};

use crate::{Agent, AgentId, Result, TopologyError};

/// A fixed graph of agents joined by symmetric edges.
#[derive(Debug, Clone, Default)]
pub struct Network {
    agents: Vec<Agent>,
    index: HashMap<AgentId, usize>,
    edges: usize,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent with an empty neighbor list.
    ///
    /// Fails with [`TopologyError::DuplicateIdentifier`] if the id is taken;
    /// the existing agent is left untouched.
    pub fn add_agent(&mut self, id: impl Into<AgentId>, initial_value: f64) -> Result<()> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(TopologyError::DuplicateIdentifier(id));
        }
        self.index.insert(id, self.agents.len());
        self.agents.push(Agent::new(id, initial_value));
        Ok(())
    }

    /// Add a symmetric edge between `a` and `b`.
    ///
    /// Both endpoints are resolved before anything is written, so a missing id
    /// leaves every neighbor list as it was. `a == b` is accepted and appends
    /// the agent to its own list twice.
    pub fn add_edge(&mut self, a: impl Into<AgentId>, b: impl Into<AgentId>) -> Result<()> {
        let (a, b) = (a.into(), b.into());
        let slot_a = self.slot_of(a).ok_or(TopologyError::UnknownAgent(a))?;
        let slot_b = self.slot_of(b).ok_or(TopologyError::UnknownAgent(b))?;

        self.agents[slot_a].push_neighbor(b);
        self.agents[slot_b].push_neighbor(a);
        self.edges += 1;
        Ok(())
    }

    /// Snapshot of every agent's current value, keyed by id.
    ///
    /// The map is detached from the network; later rounds do not update it.
    pub fn get_all_values(&self) -> BTreeMap<AgentId, f64> {
        self.agents.iter().map(|a| (a.id(), a.value())).collect()
    }

    /// Current values in slot (insertion) order.
    pub fn values(&self) -> Vec<f64> {
        self.agents.iter().map(Agent::value).collect()
    }

    /// Write a full round of values back, slot by slot.
    ///
    /// # Panics
    ///
    /// Panics unless `next` holds exactly one value per agent. Nothing is
    /// written in that case.
    pub fn commit_values(&mut self, next: &[f64]) {
        assert_eq!(next.len(), self.agents.len(), "round buffer size mismatch");
        for (agent, &value) in self.agents.iter_mut().zip(next) {
            agent.update_value(value);
        }
    }

    /// Slots of an agent's neighbors, in neighbor-list order.
    pub fn neighbor_slots<'a>(&'a self, agent: &'a Agent) -> impl Iterator<Item = usize> + 'a {
        // Edges are only created between indexed agents and nothing is removed,
        // so every neighbor id resolves.
        agent.neighbors().iter().filter_map(move |id| self.slot_of(*id))
    }

    /// Look up an agent by id.
    pub fn agent(&self, id: impl Into<AgentId>) -> Option<&Agent> {
        self.slot_of(id.into()).map(|slot| &self.agents[slot])
    }

    /// Current value of an agent.
    pub fn value(&self, id: impl Into<AgentId>) -> Option<f64> {
        self.agent(id).map(Agent::value)
    }

    /// All agents in insertion order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Whether an agent with this id exists.
    pub fn contains(&self, id: impl Into<AgentId>) -> bool {
        self.index.contains_key(&id.into())
    }

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the network has no agents.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Number of successful `add_edge` calls.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    fn slot_of(&self, id: AgentId) -> Option<usize> {
        self.index.get(&id).copied()
    }
}

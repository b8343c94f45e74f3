//! Agents: one participant, one value, an ordered neighbor list.

use std::fmt;

/// An agent identifier, unique within a [`Network`](crate::Network).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub i64);

impl AgentId {
    /// Create from a raw id.
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for AgentId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i32> for AgentId {
    fn from(value: i32) -> Self {
        Self(i64::from(value))
    }
}

impl From<AgentId> for i64 {
    fn from(value: AgentId) -> Self {
        value.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant in the network.
///
/// The id is fixed at creation. The neighbor list grows in edge-addition order
/// and is never deduplicated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    id: AgentId,
    value: f64,
    neighbors: Vec<AgentId>,
}

impl Agent {
    /// Create an agent with no neighbors.
    pub fn new(id: impl Into<AgentId>, value: f64) -> Self {
        Self {
            id: id.into(),
            value,
            neighbors: Vec::new(),
        }
    }

    /// The agent's identifier.
    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// The agent's current value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Neighbor ids in edge-addition order.
    #[inline]
    pub fn neighbors(&self) -> &[AgentId] {
        &self.neighbors
    }

    /// Number of neighbor entries, duplicates included.
    #[inline]
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Whether the agent has no neighbors at all.
    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Overwrite the agent's value.
    pub fn update_value(&mut self, value: f64) {
        self.value = value;
    }

    pub(crate) fn push_neighbor(&mut self, id: AgentId) {
        self.neighbors.push(id);
    }
}

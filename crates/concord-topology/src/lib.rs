//! Concord Agent Topology
//!
//! The fixed graph over which values diffuse: agents holding one numeric value
//! each, joined by symmetric, unweighted edges.
//!
//! # Ordering
//!
//! Agents are stored in insertion order and looked up through an id index.
//! Neighbor lists keep edge-addition order (duplicates included), so any
//! summation over neighbors is reproducible bit for bit.
//!
//! # Permissive Edges
//!
//! The graph does not reject self-edges or repeated edges:
//! - `add_edge(a, a)` appends `a` to its own neighbor list twice
//! - adding `a - b` twice leaves two entries on each side

mod agent;
mod error;
mod network;

pub use agent::{Agent, AgentId};
pub use error::{Result, TopologyError};
pub use network::Network;

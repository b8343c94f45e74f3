//! Graph fixtures shared by the end-to-end scenarios.

use concord_topology::{Network, Result};

/// Agents `0..values.len()` joined in a line, in id order.
pub fn line(values: &[f64]) -> Result<Network> {
    let mut net = with_agents(values)?;
    for i in 1..values.len() as i64 {
        net.add_edge(i - 1, i)?;
    }
    Ok(net)
}

/// Agents `0..values.len()` joined in a ring. Needs at least three agents to
/// avoid repeated edges.
pub fn ring(values: &[f64]) -> Result<Network> {
    let mut net = line(values)?;
    if values.len() >= 3 {
        net.add_edge(values.len() as i64 - 1, 0)?;
    }
    Ok(net)
}

/// Agent 0 at the center, every other agent attached only to it.
pub fn star(values: &[f64]) -> Result<Network> {
    let mut net = with_agents(values)?;
    for i in 1..values.len() as i64 {
        net.add_edge(0, i)?;
    }
    Ok(net)
}

/// Agents with the given values and no edges.
pub fn with_agents(values: &[f64]) -> Result<Network> {
    let mut net = Network::new();
    for (id, &value) in values.iter().enumerate() {
        net.add_agent(id as i64, value)?;
    }
    Ok(net)
}

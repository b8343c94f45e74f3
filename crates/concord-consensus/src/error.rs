//! Error types for concord-consensus.

use concord_topology::TopologyError;
use thiserror::Error;

/// Result type for concord-consensus operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A simulation parameter is out of range.
    #[error("invalid configuration: {parameter} = {value}")]
    InvalidConfiguration {
        parameter: &'static str,
        value: f64,
    },

    /// Building the network failed.
    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),
}

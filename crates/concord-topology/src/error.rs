//! Error types for topology construction.

use thiserror::Error;

use crate::AgentId;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors raised while building a network. Neither variant mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// An agent with this id already exists
    #[error("duplicate agent identifier: {0}")]
    DuplicateIdentifier(AgentId),

    /// An edge endpoint does not exist
    #[error("unknown agent: {0}")]
    UnknownAgent(AgentId),
}

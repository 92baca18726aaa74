//! Error types for the ring crate.

/// Errors produced by ring construction, registration, and lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    /// Construction asked for zero points per node.
    #[error("replicas must be at least 1 (got {0})")]
    InvalidReplicas(usize),

    /// The node name is already registered on the ring.
    #[error("node already on the ring: {0}")]
    DuplicateNode(String),

    /// Lookup on a ring with no registered nodes.
    #[error("ring has no nodes")]
    EmptyRing,
}

//! Thread-safe shared handle over a [`Ring`].

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::RingError;
use crate::ring::Ring;

/// Cloneable handle sharing one [`Ring`] across threads.
///
/// Writers hold the lock exclusively across the whole insert-and-sort, so
/// readers never observe a partially sorted point sequence. Readers share
/// the lock and proceed in parallel. Every operation is synchronous and
/// in-memory; there is nothing to await and nothing to cancel.
#[derive(Debug, Clone)]
pub struct SharedRing {
    inner: Arc<RwLock<Ring>>,
}

impl SharedRing {
    /// Create a shared handle over an empty ring.
    pub fn new(replicas: usize) -> Result<Self, RingError> {
        Ok(Self {
            inner: Arc::new(RwLock::new(Ring::new(replicas)?)),
        })
    }

    /// Register a node. Takes the write lock.
    pub fn add_node(&self, node: &str) -> Result<(), RingError> {
        self.inner.write().add_node(node)
    }

    /// Resolve a key to a node. Takes the read lock.
    pub fn get_node(&self, key: &str) -> Result<String, RingError> {
        self.inner.read().get_node(key).map(str::to_string)
    }

    /// Return the number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.inner.read().node_count()
    }

    /// Return the total number of points on the ring.
    pub fn point_count(&self) -> usize {
        self.inner.read().point_count()
    }

    /// Return true when no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Return true when the given node name is registered.
    pub fn contains_node(&self, node: &str) -> bool {
        self.inner.read().contains_node(node)
    }

    /// Return all registered node names, in no particular order.
    pub fn node_names(&self) -> Vec<String> {
        self.inner
            .read()
            .node_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Return a clone of the current ring.
    ///
    /// Read-heavy callers can resolve against the clone without touching
    /// the lock again; the clone is a stable view and does not see later
    /// registrations.
    pub fn snapshot(&self) -> Ring {
        self.inner.read().clone()
    }
}

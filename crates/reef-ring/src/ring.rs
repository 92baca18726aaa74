//! The consistent-hash ring: point placement and key lookup.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::RingError;
use crate::hash;

/// Consistent-hash ring mapping request keys to named nodes.
///
/// Each node is placed at `replicas` points on a circular 2^32 keyspace,
/// one per digest of `"{node}#{index}"`. A key resolves to the node owning
/// the first point at or after the key's own digest, wrapping past the top
/// of the keyspace to the first point.
///
/// Two distinct `(node, index)` pairs can in principle digest to the same
/// point. Both entries stay in the point sequence and the last writer wins
/// the point→node association; with 32-bit digests and realistic node
/// counts this is vanishingly rare, so it is documented rather than
/// engineered around.
#[derive(Debug, Clone)]
pub struct Ring {
    /// Points placed per node.
    replicas: usize,
    /// Ring positions, sorted ascending. Duplicates retained on collision.
    points: Vec<u32>,
    /// Ring position → owning node.
    point_to_node: HashMap<u32, String>,
    /// Registered node names.
    nodes: HashSet<String>,
}

impl Ring {
    /// Create an empty ring that will place `replicas` points per node.
    pub fn new(replicas: usize) -> Result<Self, RingError> {
        if replicas == 0 {
            return Err(RingError::InvalidReplicas(replicas));
        }
        Ok(Self {
            replicas,
            points: Vec::new(),
            point_to_node: HashMap::new(),
            nodes: HashSet::new(),
        })
    }

    /// Register a node, placing `replicas` points for it on the ring.
    ///
    /// Re-adding a registered name is rejected: silently accepting it
    /// would double the node's points without changing any lookup result.
    pub fn add_node(&mut self, node: &str) -> Result<(), RingError> {
        if self.nodes.contains(node) {
            return Err(RingError::DuplicateNode(node.to_string()));
        }

        for i in 0..self.replicas {
            let point = hash::digest(format!("{node}#{i}").as_bytes());
            self.points.push(point);
            self.point_to_node.insert(point, node.to_string());
        }
        self.nodes.insert(node.to_string());

        // Lookup binary-searches the sequence, so it must stay sorted.
        self.points.sort_unstable();

        debug!(node, points = self.points.len(), "added node to ring");
        Ok(())
    }

    /// Resolve a key to the node owning its segment of the ring.
    pub fn get_node(&self, key: &str) -> Result<&str, RingError> {
        if self.points.is_empty() {
            return Err(RingError::EmptyRing);
        }

        let digest = hash::digest(key.as_bytes());

        // First point >= the key's digest; past the highest point the ring
        // wraps around to the first.
        let idx = self.points.partition_point(|&p| p < digest);
        let point = if idx == self.points.len() {
            self.points[0]
        } else {
            self.points[idx]
        };

        let node = self
            .point_to_node
            .get(&point)
            .expect("every point has an owner");
        Ok(node.as_str())
    }

    /// Return the number of points placed per node.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Return the number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Return the total number of points on the ring.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Return true when no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return true when the given node name is registered.
    pub fn contains_node(&self, node: &str) -> bool {
        self.nodes.contains(node)
    }

    /// Return all registered node names, in no particular order.
    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.iter().map(String::as_str).collect()
    }
}

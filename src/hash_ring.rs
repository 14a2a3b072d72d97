use log::{debug, trace, warn};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::error::{check_replicas, Result};
use crate::hasher::{HashFunction, Md5Hash};
use crate::node::{Node, VirtualNode};

/// Virtual nodes per physical node when no count is given.
pub const DEFAULT_REPLICAS: usize = 160;

/// Consistent hash ring of virtual nodes keyed by ordinal.
///
/// Keys route to the first virtual node at or after their ordinal, wrapping
/// to the lowest ordinal past the end. The ring does no locking of its own:
/// mutate it from one place, or share an immutable snapshot behind an `Arc`.
#[derive(Debug)]
pub struct HashRing<N: Node, H = Md5Hash> {
    hasher: H,
    ring: BTreeMap<u64, VirtualNode<N>>,
    default_replicas: usize,
}

impl<N: Node> Default for HashRing<N> {
    fn default() -> Self {
        HashRing::with_hasher(Md5Hash::new())
    }
}

impl<N: Node> HashRing<N> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: Node, H: HashFunction> HashRing<N, H> {
    pub fn with_hasher(hasher: H) -> Self {
        HashRing {
            hasher,
            ring: BTreeMap::new(),
            default_replicas: DEFAULT_REPLICAS,
        }
    }

    /// Builds a ring holding `replicas` virtual nodes for each of `nodes`.
    pub fn with_nodes<I>(nodes: I, replicas: i64, hasher: H) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<N>>,
    {
        let replicas = check_replicas(replicas)?;
        let mut ring = HashRing::with_hasher(hasher);
        for node in nodes {
            ring.insert_replicas(node, replicas);
        }
        Ok(ring)
    }

    /// Places `replicas` more virtual nodes for `node` on the ring.
    ///
    /// Replica indices continue from the number of virtual nodes the node
    /// already has on the ring. Adding to a present node therefore extends
    /// its placements; a fully removed node starts again from index 0.
    pub fn add_node(&mut self, node: Arc<N>, replicas: i64) -> Result<()> {
        let replicas = check_replicas(replicas)?;
        self.insert_replicas(node, replicas);
        Ok(())
    }

    /// [`add_node`](Self::add_node) with the ring's default replica count.
    pub fn add_node_default(&mut self, node: Arc<N>) {
        self.insert_replicas(node, self.default_replicas);
    }

    pub(crate) fn insert_replicas(&mut self, node: Arc<N>, replicas: usize) {
        let existing = self.count_replicas_of(&node);
        for i in 0..replicas {
            let vnode = VirtualNode::new(Arc::clone(&node), existing + i);
            let ordinal = self.hasher.hash(&vnode.ring_key());
            if let Some(prev) = self.ring.insert(ordinal, vnode) {
                warn!(
                    "ordinal collision at {}: {} overwritten by {}-{}",
                    ordinal,
                    prev.ring_key(),
                    node.key(),
                    existing + i
                );
            }
        }
        debug!(
            "Node added: [{}] replicas = {} len = {}",
            node.key(),
            replicas,
            self.ring.len()
        );
    }

    /// Drops every virtual node of `node`. Absent nodes are ignored.
    pub fn remove_node(&mut self, node: &N) {
        let before = self.ring.len();
        self.ring.retain(|_, vnode| !vnode.represents(node));
        debug!(
            "Node removed: [{}] removed = {} len = {}",
            node.key(),
            before - self.ring.len(),
            self.ring.len()
        );
    }

    /// Finds the physical node owning `key`, or `None` on an empty ring.
    pub fn route_node(&self, key: &str) -> Option<&Arc<N>> {
        let target = self.hasher.hash(key);
        let vnode = match self.ring.range(target..).next() {
            Some((_, vnode)) => vnode,
            // past the highest ordinal: wrap to the start of the ring
            None => self.ring.values().next()?,
        };
        trace!("route [{}] ({}) -> {}", key, target, vnode.ring_key());
        Some(vnode.physical())
    }

    pub fn count_replicas_of(&self, node: &N) -> usize {
        self.ring.values().filter(|v| v.represents(node)).count()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.ring.values().any(|v| v.represents(node))
    }

    pub fn set_default_replica_count(&mut self, replicas: i64) -> Result<()> {
        self.default_replicas = check_replicas(replicas)?;
        Ok(())
    }

    pub fn default_replica_count(&self) -> usize {
        self.default_replicas
    }

    /// Number of virtual nodes on the ring.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Distinct physical nodes, in ring order of their first virtual node.
    pub fn physical_nodes(&self) -> Vec<Arc<N>> {
        let mut seen = HashSet::new();
        self.ring
            .values()
            .filter(|v| seen.insert(v.physical().key().to_owned()))
            .map(|v| Arc::clone(v.physical()))
            .collect()
    }
}

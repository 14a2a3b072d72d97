use std::fmt;
use std::sync::Arc;

/// A physical entity that can be placed on a ring.
///
/// `key` must stay stable while the entity is on a ring and must be unique
/// among the entities sharing that ring. Two entities with the same key are
/// treated as the same physical node.
pub trait Node: fmt::Debug {
    fn key(&self) -> &str;
}

/// A named group used as the physical entity of holder-built rings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupNode {
    group_id: String,
}

impl GroupNode {
    pub fn new(group_id: impl Into<String>) -> Self {
        GroupNode {
            group_id: group_id.into(),
        }
    }
}

impl Node for GroupNode {
    fn key(&self) -> &str {
        &self.group_id
    }
}

impl fmt::Display for GroupNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.group_id)
    }
}

/// One placement of a physical node on the ring.
///
/// Many virtual nodes share the same physical node through an `Arc`; none of
/// them owns it exclusively.
#[derive(Debug)]
pub struct VirtualNode<N: Node> {
    physical: Arc<N>,
    replica_index: usize,
}

impl<N: Node> Clone for VirtualNode<N> {
    fn clone(&self) -> Self {
        VirtualNode {
            physical: Arc::clone(&self.physical),
            replica_index: self.replica_index,
        }
    }
}

impl<N: Node> VirtualNode<N> {
    pub fn new(physical: Arc<N>, replica_index: usize) -> Self {
        VirtualNode {
            physical,
            replica_index,
        }
    }

    /// `<physical key>-<replica index>`, the string hashed onto the ring.
    pub fn ring_key(&self) -> String {
        format!("{}-{}", self.physical.key(), self.replica_index)
    }

    /// Compares by key, not by pointer.
    pub fn represents(&self, physical: &N) -> bool {
        self.physical.key() == physical.key()
    }

    pub fn physical(&self) -> &Arc<N> {
        &self.physical
    }

    pub fn replica_index(&self) -> usize {
        self.replica_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_key_joins_physical_key_and_index() {
        let vnode = VirtualNode::new(Arc::new(GroupNode::new("group1")), 7);
        assert_eq!(vnode.ring_key(), "group1-7");
        assert_eq!(vnode.replica_index(), 7);
    }

    #[test]
    fn represents_compares_keys_not_pointers() {
        let vnode = VirtualNode::new(Arc::new(GroupNode::new("group1")), 0);
        let same_key = GroupNode::new("group1");
        let other = GroupNode::new("group2");

        assert!(vnode.represents(&same_key));
        assert!(!vnode.represents(&other));
    }

    #[test]
    fn clones_share_the_physical_node() {
        let physical = Arc::new(GroupNode::new("group1"));
        let a = VirtualNode::new(Arc::clone(&physical), 0);
        let b = a.clone();
        assert!(Arc::ptr_eq(a.physical(), b.physical()));
        assert_eq!(Arc::strong_count(&physical), 3);
    }

    #[test]
    fn group_node_displays_its_id() {
        assert_eq!(GroupNode::new("g5").to_string(), "g5");
    }
}

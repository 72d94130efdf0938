//! AVL tree node layout.
//!
//! Nodes are stored in the tree's arena and refer to their children by
//! `NodeId`. Every node id is referenced by exactly one parent link or by the
//! tree's root slot.

/// Index of a node in the tree's arena.
pub type NodeId = usize;

/// Height of an absent subtree. A single node has height 0.
pub const EMPTY_HEIGHT: i32 = -1;

/// A node holding one record, its child links, and the cached subtree height.
#[derive(Debug, Clone)]
pub(crate) struct AvlNode<T> {
    pub(crate) record: T,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) height: i32,
}

impl<T> AvlNode<T> {
    /// Creates a leaf node.
    pub(crate) fn new(record: T) -> Self {
        Self {
            record,
            left: None,
            right: None,
            height: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_leaf() {
        let node = AvlNode::new(42);
        assert_eq!(node.record, 42);
        assert_eq!(node.height, 0);
        assert_eq!(node.left, None);
        assert_eq!(node.right, None);
    }
}

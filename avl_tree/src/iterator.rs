//! In-order iteration over an AVL tree.

use super::node::{AvlNode, NodeId};

/// An iterator over the records of an `AvlTree` in ascending comparator order.
///
/// Keeps the path of pending ancestors on an explicit stack, so the memory
/// used is proportional to the tree height.
pub struct Iter<'a, T> {
    nodes: &'a [AvlNode<T>],
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a [AvlNode<T>], root: Option<NodeId>) -> Self {
        let mut iter = Self {
            nodes,
            stack: Vec::new(),
            remaining: nodes.len(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<NodeId>) {
        while let Some(id) = node {
            self.stack.push(id);
            node = self.nodes[id].left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let nodes = self.nodes;
        let node = &nodes[id];
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some(&node.record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

//! Height-balanced binary search tree (AVL) over caller-ordered records.
//!
//! This module implements the ordered index used by the flight database:
//! - Records are ordered by a three-way comparator fixed at construction
//! - Records comparing `Equal` to a stored record are rejected on insert
//! - Range queries prune subtrees outside the bounds, costing O(log n + m)
//! - Successor queries descend once from the root, costing O(log n)
//!
//! Nodes live in an arena owned by the tree and are addressed by `NodeId`.

use std::cmp::Ordering;
use std::fmt;

use super::iterator::Iter;
use super::node::{AvlNode, NodeId, EMPTY_HEIGHT};

/// Outcome of inserting below a subtree.
enum Insertion {
    /// The record was placed; `subtree` is the (possibly rotated) new root of
    /// the subtree and `inserted` the node holding the new record.
    Inserted { subtree: NodeId, inserted: NodeId },
    /// A stored record compared `Equal` to the new one.
    Duplicate,
}

/// An AVL tree ordered by the comparator `C`.
///
/// Dropping the tree releases every node and drops every stored record. When
/// several trees index the same records, store shared handles such as
/// `Arc<R>` so each record is released once, by the last tree holding it.
pub struct AvlTree<T, C> {
    nodes: Vec<AvlNode<T>>,
    root: Option<NodeId>,
    compare: C,
}

impl<T, C> AvlTree<T, C> {
    /// Returns the number of records in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree: -1 when empty, 0 for a single record.
    pub fn height(&self) -> i32 {
        self.node_height(self.root)
    }

    /// Returns the smallest record, if any.
    pub fn first(&self) -> Option<&T> {
        let mut current = self.root?;
        while let Some(left) = self.nodes[current].left {
            current = left;
        }
        Some(&self.nodes[current].record)
    }

    /// Returns an iterator over all records in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.root)
    }

    /// Releases every node and drops every stored record.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[cfg(test)]
    pub(crate) fn node(&self, id: NodeId) -> &AvlNode<T> {
        &self.nodes[id]
    }

    fn node_height(&self, node: Option<NodeId>) -> i32 {
        node.map_or(EMPTY_HEIGHT, |id| self.nodes[id].height)
    }

    fn max_child_height(&self, id: NodeId) -> i32 {
        let node = &self.nodes[id];
        self.node_height(node.left).max(self.node_height(node.right))
    }

    fn update_height(&mut self, id: NodeId) {
        self.nodes[id].height = self.max_child_height(id) + 1;
    }

    /// Rotates the subtree rooted at `id` to the right and returns its new root.
    ///
    /// Callers only rotate a subtree whose left child exists.
    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        debug_assert!(self.nodes[id].left.is_some(), "rotate_right without a left child");
        let Some(pivot) = self.nodes[id].left else {
            return id;
        };
        self.nodes[id].left = self.nodes[pivot].right;
        self.nodes[pivot].right = Some(id);

        self.update_height(id);
        self.update_height(pivot);
        pivot
    }

    /// Rotates the subtree rooted at `id` to the left and returns its new root.
    ///
    /// Callers only rotate a subtree whose right child exists.
    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        debug_assert!(self.nodes[id].right.is_some(), "rotate_left without a right child");
        let Some(pivot) = self.nodes[id].right else {
            return id;
        };
        self.nodes[id].right = self.nodes[pivot].left;
        self.nodes[pivot].left = Some(id);

        self.update_height(id);
        self.update_height(pivot);
        pivot
    }
}

impl<T, C> AvlTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty tree ordered by `compare`.
    pub fn new(compare: C) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            compare,
        }
    }

    // ===== INSERT =====

    /// Inserts a record.
    ///
    /// Returns `true` if the record was added, or `false` if a stored record
    /// compares `Equal` to it. A rejected record is dropped and the tree is
    /// left unchanged.
    pub fn insert(&mut self, record: T) -> bool {
        match self.insert_below(self.root, record) {
            Insertion::Inserted { subtree, .. } => {
                self.root = Some(subtree);
                true
            }
            Insertion::Duplicate => false,
        }
    }

    fn insert_below(&mut self, node: Option<NodeId>, record: T) -> Insertion {
        let Some(id) = node else {
            let inserted = self.allocate(record);
            return Insertion::Inserted {
                subtree: inserted,
                inserted,
            };
        };

        let inserted = match (self.compare)(&record, &self.nodes[id].record) {
            Ordering::Less => match self.insert_below(self.nodes[id].left, record) {
                Insertion::Inserted { subtree, inserted } => {
                    self.nodes[id].left = Some(subtree);
                    inserted
                }
                Insertion::Duplicate => return Insertion::Duplicate,
            },
            Ordering::Greater => match self.insert_below(self.nodes[id].right, record) {
                Insertion::Inserted { subtree, inserted } => {
                    self.nodes[id].right = Some(subtree);
                    inserted
                }
                Insertion::Duplicate => return Insertion::Duplicate,
            },
            Ordering::Equal => return Insertion::Duplicate,
        };

        Insertion::Inserted {
            subtree: self.rebalance(id, inserted),
            inserted,
        }
    }

    fn allocate(&mut self, record: T) -> NodeId {
        self.nodes.push(AvlNode::new(record));
        self.nodes.len() - 1
    }

    /// Restores the height and balance of `id` after `inserted` was placed
    /// below it. Returns the new root of the subtree.
    fn rebalance(&mut self, id: NodeId, inserted: NodeId) -> NodeId {
        self.update_height(id);

        let left = self.nodes[id].left;
        let right = self.nodes[id].right;
        let balance = self.node_height(left) - self.node_height(right);

        if balance > 1 {
            if let Some(left) = left {
                // Left-right case: straighten the zig-zag first.
                if self.compare_nodes(inserted, left) == Ordering::Greater {
                    let pivot = self.rotate_left(left);
                    self.nodes[id].left = Some(pivot);
                }
            }
            return self.rotate_right(id);
        }

        if balance < -1 {
            if let Some(right) = right {
                // Right-left case.
                if self.compare_nodes(inserted, right) == Ordering::Less {
                    let pivot = self.rotate_right(right);
                    self.nodes[id].right = Some(pivot);
                }
            }
            return self.rotate_left(id);
        }

        id
    }

    fn compare_nodes(&self, a: NodeId, b: NodeId) -> Ordering {
        (self.compare)(&self.nodes[a].record, &self.nodes[b].record)
    }

    // ===== SEARCH =====

    /// Returns the stored record comparing `Equal` to `query`.
    pub fn search(&self, query: &T) -> Option<&T> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match (self.compare)(query, &node.record) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(&node.record),
            };
        }
        None
    }

    /// Returns every stored record `r` with `lower <= r <= upper`, ascending.
    ///
    /// Only subtrees that can hold records inside the bounds are visited. An
    /// empty vector is returned when nothing matches, including `lower > upper`.
    pub fn search_between(&self, lower: &T, upper: &T) -> Vec<&T> {
        let mut matches = Vec::new();
        self.collect_between(self.root, lower, upper, &mut matches);
        matches
    }

    fn collect_between<'a>(
        &'a self,
        node: Option<NodeId>,
        lower: &T,
        upper: &T,
        matches: &mut Vec<&'a T>,
    ) {
        let Some(id) = node else {
            return;
        };
        let node = &self.nodes[id];
        let from_lower = (self.compare)(lower, &node.record);
        let from_upper = (self.compare)(upper, &node.record);

        if from_lower == Ordering::Less {
            self.collect_between(node.left, lower, upper, matches);
        }
        if from_lower != Ordering::Greater && from_upper != Ordering::Less {
            matches.push(&node.record);
        }
        if from_upper == Ordering::Greater {
            self.collect_between(node.right, lower, upper, matches);
        }
    }

    /// Returns the smallest stored record that is `>= query`, or `None` if
    /// every stored record is smaller.
    pub fn next(&self, query: &T) -> Option<&T> {
        let mut candidate = None;
        let mut current = self.root;

        while let Some(id) = current {
            let node = &self.nodes[id];
            match (self.compare)(query, &node.record) {
                Ordering::Less => {
                    // Best so far; anything smaller is in the left subtree.
                    candidate = Some(&node.record);
                    current = node.left;
                }
                Ordering::Greater => current = node.right,
                Ordering::Equal => return Some(&node.record),
            }
        }
        candidate
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for AvlTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

//! Ordered index for the flight database.
//!
//! This crate provides a height-balanced binary search tree (AVL) with:
//! - A caller-supplied three-way comparator fixed at construction
//! - Duplicate rejection on insert
//! - Pruned range queries and successor queries
//! - In-order iteration

mod node;
pub mod tree;
pub mod iterator;

// Re-export main types
pub use node::EMPTY_HEIGHT;
pub use tree::AvlTree;
pub use iterator::Iter;

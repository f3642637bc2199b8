//! This crate keeps a roster of named, scored records in a self-balancing
//! Binary Search Tree (an AVL tree) keyed by a unique integer.
//!
//! ## AVL tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. Every node holds a key and a
//! record, and the tree keeps two invariants:
//!
//! 1. For every node, all the keys in its left subtree are smaller than its
//!    own key and all the keys in its right subtree are larger.
//! 2. For every node, the heights of its two subtrees differ by at most one.
//!
//! The second invariant is what makes this an AVL tree. Each node caches the
//! height of its subtree, and after every insert and delete the nodes on the
//! path back to the root recompute their heights and, where a subtree became
//! two levels taller than its sibling, rotate to restore the balance. This
//! bounds the height at roughly `1.44 * lg N` for `N` nodes, so searching,
//! inserting and deleting all take `O(lg N)`.
//!
//! ## Layout
//!
//! - [`AvlTree`] is the tree itself: insert, delete, search (with the
//!   visited path) and in-order traversal.
//! - [`document`] turns a tree into its persisted JSON shape and back,
//!   always rebuilding by re-insertion.
//! - [`Roster`] wraps a tree for an application session: it hands out
//!   sequential keys, validates names and scores and reports missing keys as
//!   errors.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod config;
pub mod document;
mod error;
mod iter;
mod record;
mod roster;
mod tree;

#[cfg(test)]
pub(crate) mod test;

pub use config::RosterConfig;
pub use document::NodeDocument;
pub use error::{Error, Result};
pub use iter::{Iter, NodeInfo, Nodes};
pub use record::{Entry, Key, Record, Score};
pub use roster::Roster;
pub use tree::{AvlTree, Search};

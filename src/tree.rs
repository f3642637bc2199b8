//! An AVL tree keyed by [`Key`] storing one [`Record`] per key.
//!
//! Children are owned boxes, so every mutation is a plain move of subtrees: a recursive call
//! takes a subtree by value and hands back its (possibly new) root.
//!
//! # Examples
//!
//! ```
//! use roster::{AvlTree, Record, Score};
//!
//! let mut tree = AvlTree::new();
//! let score = Score::new(8.5).unwrap();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.get(1), None);
//!
//! assert!(tree.insert(1, Record::new("Minh", score)));
//! assert_eq!(tree.get(1).map(|r| r.name.as_str()), Some("Minh"));
//!
//! // Inserting an existing key keeps the existing record.
//! assert!(!tree.insert(1, Record::new("Lan", score)));
//! assert_eq!(tree.get(1).map(|r| r.name.as_str()), Some("Minh"));
//!
//! // Deleting a node returns its record.
//! let deleted = tree.delete(1);
//! assert_eq!(deleted.map(|r| r.name), Some("Minh".to_string()));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::record::{Key, Record};

pub(crate) type Link = Option<Box<Node>>;

/// A self-balancing Binary Search Tree (specifically, an AVL tree). Every insert and delete
/// recomputes heights and rebalances on the way back up, so the tree is never observably
/// unbalanced between calls.
#[derive(Clone, Default)]
pub struct AvlTree {
    pub(crate) root: Link,
    pub(crate) len: usize,
}

/// The outcome of a search: the located record (if any) and the keys visited on the way, in
/// order from the root.
#[derive(Debug, PartialEq)]
pub struct Search<R> {
    /// The record stored under the searched key.
    pub record: Option<R>,
    /// Every key compared against during the descent, root first.
    pub path: Vec<Key>,
}

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) key: Key,
    pub(crate) record: Record,
    pub(crate) left: Link,
    pub(crate) right: Link,
    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(crate) height: usize,
}

impl fmt::Debug for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("len", &self.len)
            .field("root", &self.root)
            .finish()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("height", &self.height)
            .field("record", &self.record)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl AvlTree {
    /// Generates a new, empty `AvlTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of records in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no records.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree: 0 when empty, 1 for a single node.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// The key currently at the root, if any.
    pub fn root_key(&self) -> Option<Key> {
        self.root.as_ref().map(|n| n.key)
    }

    /// The smallest key in the tree.
    pub fn min_key(&self) -> Option<Key> {
        self.root.as_deref().map(leftmost_key)
    }

    /// The largest key in the tree.
    pub fn max_key(&self) -> Option<Key> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(node.key)
    }

    /// Drops every node, leaving an empty tree.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Inserts `record` under `key`. Returns `false`, leaving the tree unchanged, when `key` is
    /// already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster::{AvlTree, Record, Score};
    ///
    /// let mut tree = AvlTree::new();
    /// for key in [10, 20, 30] {
    ///     tree.insert(key, Record::new(key.to_string(), Score::new(5.0).unwrap()));
    /// }
    ///
    /// // The ascending run was rotated into a balanced shape.
    /// assert_eq!(tree.root_key(), Some(20));
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn insert(&mut self, key: Key, record: Record) -> bool {
        let mut inserted = false;
        self.root = Some(insert(self.root.take(), key, record, &mut inserted));
        if inserted {
            self.len += 1;
            debug!(key, len = self.len, "inserted record");
        } else {
            debug!(key, "duplicate key, insert ignored");
        }
        inserted
    }

    /// Deletes the node containing `key` and returns its record. If the tree does not contain
    /// the key, nothing happens.
    pub fn delete(&mut self, key: Key) -> Option<Record> {
        let mut removed = None;
        self.root = delete(self.root.take(), key, &mut removed);
        if removed.is_some() {
            self.len -= 1;
            debug!(key, len = self.len, "deleted record");
        }
        removed
    }

    /// Descends from the root towards `key`, recording every visited key.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster::{AvlTree, Record, Score};
    ///
    /// let mut tree = AvlTree::new();
    /// for key in 1..=7 {
    ///     tree.insert(key, Record::new(key.to_string(), Score::new(1.0).unwrap()));
    /// }
    ///
    /// let found = tree.search(5);
    /// assert_eq!(found.path, vec![4, 6, 5]);
    /// assert!(found.record.is_some());
    ///
    /// let missing = tree.search(8);
    /// assert_eq!(missing.path, vec![4, 6, 7]);
    /// assert!(missing.record.is_none());
    /// ```
    pub fn search(&self, key: Key) -> Search<&Record> {
        let mut path = Vec::new();
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            path.push(node.key);
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => {
                    return Search {
                        record: Some(&node.record),
                        path,
                    }
                }
                Ordering::Greater => node.right.as_deref(),
            };
        }
        Search { record: None, path }
    }

    /// Like [`search`][Self::search] but hands out the record for in-place updates.
    pub fn search_mut(&mut self, key: Key) -> Search<&mut Record> {
        let mut path = Vec::new();
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            path.push(node.key);
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Equal => {
                    return Search {
                        record: Some(&mut node.record),
                        path,
                    }
                }
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }
        Search { record: None, path }
    }

    /// Potentially finds the record stored under `key`. Unlike [`search`][Self::search] this
    /// doesn't collect the path.
    pub fn get(&self, key: Key) -> Option<&Record> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some(&node.record),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Potentially finds the record stored under `key` for modification.
    pub fn get_mut(&mut self, key: Key) -> Option<&mut Record> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.record),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }
        None
    }

    /// Whether a record is stored under `key`.
    pub fn contains_key(&self, key: Key) -> bool {
        self.get(key).is_some()
    }
}

impl Node {
    fn new_boxed(key: Key, record: Record) -> Box<Self> {
        Box::new(Self {
            key,
            record,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// Left subtree height minus right subtree height.
    pub(crate) fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

fn balance_factor(link: &Link) -> isize {
    link.as_deref().map_or(0, Node::balance_factor)
}

/// Rotate `z` to the right. This moves the left child up vertically and `z` down vertically.
/// Must only be called when there _is_ a left child.
///
/// ```text
///       z                 y
///      / \               / \
///     y   d   rotate -> a   z
///    / \                   / \
///   a   b                 b   d
/// ```
fn rotate_right(mut z: Box<Node>) -> Box<Node> {
    let mut y = z.left.take().expect("Rotate right => left child");
    z.left = y.right.take();
    z.fix_height();
    y.right = Some(z);
    y.fix_height();
    y
}

/// The mirror of [`rotate_right`]. Must only be called when there is a right child.
fn rotate_left(mut z: Box<Node>) -> Box<Node> {
    let mut y = z.right.take().expect("Rotate left => right child");
    z.right = y.left.take();
    z.fix_height();
    y.left = Some(z);
    y.fix_height();
    y
}

fn insert(link: Link, key: Key, record: Record, inserted: &mut bool) -> Box<Node> {
    let Some(mut node) = link else {
        *inserted = true;
        return Node::new_boxed(key, record);
    };

    match key.cmp(&node.key) {
        Ordering::Less => node.left = Some(insert(node.left.take(), key, record, inserted)),
        Ordering::Equal => return node,
        Ordering::Greater => node.right = Some(insert(node.right.take(), key, record, inserted)),
    }

    node.fix_height();
    rebalance_after_insert(node, key)
}

/// A single insert unbalances at most one node on its path, and the side the new key went down
/// tells which case applies. So the inserted key is compared against the heavy child's key
/// instead of looking at that child's balance factor.
fn rebalance_after_insert(mut node: Box<Node>, key: Key) -> Box<Node> {
    let balance = node.balance_factor();
    let left_key = node.left.as_ref().map(|n| n.key);
    let right_key = node.right.as_ref().map(|n| n.key);

    let node = if balance > 1 && left_key.is_some_and(|k| key < k) {
        trace!(pivot = node.key, "left-left");
        rotate_right(node)
    } else if balance < -1 && right_key.is_some_and(|k| key > k) {
        trace!(pivot = node.key, "right-right");
        rotate_left(node)
    } else if balance > 1 && left_key.is_some_and(|k| key > k) {
        trace!(pivot = node.key, "left-right");
        node.left = node.left.take().map(rotate_left);
        rotate_right(node)
    } else if balance < -1 && right_key.is_some_and(|k| key < k) {
        trace!(pivot = node.key, "right-left");
        node.right = node.right.take().map(rotate_right);
        rotate_left(node)
    } else {
        node
    };

    debug_assert_balanced(&node);
    node
}

fn delete(link: Link, key: Key, removed: &mut Option<Record>) -> Link {
    let mut node = link?;

    match key.cmp(&node.key) {
        Ordering::Less => node.left = delete(node.left.take(), key, removed),
        Ordering::Greater => node.right = delete(node.right.take(), key, removed),
        Ordering::Equal => match (node.left.is_some(), node.right.is_some()) {
            (false, _) => {
                let Node { record, right, .. } = *node;
                *removed = Some(record);
                return right;
            }
            (true, false) => {
                let Node { record, left, .. } = *node;
                *removed = Some(record);
                return left;
            }
            // Two children: the in-order successor takes this node's place. Its record is
            // pulled out of the right subtree and swapped in here.
            (true, true) => {
                let successor = node.right.as_deref().map_or(key, leftmost_key);
                let mut successor_record = None;
                node.right = delete(node.right.take(), successor, &mut successor_record);
                let successor_record =
                    successor_record.expect("Successor comes from the right subtree");

                node.key = successor;
                *removed = Some(std::mem::replace(&mut node.record, successor_record));
            }
        },
    }

    // Missing key: nothing below changed.
    if removed.is_none() {
        return Some(node);
    }

    node.fix_height();
    Some(rebalance_after_delete(node))
}

/// Several ancestors may be out of balance after a delete, so the rotation is chosen purely by
/// which side is heavy and how that side's child leans.
fn rebalance_after_delete(mut node: Box<Node>) -> Box<Node> {
    let balance = node.balance_factor();

    let node = if balance > 1 {
        if balance_factor(&node.left) >= 0 {
            trace!(pivot = node.key, "left-left");
            rotate_right(node)
        } else {
            trace!(pivot = node.key, "left-right");
            node.left = node.left.take().map(rotate_left);
            rotate_right(node)
        }
    } else if balance < -1 {
        if balance_factor(&node.right) <= 0 {
            trace!(pivot = node.key, "right-right");
            rotate_left(node)
        } else {
            trace!(pivot = node.key, "right-left");
            node.right = node.right.take().map(rotate_right);
            rotate_left(node)
        }
    } else {
        node
    };

    debug_assert_balanced(&node);
    node
}

fn leftmost_key(node: &Node) -> Key {
    let mut node = node;
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    node.key
}

fn debug_assert_balanced(node: &Node) {
    if cfg!(debug_assertions) {
        let left_height = height(&node.left);
        let right_height = height(&node.right);
        assert_eq!(node.height, left_height.max(right_height) + 1);
        assert!(left_height.abs_diff(right_height) <= 1);
    }
}

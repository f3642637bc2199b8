//! Traversals over an [`AvlTree`].

use std::iter::FusedIterator;

use crate::record::{Entry, Key, Record};
use crate::tree::{AvlTree, Link, Node};

/// In-order iterator over `(key, record)` pairs, ascending by key. Created by
/// [`AvlTree::iter`]. A clone continues from the same position; call `iter` again to start over.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn new(tree: &'a AvlTree) -> Self {
        let mut iter = Self {
            stack: Vec::with_capacity(tree.height()),
            remaining: tree.len,
        };
        iter.push_left(&tree.root);
        iter
    }

    fn push_left(&mut self, mut link: &'a Link) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Key, &'a Record);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(&node.right);
        self.remaining -= 1;
        Some((node.key, &node.record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = (Key, &'a Record);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Structural facts about one node, as a graph renderer would label it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInfo {
    /// The node's key.
    pub key: Key,
    /// Distance from the root; the root has depth 0.
    pub depth: usize,
    /// Height of the subtree rooted here; a leaf has height 1.
    pub height: usize,
    /// Left subtree height minus right subtree height.
    pub balance_factor: isize,
}

/// Pre-order (node, left, right) iterator over [`NodeInfo`]. Created by [`AvlTree::nodes`].
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    stack: Vec<(&'a Node, usize)>,
}

impl Iterator for Nodes<'_> {
    type Item = NodeInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        // Right goes on first so the left subtree is visited first.
        if let Some(right) = node.right.as_deref() {
            self.stack.push((right, depth + 1));
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push((left, depth + 1));
        }
        Some(NodeInfo {
            key: node.key,
            depth,
            height: node.height,
            balance_factor: node.balance_factor(),
        })
    }
}

impl FusedIterator for Nodes<'_> {}

impl AvlTree {
    /// Lazily visits every record in ascending key order. Each call starts a fresh traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster::{AvlTree, Record, Score};
    ///
    /// let mut tree = AvlTree::new();
    /// for key in [3, 1, 2] {
    ///     tree.insert(key, Record::new(format!("#{key}"), Score::new(4.0).unwrap()));
    /// }
    ///
    /// let keys: Vec<_> = tree.iter().map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec![1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// The in-order traversal as owned `(key, name, score)` rows.
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.iter().map(|(key, record)| Entry::from_parts(key, record))
    }

    /// Visits every node root first, reporting depth, height and balance factor.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: self.root.as_deref().map(|root| (root, 0)).into_iter().collect(),
        }
    }
}

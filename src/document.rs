//! The persisted structural format of a tree.
//!
//! A document mirrors the tree node for node:
//!
//! ```text
//! Node = null | { key: integer, name: string, score: number, left: Node, right: Node }
//! ```
//!
//! The top-level value is a single `Node`, or `null` for an empty tree. Missing `left`/`right`
//! fields read as `null`. The shape of an imported document is never trusted: loading walks it
//! and re-inserts every record into a fresh tree, which derives a valid balanced shape.
//!
//! Decoding goes through `serde_json`, which refuses input nested more than 128 levels deep. A
//! document this crate saves is an AVL shape and stays far below that (128 levels would take
//! more nodes than fit in memory), but a hand-edited chain of more than about 127 nodes is
//! rejected as malformed.
//!
//! # Examples
//!
//! ```
//! use roster::{document, AvlTree, Record, Score};
//!
//! let mut tree = AvlTree::new();
//! for key in [1, 2, 3] {
//!     tree.insert(key, Record::new(format!("#{key}"), Score::new(6.0).unwrap()));
//! }
//!
//! let json = document::to_json(&tree, false).unwrap();
//! let restored = document::from_json(&json).unwrap();
//!
//! assert!(tree.entries().eq(restored.entries()));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::record::{Key, Record, Score};
use crate::tree::{AvlTree, Node};

/// One node of a persisted tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    /// The node's key.
    pub key: Key,
    /// The node's display name.
    pub name: String,
    /// The node's score.
    pub score: Score,
    /// Left subtree; `null` or absent when empty.
    #[serde(default)]
    pub left: Option<Box<NodeDocument>>,
    /// Right subtree; `null` or absent when empty.
    #[serde(default)]
    pub right: Option<Box<NodeDocument>>,
}

impl NodeDocument {
    fn from_node(node: &Node) -> Self {
        Self {
            key: node.key,
            name: node.record.name.clone(),
            score: node.record.score,
            left: node.left.as_deref().map(|n| Box::new(Self::from_node(n))),
            right: node.right.as_deref().map(|n| Box::new(Self::from_node(n))),
        }
    }

    /// Flattens the document into its records, node before left subtree before right subtree.
    pub fn into_records(self) -> IntoRecords {
        IntoRecords {
            stack: vec![Box::new(self)],
        }
    }
}

/// Pre-order stream of `(key, record)` pairs out of a [`NodeDocument`].
#[derive(Debug)]
pub struct IntoRecords {
    stack: Vec<Box<NodeDocument>>,
}

impl Iterator for IntoRecords {
    type Item = (Key, Record);

    fn next(&mut self) -> Option<Self::Item> {
        let doc = *self.stack.pop()?;
        let NodeDocument {
            key,
            name,
            score,
            left,
            right,
        } = doc;
        self.stack.extend(right);
        self.stack.extend(left);
        Some((key, Record::new(name, score)))
    }
}

impl AvlTree {
    /// Mirrors the tree's current shape as a document; `None` for an empty tree.
    pub fn export_structure(&self) -> Option<NodeDocument> {
        self.root.as_deref().map(NodeDocument::from_node)
    }

    /// Builds a fresh tree by inserting every record in turn. When a key repeats, the first
    /// record seen for it is kept.
    pub fn rebuild_from_records(records: impl IntoIterator<Item = (Key, Record)>) -> Self {
        let mut tree = Self::new();
        for (key, record) in records {
            if !tree.insert(key, record) {
                warn!(key, "duplicate key while rebuilding, keeping the first record");
            }
        }
        tree
    }

    /// Rebuilds a tree from an imported document, discarding the document's shape.
    pub fn from_document(document: Option<NodeDocument>) -> Self {
        Self::rebuild_from_records(document.into_iter().flat_map(NodeDocument::into_records))
    }
}

impl FromIterator<(Key, Record)> for AvlTree {
    fn from_iter<I: IntoIterator<Item = (Key, Record)>>(iter: I) -> Self {
        Self::rebuild_from_records(iter)
    }
}

impl Extend<(Key, Record)> for AvlTree {
    fn extend<I: IntoIterator<Item = (Key, Record)>>(&mut self, iter: I) {
        for (key, record) in iter {
            self.insert(key, record);
        }
    }
}

/// Encodes the tree's structure as JSON, indented when `pretty` is set.
pub fn to_json(tree: &AvlTree, pretty: bool) -> Result<String> {
    let document = tree.export_structure();
    let json = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(json)
}

/// Decodes a JSON document and rebuilds a balanced tree from its records.
///
/// Missing fields, wrong types, out-of-range scores and nesting past `serde_json`'s recursion
/// limit (see the [module docs][self]) are reported as
/// [`Error::MalformedPersistedData`][crate::Error::MalformedPersistedData].
pub fn from_json(json: &str) -> Result<AvlTree> {
    let document: Option<NodeDocument> = serde_json::from_str(json)?;
    let tree = AvlTree::from_document(document);
    debug!(len = tree.len(), "rebuilt tree from document");
    Ok(tree)
}

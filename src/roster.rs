//! A session handle around an [`AvlTree`]: allocates keys, validates input and owns load/save.
//!
//! # Examples
//!
//! ```
//! use roster::{Error, Roster};
//!
//! let mut roster = Roster::new();
//! let an = roster.add("Nguyễn An", 8.26).unwrap();
//! let vy = roster.add("Trần Vy", 9.0).unwrap();
//! assert_eq!((an, vy), (1, 2));
//!
//! // Scores are rounded to one decimal.
//! assert_eq!(roster.get(an).unwrap().score.get(), 8.3);
//!
//! roster.update(an, "", 7.5).unwrap();
//! assert_eq!(roster.get(an).unwrap().name, "Nguyễn An");
//!
//! assert!(matches!(roster.remove(42), Err(Error::KeyNotFound(42))));
//! ```

use tracing::{debug, info};

use crate::config::RosterConfig;
use crate::document;
use crate::error::{Error, Result};
use crate::record::{Entry, Key, Record, Score};
use crate::tree::{AvlTree, Search};

/// An [`AvlTree`] plus the sequential key counter feeding it.
#[derive(Debug, Clone)]
pub struct Roster {
    tree: AvlTree,
    config: RosterConfig,
    next_key: Key,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    /// An empty roster with the default config.
    pub fn new() -> Self {
        Self {
            tree: AvlTree::new(),
            next_key: RosterConfig::default().first_key,
            config: RosterConfig::default(),
        }
    }

    /// An empty roster with the given config.
    pub fn with_config(config: RosterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tree: AvlTree::new(),
            next_key: config.first_key,
            config,
        })
    }

    /// The underlying tree.
    pub fn tree(&self) -> &AvlTree {
        &self.tree
    }

    /// The active config.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// The key the next [`add`][Self::add] will use.
    pub fn next_key(&self) -> Key {
        self.next_key
    }

    /// Adds a record under a freshly allocated key and returns that key.
    ///
    /// Fails with [`Error::KeysExhausted`] once the counter can no longer advance, and with
    /// [`Error::DuplicateKey`] if the allocated key is already taken. Nothing is stored on failure.
    pub fn add(&mut self, name: &str, score: f64) -> Result<Key> {
        let record = Record::new(non_blank(name)?, Score::new(score)?);
        let key = self.next_key;
        let next_key = key.checked_add(1).ok_or(Error::KeysExhausted)?;
        if !self.tree.insert(key, record) {
            return Err(Error::DuplicateKey(key));
        }
        self.next_key = next_key;
        info!(key, "added record");
        Ok(key)
    }

    /// Adds a record under a caller-chosen key. Fails with [`Error::DuplicateKey`] instead of
    /// silently keeping the existing record.
    pub fn insert_with_key(&mut self, key: Key, name: &str, score: f64) -> Result<()> {
        if self.tree.contains_key(key) {
            return Err(Error::DuplicateKey(key));
        }
        let record = Record::new(non_blank(name)?, Score::new(score)?);
        self.tree.insert(key, record);
        self.next_key = self.next_key.max(key.saturating_add(1));
        info!(key, "inserted record with explicit key");
        Ok(())
    }

    /// Removes and returns the record under `key`.
    pub fn remove(&mut self, key: Key) -> Result<Record> {
        let removed = self.tree.delete(key).ok_or(Error::KeyNotFound(key))?;
        info!(key, "removed record");
        Ok(removed)
    }

    /// Replaces the record's name and score in place. A blank `name` keeps the current name.
    pub fn update(&mut self, key: Key, name: &str, score: f64) -> Result<()> {
        let score = Score::new(score)?;
        let record = self.tree.get_mut(key).ok_or(Error::KeyNotFound(key))?;
        if let Ok(name) = non_blank(name) {
            record.name = name.to_string();
        }
        record.score = score;
        info!(key, "updated record");
        Ok(())
    }

    /// Looks `key` up, reporting the visited path.
    pub fn search(&self, key: Key) -> Search<&Record> {
        self.tree.search(key)
    }

    /// The record under `key`, if any.
    pub fn get(&self, key: Key) -> Option<&Record> {
        self.tree.get(key)
    }

    /// All records as rows, ascending by key.
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.tree.entries()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Drops every record and restarts key allocation.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.next_key = self.config.first_key;
        info!("cleared roster");
    }

    /// Encodes the tree's structure as JSON.
    pub fn save_json(&self) -> Result<String> {
        document::to_json(&self.tree, self.config.pretty_json)
    }

    /// Replaces the contents with a decoded document. On a decode failure the roster is left
    /// untouched.
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let tree = document::from_json(json)?;
        self.next_key = match tree.max_key() {
            Some(max_key) => self.config.first_key.max(max_key.saturating_add(1)),
            None => self.config.first_key,
        };
        self.tree = tree;
        debug!(len = self.tree.len(), next_key = self.next_key, "loaded roster");
        Ok(())
    }
}

fn non_blank(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    Ok(name)
}

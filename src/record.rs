//! The values stored in a roster: keys, scores and the per-key payload.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The unique ordering identifier of a record.
pub type Key = u64;

/// A score in `[0.0, 10.0]`, rounded to one decimal place.
///
/// # Examples
///
/// ```
/// use roster::Score;
///
/// assert_eq!(Score::new(7.25).unwrap().get(), 7.3);
/// assert!(Score::new(10.5).is_err());
/// assert!(Score::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    /// Lowest accepted score.
    pub const MIN: f64 = 0.0;
    /// Highest accepted score.
    pub const MAX: f64 = 10.0;

    /// Validates `value` and rounds it to one decimal place.
    pub fn new(value: f64) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(Error::ScoreOutOfRange(value));
        }
        Ok(Self((value * 10.0).round() / 10.0))
    }

    /// The rounded score.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Score {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// The mutable payload kept at every node.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Display name.
    pub name: String,
    /// Numeric score.
    pub score: Score,
}

impl Record {
    /// Creates a record. The name is stored as given.
    pub fn new(name: impl Into<String>, score: Score) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// An owned `(key, name, score)` row, as produced by an in-order export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The record's key.
    pub key: Key,
    /// The record's name.
    pub name: String,
    /// The record's score.
    pub score: Score,
}

impl Entry {
    pub(crate) fn from_parts(key: Key, record: &Record) -> Self {
        Self {
            key,
            name: record.name.clone(),
            score: record.score,
        }
    }

    /// Splits the row back into a key and its payload.
    pub fn into_parts(self) -> (Key, Record) {
        (self.key, Record::new(self.name, self.score))
    }
}

//! Roster configuration, written as TOML by the embedding application.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::Key;

/// Roster configuration (TOML).
///
/// Missing fields take their defaults, so an empty document is a valid config.
///
/// # Examples
///
/// ```
/// use roster::RosterConfig;
///
/// let config = RosterConfig::from_toml_str("first_key = 1000").unwrap();
/// assert_eq!(config.first_key, 1000);
/// assert!(config.pretty_json);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RosterConfig {
    /// Key handed to the first record of an empty roster, and again after a clear.
    pub first_key: Key,

    /// Indent saved documents.
    pub pretty_json: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            first_key: 1,
            pretty_json: true,
        }
    }
}

impl RosterConfig {
    /// Rejects values the roster can't work with.
    pub fn validate(&self) -> Result<()> {
        if self.first_key == 0 {
            return Err(Error::InvalidConfig("first_key must be > 0".to_string()));
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }
}

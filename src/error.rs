use thiserror::Error;

use crate::record::Key;

/// Errors surfaced by the roster.
///
/// The tree itself never fails: a duplicate insert or a delete of an absent key is a no-op. These
/// variants are raised by the validating layers around it.
#[derive(Debug, Error)]
pub enum Error {
    /// An explicit-key insert found the key already present.
    #[error("key {0} already exists")]
    DuplicateKey(Key),

    /// The key counter reached `u64::MAX`, so there is no fresh key to hand out.
    #[error("no keys left to allocate")]
    KeysExhausted,

    /// A remove or update named a key that isn't in the tree.
    #[error("key {0} not found")]
    KeyNotFound(Key),

    /// A score was NaN or outside `[0.0, 10.0]`.
    #[error("score {0} is outside [0.0, 10.0]")]
    ScoreOutOfRange(f64),

    /// A record was added with a blank name.
    #[error("name must not be empty")]
    EmptyName,

    /// A persisted document could not be decoded.
    #[error("malformed persisted data: {0}")]
    MalformedPersistedData(#[from] serde_json::Error),

    /// A configuration value was rejected by validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A configuration document could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Shorthand for results with this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use thiserror::Error;

pub const DEFAULT_FORUM_NAME: &str = "Public";

/// The kind segment of a partition key, mirroring a (kind, name) document key.
pub const PARTITION_KEY_KIND: &str = "Forum";

/// A normalized forum name.
///
/// Construction folds the two spellings of the default forum into one:
/// an empty name becomes [`DEFAULT_FORUM_NAME`], and any name matching it
/// case-insensitively is replaced by the canonical spelling. Everything
/// else is kept verbatim, so distinct names stay distinct.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize)]
#[serde(transparent)]
pub struct ForumName(String);

impl ForumName {
    #[must_use]
    pub fn new(name: &str) -> Self {
        if name.is_empty() || name.eq_ignore_ascii_case(DEFAULT_FORUM_NAME) {
            Self(DEFAULT_FORUM_NAME.to_owned())
        } else {
            Self(name.to_owned())
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for ForumName {
    fn default() -> Self {
        Self(DEFAULT_FORUM_NAME.to_owned())
    }
}

impl Display for ForumName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<'de> Deserialize<'de> for ForumName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        Ok(ForumName::new(&inner))
    }
}

/// The grouping key under which the store keeps all posts of one forum.
///
/// Derivation is a pure function of the normalized forum name: equal names
/// map to equal keys, distinct names to distinct keys. Writes and queries
/// must both go through this derivation, otherwise the read-after-write
/// guarantee of a partition is lost.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct PartitionKey(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("Not a forum partition key: {0}")]
pub struct InvalidPartitionKeyError(String);

impl PartitionKey {
    /// Rebuilds a key from its stored string form.
    pub fn from_raw(raw: String) -> Result<Self, InvalidPartitionKeyError> {
        match raw.split_once('/') {
            Some((kind, name)) if kind == PARTITION_KEY_KIND && !name.is_empty() => Ok(Self(raw)),
            _ => Err(InvalidPartitionKeyError(raw)),
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&ForumName> for PartitionKey {
    fn from(value: &ForumName) -> Self {
        Self(format!("{PARTITION_KEY_KIND}/{}", value.get()))
    }
}

impl Display for PartitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

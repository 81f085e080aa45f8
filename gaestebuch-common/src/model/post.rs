use crate::model::forum::PartitionKey;
use crate::model::identity::Identity;
use serde::Serialize;
use thiserror::Error;
use time::UtcDateTime;

/// The shared pseudo-identity used for every signed-out caller.
pub const ANONYMOUS_AUTHOR: &str = "anonymous@anonymous.com";

/// The author of a post, embedded in [`Post`] by value.
///
/// `identity` is the identity provider's user id and is `None` for
/// anonymous authors. Anonymous posts all share the one pseudo-identity;
/// no uniqueness is implied between them.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Author {
    pub identity: Option<String>,
    pub name: String,
    pub email: String,
}

impl Author {
    /// Resolves the author for a new post from the caller's identity state.
    #[must_use]
    pub fn resolve(identity: Option<Identity>) -> Self {
        match identity {
            Some(identity) => Self {
                identity: Some(identity.id),
                name: identity.name,
                email: identity.email,
            },
            None => Self::anonymous(),
        }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            name: ANONYMOUS_AUTHOR.to_owned(),
            email: ANONYMOUS_AUTHOR.to_owned(),
        }
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.identity.is_none()
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize)]
#[serde(transparent)]
pub struct PostContent(String);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("PLEASE TYPE IN YOUR COMMENTS!")]
pub struct EmptyPostContentError;

impl PostContent {
    pub fn new(content: String) -> Result<Self, EmptyPostContentError> {
        if content.is_empty() {
            Err(EmptyPostContentError)
        } else {
            Ok(Self(content))
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

/// One guestbook entry.
///
/// The partition key is fixed at creation and never changes; neither does
/// `created_at`. Posts are only ever appended, never updated or deleted.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Post {
    pub partition_key: PartitionKey,
    pub author: Author,
    pub content: PostContent,
    pub created_at: UtcDateTime,
}

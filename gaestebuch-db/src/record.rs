use gaestebuch_common::model::{
    ModelValidationError,
    forum::PartitionKey,
    post::{Author, Post, PostContent},
};
use sqlx::FromRow;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Row shape of the `posts` table. Timestamps are stored as naive UTC.
#[derive(Clone, Eq, PartialEq, Debug, FromRow)]
pub(crate) struct PostRecord {
    pub partition_key: String,
    pub author_identity: Option<String>,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
    pub created_at: PrimitiveDateTime,
}

impl From<&Post> for PostRecord {
    fn from(value: &Post) -> Self {
        let created_at = OffsetDateTime::from(value.created_at);

        Self {
            partition_key: value.partition_key.get().to_owned(),
            author_identity: value.author.identity.clone(),
            author_name: value.author.name.clone(),
            author_email: value.author.email.clone(),
            content: value.content.get().to_owned(),
            created_at: PrimitiveDateTime::new(created_at.date(), created_at.time()),
        }
    }
}

impl TryFrom<PostRecord> for Post {
    type Error = ModelValidationError;

    fn try_from(value: PostRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            partition_key: PartitionKey::from_raw(value.partition_key)?,
            author: Author {
                identity: value.author_identity,
                name: value.author_name,
                email: value.author_email,
            },
            content: PostContent::new(value.content)?,
            created_at: value.created_at.assume_utc().into(),
        })
    }
}

use crate::store::{DbError, DocumentStore};
use gaestebuch_common::model::forum::{ForumName, PartitionKey};
use gaestebuch_common::model::post::{Author, EmptyPostContentError, Post, PostContent};
use std::sync::Arc;
use thiserror::Error;
use time::UtcDateTime;

#[derive(Debug, Error)]
pub enum CreatePostError {
    #[error(transparent)]
    InvalidContent(#[from] EmptyPostContentError),
    #[error(transparent)]
    Store(#[from] DbError),
}

/// Create and list operations over the posts of one forum partition.
///
/// Stateless apart from the store handle; every call derives the partition
/// key from the forum name anew, so writers and readers always meet on the
/// same partition.
pub struct PostRepository {
    store: Arc<dyn DocumentStore>,
}

impl PostRepository {
    pub fn new(store: impl DocumentStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// All posts of the forum, newest first.
    ///
    /// Every call is a fresh snapshot; an empty partition is an empty vec,
    /// not an error.
    pub async fn list_posts(&self, forum_name: &ForumName) -> Result<Vec<Post>, DbError> {
        self.store
            .query_by_partition(&PartitionKey::from(forum_name))
            .await
    }

    /// Validates and appends one post with a server-assigned timestamp.
    ///
    /// Missing and empty content are rejected alike and nothing is written
    /// in that case. There is no deduplication: identical resubmissions
    /// create distinct posts.
    pub async fn create_post(
        &self,
        forum_name: &ForumName,
        author: Author,
        content: Option<String>,
    ) -> Result<(), CreatePostError> {
        let content = PostContent::new(content.unwrap_or_default())?;

        let post = Post {
            partition_key: PartitionKey::from(forum_name),
            author,
            content,
            created_at: UtcDateTime::now(),
        };

        self.store.put(&post).await?;

        Ok(())
    }
}

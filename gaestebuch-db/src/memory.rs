use crate::store::{DocumentStore, Result};
use async_trait::async_trait;
use gaestebuch_common::model::forum::PartitionKey;
use gaestebuch_common::model::post::Post;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory document store for tests and local development.
///
/// Honors the same partition contract as [`crate::client::PgDocumentStore`]:
/// a completed `put` is visible to every later query for the same key, and
/// results come back newest first.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    partitions: Mutex<HashMap<PartitionKey, Vec<Post>>>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn put(&self, post: &Post) -> Result<()> {
        self.partitions
            .lock()
            .expect("partition map lock poisoned")
            .entry(post.partition_key.clone())
            .or_default()
            .push(post.clone());

        Ok(())
    }

    async fn query_by_partition(&self, key: &PartitionKey) -> Result<Vec<Post>> {
        let mut posts = self
            .partitions
            .lock()
            .expect("partition map lock poisoned")
            .get(key)
            .cloned()
            .unwrap_or_default();

        // Stable sort over the reversed insertion order, so equal
        // timestamps come back newest insert first like the SQL ordering.
        posts.reverse();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(posts)
    }
}

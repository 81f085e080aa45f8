use async_trait::async_trait;
use gaestebuch_common::model::{ModelValidationError, forum::PartitionKey, post::Post};
use thiserror::Error;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("An object in the database was invalid: {0}")]
    Data(#[from] ModelValidationError),
    #[error("Running database migrations failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Narrow interface of the document store backing the guestbook.
///
/// `put` appends a post under its partition key, `query_by_partition`
/// returns everything written under one key, newest first. A `put` that
/// returned is visible to every later query for the same key; nothing is
/// guaranteed across distinct keys.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put(&self, post: &Post) -> Result<()>;

    async fn query_by_partition(&self, key: &PartitionKey) -> Result<Vec<Post>>;
}

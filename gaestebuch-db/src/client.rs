use crate::record::PostRecord;
use crate::store::{DbError, DocumentStore, Result};
use async_trait::async_trait;
use gaestebuch_common::model::forum::PartitionKey;
use gaestebuch_common::model::post::Post;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Postgres-backed document store.
///
/// The partition key is a plain indexed column; ordering within a
/// partition is `created_at` descending with the serial row id breaking
/// timestamp ties toward the newest insert.
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Connects a pool and brings the schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new().connect(database_url).await?;
        Self::with_pool(pool).await
    }

    pub async fn with_pool(pool: PgPool) -> Result<Self> {
        sqlx::migrate!().run(&pool).await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn put(&self, post: &Post) -> Result<()> {
        let record = PostRecord::from(post);

        sqlx::query(
            "
            INSERT INTO posts
                (partition_key, author_identity, author_name, author_email, content, created_at)
            VALUES
                ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&record.partition_key)
        .bind(&record.author_identity)
        .bind(&record.author_name)
        .bind(&record.author_email)
        .bind(&record.content)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn query_by_partition(&self, key: &PartitionKey) -> Result<Vec<Post>> {
        let records: Vec<PostRecord> = sqlx::query_as(
            "
            SELECT
                partition_key, author_identity, author_name, author_email, content, created_at
            FROM
                posts
            WHERE
                partition_key = $1
            ORDER BY
                created_at DESC, post_id DESC
            ",
        )
        .bind(key.get())
        .fetch_all(&self.pool)
        .await?;

        records
            .into_iter()
            .map(|record| Post::try_from(record).map_err(DbError::from))
            .collect()
    }
}

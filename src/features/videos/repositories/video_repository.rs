use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::videos::models::{NewVideo, Video};

/// Metadata store for video records.
///
/// Injected into the video service so tests can substitute an in-memory
/// double. Write failures map to `MetadataWrite`, read failures to `Query`.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Insert a record; the store assigns `id`, `created_at`, and zeroes the
    /// counters. Returns the complete created record.
    async fn insert(&self, video: NewVideo) -> Result<Video>;

    /// All records ordered by creation time descending (most recent first).
    async fn list_newest_first(&self) -> Result<Vec<Video>>;

    /// All records, unordered. Used by the ranking aggregation.
    async fn fetch_all(&self) -> Result<Vec<Video>>;
}

/// PostgreSQL-backed video store
pub struct PgVideoStore {
    pool: PgPool,
}

impl PgVideoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    async fn insert(&self, video: NewVideo) -> Result<Video> {
        let created = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (user_id, username, title, description, storage_path, download_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&video.user_id)
        .bind(&video.username)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.storage_path)
        .bind(&video.download_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert video record: {:?}", e);
            AppError::MetadataWrite(e.to_string())
        })?;

        tracing::info!(
            "Video record created: id={}, storage_path={}",
            created.id,
            created.storage_path
        );

        Ok(created)
    }

    async fn list_newest_first(&self) -> Result<Vec<Video>> {
        sqlx::query_as::<_, Video>(
            r#"
            SELECT * FROM videos
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list videos: {:?}", e);
            AppError::Query(e.to_string())
        })
    }

    async fn fetch_all(&self) -> Result<Vec<Video>> {
        sqlx::query_as::<_, Video>("SELECT * FROM videos")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch videos: {:?}", e);
                AppError::Query(e.to_string())
            })
    }
}

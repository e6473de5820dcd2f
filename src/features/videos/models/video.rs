use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for uploaded videos.
///
/// `user_id` and `username` are required at upload time but nullable here:
/// the counters (and historically whole rows) are written by external
/// collaborators, so the read path must tolerate malformed records.
#[derive(Debug, Clone, FromRow)]
pub struct Video {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub title: String,
    pub description: String,
    pub storage_path: String,
    pub download_url: String,
    pub comments: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub hearts: i64,
    pub money: i64,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new video record.
///
/// `id`, `created_at`, and the counters are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub user_id: String,
    pub username: String,
    pub title: String,
    pub description: String,
    pub storage_path: String,
    pub download_url: String,
}

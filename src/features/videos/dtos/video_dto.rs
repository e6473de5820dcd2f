use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::videos::models::Video;

/// Maximum video size in bytes (100 MiB)
pub const MAX_VIDEO_SIZE: usize = 100 * 1024 * 1024;

/// Upload request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UploadVideoDto {
    /// The video file to upload (max 100 MiB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub video: String,
    /// Id of the uploading user (required)
    #[schema(example = "user-123")]
    pub user_id: String,
    /// Username of the uploading user (required)
    #[schema(example = "alice")]
    pub username: String,
    /// Video title (defaults to "Untitled")
    pub title: Option<String>,
    /// Video description (defaults to "No description")
    pub description: Option<String>,
}

/// Uploader reference embedded in a video record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoUserDto {
    /// Uploader id (absent on malformed records written by other collaborators)
    pub id: Option<String>,
    /// Uploader username
    pub username: Option<String>,
}

/// A video record as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponseDto {
    /// Unique identifier, assigned by the metadata store
    pub id: Uuid,
    /// Uploading user
    pub user: VideoUserDto,
    pub title: String,
    pub description: String,
    /// Object storage key: `videos/<epoch-ms>-<original-filename>`
    pub storage_path: String,
    /// Public URL derived from bucket and storage path
    #[serde(rename = "downloadURL")]
    pub download_url: String,
    pub comments: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub hearts: i64,
    pub money: i64,
    /// Server-assigned creation time
    pub timestamp: DateTime<Utc>,
}

impl From<Video> for VideoResponseDto {
    fn from(video: Video) -> Self {
        Self {
            id: video.id,
            user: VideoUserDto {
                id: video.user_id,
                username: video.username,
            },
            title: video.title,
            description: video.description,
            storage_path: video.storage_path,
            download_url: video.download_url,
            comments: video.comments,
            likes: video.likes,
            dislikes: video.dislikes,
            hearts: video.hearts,
            money: video.money,
            timestamp: video.created_at,
        }
    }
}

/// Per-uploader aggregate of total likes, recomputed on every request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRankingDto {
    pub user_id: String,
    /// Username observed when the user id was first seen during aggregation
    pub username: String,
    /// Sum of likes across this user's videos
    pub likes: i64,
}

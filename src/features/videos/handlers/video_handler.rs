use axum::{
    extract::{
        multipart::{Field, Multipart},
        State,
    },
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::videos::dtos::{
    UploadVideoDto, UserRankingDto, VideoResponseDto, MAX_VIDEO_SIZE,
};
use crate::features::videos::services::{VideoService, VideoUpload};

/// Upload a video
///
/// Accepts multipart/form-data with:
/// - `video`: the video file (required, ≤100 MiB)
/// - `userId`, `username`: uploading user (required, non-empty)
/// - `title`, `description`: optional, defaulted when absent
#[utoipa::path(
    post,
    path = "/upload",
    tag = "videos",
    request_body(
        content = UploadVideoDto,
        content_type = "multipart/form-data",
        description = "Video upload form with required userId/username and optional title/description fields",
    ),
    responses(
        (status = 200, description = "Video uploaded, returns the created record", body = VideoResponseDto),
        (status = 400, description = "Missing file or user fields, or oversize upload"),
        (status = 500, description = "Storage or metadata write failure"),
    )
)]
pub async fn upload_video(
    State(service): State<Arc<VideoService>>,
    mut multipart: Multipart,
) -> Result<Json<VideoResponseDto>> {
    let mut file: Option<(Vec<u8>, String, String)> = None;
    let mut user_id: Option<String> = None;
    let mut username: Option<String> = None;
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "video" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                // Read chunkwise so an oversize upload is rejected as soon
                // as the running total passes the ceiling, not after the
                // whole payload has been buffered
                let mut data = Vec::new();
                while let Some(chunk) = field.chunk().await.map_err(|e| {
                    debug!("Failed to read video bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read video data: {}", e))
                })? {
                    if data.len() + chunk.len() > MAX_VIDEO_SIZE {
                        return Err(AppError::BadRequest(format!(
                            "Video too large. Maximum size is {} bytes ({} MB)",
                            MAX_VIDEO_SIZE,
                            MAX_VIDEO_SIZE / 1024 / 1024
                        )));
                    }
                    data.extend_from_slice(&chunk);
                }

                file = Some((data, file_name, content_type));
            }
            "userId" => user_id = Some(text_field(field, "userId").await?),
            "username" => username = Some(text_field(field, "username").await?),
            "title" => title = Some(text_field(field, "title").await?),
            "description" => description = Some(text_field(field, "description").await?),
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    // Validation happens before any storage write is attempted
    let (data, file_name, content_type) =
        file.ok_or_else(|| AppError::Validation("Video file is required".to_string()))?;
    let user_id = user_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("userId is required".to_string()))?;
    let username = username
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("username is required".to_string()))?;

    let record = service
        .upload_video(VideoUpload {
            data,
            file_name,
            content_type,
            user_id,
            username,
            title,
            description,
        })
        .await?;

    Ok(Json(record))
}

async fn text_field(field: Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}

/// List all videos, most recent first
#[utoipa::path(
    get,
    path = "/videos",
    tag = "videos",
    responses(
        (status = 200, description = "All video records, newest first (empty array when none exist)", body = Vec<VideoResponseDto>),
        (status = 500, description = "Store query failure"),
    )
)]
pub async fn list_videos(
    State(service): State<Arc<VideoService>>,
) -> Result<Json<Vec<VideoResponseDto>>> {
    let videos = service.list_videos().await?;
    Ok(Json(videos))
}

/// Rank uploaders by total likes across their videos
#[utoipa::path(
    get,
    path = "/ranked-users",
    tag = "videos",
    responses(
        (status = 200, description = "Uploaders sorted by total likes descending (empty array when no videos exist)", body = Vec<UserRankingDto>),
        (status = 500, description = "Store query failure"),
    )
)]
pub async fn ranked_users(
    State(service): State<Arc<VideoService>>,
) -> Result<Json<Vec<UserRankingDto>>> {
    let rankings = service.rank_uploaders().await?;
    Ok(Json(rankings))
}

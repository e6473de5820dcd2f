use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::videos::dtos::MAX_VIDEO_SIZE;
use crate::features::videos::handlers::{list_videos, ranked_users, upload_video};
use crate::features::videos::services::VideoService;

/// Create routes for the videos feature
pub fn routes(video_service: Arc<VideoService>) -> Router {
    Router::new()
        .route(
            "/upload",
            // Allow body size up to MAX_VIDEO_SIZE + buffer for multipart overhead
            post(upload_video).layer(DefaultBodyLimit::max(MAX_VIDEO_SIZE + 1024 * 1024)),
        )
        .route("/videos", get(list_videos))
        .route("/ranked-users", get(ranked_users))
        .with_state(video_service)
}

use utoipa::{Modify, OpenApi};

use crate::features::videos::{dtos as videos_dtos, handlers as videos_handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        videos_handlers::upload_video,
        videos_handlers::list_videos,
        videos_handlers::ranked_users,
    ),
    components(
        schemas(
            videos_dtos::UploadVideoDto,
            videos_dtos::VideoResponseDto,
            videos_dtos::VideoUserDto,
            videos_dtos::UserRankingDto,
        )
    ),
    tags(
        (name = "videos", description = "Video upload, listing, and uploader ranking"),
    ),
    info(
        title = "ClipTube API",
        version = "0.1.0",
        description = "API documentation for ClipTube",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

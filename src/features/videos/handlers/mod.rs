mod video_handler;

// Glob re-export keeps utoipa's generated path items visible to ApiDoc
pub use video_handler::*;

mod video_dto;

pub use video_dto::{
    UploadVideoDto, UserRankingDto, VideoResponseDto, VideoUserDto, MAX_VIDEO_SIZE,
};

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::core::error::Result;
use crate::features::videos::dtos::{UserRankingDto, VideoResponseDto};
use crate::features::videos::models::{NewVideo, Video};
use crate::features::videos::repositories::VideoStore;
use crate::modules::storage::ObjectStorage;

const DEFAULT_TITLE: &str = "Untitled";
const DEFAULT_DESCRIPTION: &str = "No description";

/// A validated upload as handed over by the HTTP layer.
#[derive(Debug)]
pub struct VideoUpload {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
    pub user_id: String,
    pub username: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Service for video uploads and the two read-side views.
pub struct VideoService {
    store: Arc<dyn VideoStore>,
    storage: Arc<dyn ObjectStorage>,
    video_prefix: String,
}

impl VideoService {
    pub fn new(
        store: Arc<dyn VideoStore>,
        storage: Arc<dyn ObjectStorage>,
        video_prefix: String,
    ) -> Self {
        Self {
            store,
            storage,
            video_prefix,
        }
    }

    /// Upload a video to object storage, then record its metadata.
    ///
    /// The object write is awaited and confirmed before the metadata insert
    /// is attempted, so a storage failure never leaves an orphan record. The
    /// reverse does not hold: a metadata failure after a successful object
    /// write leaves an orphaned object behind (surfaced, not reconciled).
    pub async fn upload_video(&self, upload: VideoUpload) -> Result<VideoResponseDto> {
        // Time-prefixed key, unique per upload even when two clients send the
        // same filename back to back
        let storage_path = format!(
            "{}/{}-{}",
            self.video_prefix,
            Utc::now().timestamp_millis(),
            upload.file_name
        );

        self.storage
            .put_object(&storage_path, upload.data, &upload.content_type)
            .await?;

        debug!("Video uploaded to storage: {}", storage_path);

        let download_url = self.storage.public_url(&storage_path);

        let record = self
            .store
            .insert(NewVideo {
                user_id: upload.user_id,
                username: upload.username,
                title: non_empty_or(upload.title, DEFAULT_TITLE),
                description: non_empty_or(upload.description, DEFAULT_DESCRIPTION),
                storage_path,
                download_url,
            })
            .await?;

        Ok(record.into())
    }

    /// All videos, most recently created first.
    pub async fn list_videos(&self) -> Result<Vec<VideoResponseDto>> {
        let videos = self.store.list_newest_first().await?;
        Ok(videos.into_iter().map(Into::into).collect())
    }

    /// Per-uploader like totals, recomputed in full from the current records.
    pub async fn rank_uploaders(&self) -> Result<Vec<UserRankingDto>> {
        let videos = self.store.fetch_all().await?;
        Ok(aggregate_rankings(&videos))
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Sum likes per distinct uploader id.
///
/// Records without a user id are malformed (written by other collaborators)
/// and are excluded silently. The username kept for an id is the one observed
/// when the id was first seen. Sorted by total likes descending; ties break
/// by user id ascending so the order is deterministic.
fn aggregate_rankings(videos: &[Video]) -> Vec<UserRankingDto> {
    let mut totals: HashMap<String, UserRankingDto> = HashMap::new();

    for video in videos {
        let Some(user_id) = video.user_id.as_deref().filter(|id| !id.is_empty()) else {
            continue;
        };

        let entry = totals
            .entry(user_id.to_string())
            .or_insert_with(|| UserRankingDto {
                user_id: user_id.to_string(),
                username: video.username.clone().unwrap_or_default(),
                likes: 0,
            });
        entry.likes += video.likes;
    }

    let mut rankings: Vec<UserRankingDto> = totals.into_values().collect();
    rankings.sort_by(|a, b| b.likes.cmp(&a.likes).then_with(|| a.user_id.cmp(&b.user_id)));
    rankings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::test_helpers::{video_fixture, InMemoryVideoStore, MockStorage};

    fn service(store: Arc<InMemoryVideoStore>, storage: Arc<MockStorage>) -> VideoService {
        VideoService::new(store, storage, "videos".to_string())
    }

    fn upload_fixture() -> VideoUpload {
        VideoUpload {
            data: b"not actually mp4".to_vec(),
            file_name: "clip.mp4".to_string(),
            content_type: "video/mp4".to_string(),
            user_id: "user-a".to_string(),
            username: "alice".to_string(),
            title: Some("My clip".to_string()),
            description: None,
        }
    }

    #[tokio::test]
    async fn upload_builds_time_prefixed_key() {
        let store = Arc::new(InMemoryVideoStore::new());
        let storage = Arc::new(MockStorage::new());
        let svc = service(store, Arc::clone(&storage));

        let record = svc.upload_video(upload_fixture()).await.unwrap();

        assert!(record.storage_path.starts_with("videos/"));
        assert!(record.storage_path.ends_with("-clip.mp4"));
        assert_eq!(
            record.download_url,
            format!("https://storage.test/test-bucket/{}", record.storage_path)
        );
        assert_eq!(storage.upload_count(), 1);
    }

    #[tokio::test]
    async fn upload_defaults_title_and_description() {
        let store = Arc::new(InMemoryVideoStore::new());
        let storage = Arc::new(MockStorage::new());
        let svc = service(store, storage);

        let mut upload = upload_fixture();
        upload.title = None;
        upload.description = Some("  ".to_string());

        let record = svc.upload_video(upload).await.unwrap();

        assert_eq!(record.title, "Untitled");
        assert_eq!(record.description, "No description");
        assert_eq!(record.likes, 0);
        assert_eq!(record.comments, 0);
    }

    #[tokio::test]
    async fn upload_storage_failure_never_writes_metadata() {
        let store = Arc::new(InMemoryVideoStore::new());
        let storage = Arc::new(MockStorage::failing());
        let svc = service(Arc::clone(&store), Arc::clone(&storage));

        let err = svc.upload_video(upload_fixture()).await.unwrap_err();

        assert!(matches!(err, AppError::StorageWrite(_)));
        assert_eq!(store.len(), 0);
        assert_eq!(storage.upload_count(), 0);
    }

    #[tokio::test]
    async fn upload_metadata_failure_leaves_orphan_object() {
        let store = Arc::new(InMemoryVideoStore::failing_writes());
        let storage = Arc::new(MockStorage::new());
        let svc = service(Arc::clone(&store), Arc::clone(&storage));

        let err = svc.upload_video(upload_fixture()).await.unwrap_err();

        assert!(matches!(err, AppError::MetadataWrite(_)));
        // The object write already happened; it is orphaned, not cleaned up
        assert_eq!(storage.upload_count(), 1);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn list_videos_empty_store_returns_empty_vec() {
        let store = Arc::new(InMemoryVideoStore::new());
        let storage = Arc::new(MockStorage::new());
        let svc = service(store, storage);

        assert!(svc.list_videos().await.unwrap().is_empty());
        assert!(svc.rank_uploaders().await.unwrap().is_empty());
    }

    #[test]
    fn rankings_sum_likes_per_uploader() {
        let videos = vec![
            video_fixture(Some("A"), Some("alice"), 3),
            video_fixture(Some("A"), Some("alice"), 5),
            video_fixture(Some("B"), Some("bob"), 1),
        ];

        let rankings = aggregate_rankings(&videos);

        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings[0].user_id, "A");
        assert_eq!(rankings[0].likes, 8);
        assert_eq!(rankings[1].user_id, "B");
        assert_eq!(rankings[1].likes, 1);
    }

    #[test]
    fn rankings_skip_records_without_user_id() {
        let videos = vec![
            video_fixture(None, Some("ghost"), 100),
            video_fixture(Some(""), Some("empty"), 50),
            video_fixture(Some("A"), Some("alice"), 2),
        ];

        let rankings = aggregate_rankings(&videos);

        assert_eq!(rankings.len(), 1);
        assert_eq!(rankings[0].user_id, "A");
        assert_eq!(rankings[0].likes, 2);
    }

    #[test]
    fn rankings_keep_first_observed_username() {
        let videos = vec![
            video_fixture(Some("A"), Some("alice"), 1),
            video_fixture(Some("A"), Some("renamed"), 1),
        ];

        let rankings = aggregate_rankings(&videos);

        assert_eq!(rankings[0].username, "alice");
        assert_eq!(rankings[0].likes, 2);
    }

    #[test]
    fn rankings_break_ties_by_user_id() {
        let videos = vec![
            video_fixture(Some("C"), Some("carol"), 4),
            video_fixture(Some("A"), Some("alice"), 4),
            video_fixture(Some("B"), Some("bob"), 4),
        ];

        let rankings = aggregate_rankings(&videos);

        let ids: Vec<&str> = rankings.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn rankings_empty_input_yields_empty_output() {
        assert!(aggregate_rankings(&[]).is_empty());
    }
}

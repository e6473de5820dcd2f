//! In-memory doubles for the two injected collaborators: object storage and
//! the video metadata store. Both record enough to assert side-effect
//! ordering (e.g., that validation failures happen before any storage write).

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::videos::models::{NewVideo, Video};
use crate::features::videos::repositories::VideoStore;
use crate::modules::storage::ObjectStorage;

/// One recorded object write.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub size: usize,
    pub content_type: String,
}

/// Object storage double that records writes instead of performing them.
pub struct MockStorage {
    uploads: Mutex<Vec<StoredObject>>,
    fail_puts: bool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail_puts: false,
        }
    }

    /// A storage double whose writes always fail.
    pub fn failing() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail_puts: true,
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn uploads(&self) -> Vec<StoredObject> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn put_object(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()> {
        if self.fail_puts {
            return Err(AppError::StorageWrite(
                "simulated storage outage".to_string(),
            ));
        }

        self.uploads.lock().unwrap().push(StoredObject {
            key: key.to_string(),
            size: data.len(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://storage.test/test-bucket/{}", key)
    }
}

/// Video store double backed by a Vec.
pub struct InMemoryVideoStore {
    rows: Mutex<Vec<Video>>,
    fail_writes: bool,
    fail_reads: bool,
}

impl InMemoryVideoStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_writes: false,
            fail_reads: false,
        }
    }

    /// A store whose inserts always fail (reads still work).
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    /// A store whose reads always fail (inserts still work).
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn seed(&self, video: Video) {
        self.rows.lock().unwrap().push(video);
    }
}

#[async_trait]
impl VideoStore for InMemoryVideoStore {
    async fn insert(&self, video: NewVideo) -> Result<Video> {
        if self.fail_writes {
            return Err(AppError::MetadataWrite(
                "simulated database outage".to_string(),
            ));
        }

        let mut rows = self.rows.lock().unwrap();

        // Keep creation times strictly increasing so "newest first" is
        // observable even when two inserts land in the same millisecond
        let now = Utc::now();
        let created_at = match rows.iter().map(|v| v.created_at).max() {
            Some(latest) if latest >= now => latest + Duration::milliseconds(1),
            _ => now,
        };

        let created = Video {
            id: Uuid::new_v4(),
            user_id: Some(video.user_id),
            username: Some(video.username),
            title: video.title,
            description: video.description,
            storage_path: video.storage_path,
            download_url: video.download_url,
            comments: 0,
            likes: 0,
            dislikes: 0,
            hearts: 0,
            money: 0,
            created_at,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn list_newest_first(&self) -> Result<Vec<Video>> {
        if self.fail_reads {
            return Err(AppError::Query("simulated database outage".to_string()));
        }

        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn fetch_all(&self) -> Result<Vec<Video>> {
        if self.fail_reads {
            return Err(AppError::Query("simulated database outage".to_string()));
        }

        Ok(self.rows.lock().unwrap().clone())
    }
}

/// A video row as external collaborators may have left it: possibly missing
/// the uploader, with counters already mutated.
pub fn video_fixture(user_id: Option<&str>, username: Option<&str>, likes: i64) -> Video {
    Video {
        id: Uuid::new_v4(),
        user_id: user_id.map(str::to_string),
        username: username.map(str::to_string),
        title: "Untitled".to_string(),
        description: "No description".to_string(),
        storage_path: format!("videos/0-{}.mp4", Uuid::new_v4()),
        download_url: "https://storage.test/test-bucket/videos/0-fixture.mp4".to_string(),
        comments: 0,
        likes,
        dislikes: 0,
        hearts: 0,
        money: 0,
        created_at: Utc::now(),
    }
}

//! The video-and-comment repository: every operation loads the collection,
//! mutates an in-memory copy and persists it back through [`VideoStore`].

use chrono::Utc;
use parking_lot::Mutex;
use thiserror::Error;
use uuid::Uuid;

use crate::services::seed::SeedGenerator;
use crate::store::models::{Comment, Video, VideoSummary};
use crate::store::VideoStore;

const DEFAULT_POSTER: &str = "/Upload-video-preview.jpg";
const SAMPLE_VIDEO: &str = "/media/sample-video.mp4";
const PLACEHOLDER_DURATION: &str = "4:01";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Video {0} not found")]
    VideoNotFound(String),
    #[error("Comment {0} not found")]
    CommentNotFound(String),
    #[error("{0}")]
    Validation(&'static str),
}

/// Client-supplied fields for a new video; everything else is generated.
#[derive(Debug)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    /// Root-relative path of the stored poster, or `None` for the placeholder.
    pub poster: Option<String>,
}

pub struct VideoCatalog {
    store: VideoStore,
    seeder: Mutex<SeedGenerator>,
    comments_per_video: usize,
}

impl VideoCatalog {
    pub fn new(store: VideoStore, seeder: SeedGenerator, comments_per_video: usize) -> Self {
        Self {
            store,
            seeder: Mutex::new(seeder),
            comments_per_video,
        }
    }

    pub fn list(&self) -> Vec<VideoSummary> {
        self.store.read().iter().map(VideoSummary::from).collect()
    }

    pub fn get(&self, id: &str) -> Result<Video, CatalogError> {
        let target = parse_video_id(id)?;
        find_video(&self.store.read(), target)
            .cloned()
            .ok_or_else(|| CatalogError::VideoNotFound(id.to_string()))
    }

    /// Builds a full record around the client-supplied fields and appends it.
    /// Channel, counters and seed comments all come from the generator.
    pub fn create(&self, new: NewVideo) -> Result<Video, CatalogError> {
        let mut seeder = self.seeder.lock();
        let video = Video {
            id: Uuid::new_v4(),
            title: new.title,
            channel: seeder.next_channel().to_string(),
            description: new.description,
            views: seeder.seed_views(),
            likes: seeder.seed_likes(),
            duration: PLACEHOLDER_DURATION.to_string(),
            video: SAMPLE_VIDEO.to_string(),
            image: new.poster.unwrap_or_else(|| DEFAULT_POSTER.to_string()),
            timestamp: Utc::now().timestamp_millis(),
            comments: seeder.seed_comments(self.comments_per_video),
        };
        drop(seeder);

        self.store.mutate(move |videos| {
            videos.push(video.clone());
            Ok(video)
        })
    }

    pub fn add_comment(
        &self,
        video_id: &str,
        name: &str,
        comment: &str,
    ) -> Result<Comment, CatalogError> {
        if name.is_empty() || comment.is_empty() {
            return Err(CatalogError::Validation("Both name and comment are required"));
        }
        let target = parse_video_id(video_id)?;

        self.store.mutate(|videos| {
            let video = find_video_mut(videos, target)
                .ok_or_else(|| CatalogError::VideoNotFound(video_id.to_string()))?;
            let entry = Comment {
                id: Uuid::new_v4(),
                name: name.to_string(),
                comment: comment.to_string(),
                likes: 0,
                timestamp: Utc::now().timestamp_millis(),
            };
            video.comments.push(entry.clone());
            Ok(entry)
        })
    }

    pub fn like_video(&self, id: &str) -> Result<Video, CatalogError> {
        let target = parse_video_id(id)?;
        self.store.mutate(|videos| {
            let video = find_video_mut(videos, target)
                .ok_or_else(|| CatalogError::VideoNotFound(id.to_string()))?;
            video.likes += 1;
            Ok(video.clone())
        })
    }

    pub fn record_view(&self, id: &str) -> Result<Video, CatalogError> {
        let target = parse_video_id(id)?;
        self.store.mutate(|videos| {
            let video = find_video_mut(videos, target)
                .ok_or_else(|| CatalogError::VideoNotFound(id.to_string()))?;
            video.views += 1;
            Ok(video.clone())
        })
    }

    /// Returns the comment's new like count.
    pub fn like_comment(&self, video_id: &str, comment_id: &str) -> Result<u64, CatalogError> {
        let video_target = parse_video_id(video_id)?;
        let comment_target = parse_comment_id(comment_id)?;

        self.store.mutate(|videos| {
            let video = find_video_mut(videos, video_target)
                .ok_or_else(|| CatalogError::VideoNotFound(video_id.to_string()))?;
            let comment = find_comment_mut(video, comment_target)
                .ok_or_else(|| CatalogError::CommentNotFound(comment_id.to_string()))?;
            comment.likes += 1;
            Ok(comment.likes)
        })
    }

    pub fn delete_comment(&self, video_id: &str, comment_id: &str) -> Result<(), CatalogError> {
        let video_target = parse_video_id(video_id)?;
        let comment_target = parse_comment_id(comment_id)?;

        self.store.mutate(|videos| {
            let video = find_video_mut(videos, video_target)
                .ok_or_else(|| CatalogError::VideoNotFound(video_id.to_string()))?;
            let position = comment_position(video, comment_target)
                .ok_or_else(|| CatalogError::CommentNotFound(comment_id.to_string()))?;
            video.comments.remove(position);
            Ok(())
        })
    }

    /// Sequential poster naming: scan stored `imageN` basenames for the
    /// current maximum and use the next integer. Names that do not match the
    /// pattern (the placeholder, for one) are skipped.
    pub fn next_poster_filename(&self, ext: &str) -> String {
        let next = self
            .store
            .read()
            .iter()
            .filter_map(|video| poster_index(&video.image))
            .max()
            .map_or(0, |highest| highest + 1);
        format!("image{next}.{ext}")
    }
}

fn find_video(videos: &[Video], id: Uuid) -> Option<&Video> {
    videos.iter().find(|video| video.id == id)
}

fn find_video_mut(videos: &mut [Video], id: Uuid) -> Option<&mut Video> {
    videos.iter_mut().find(|video| video.id == id)
}

fn find_comment_mut(video: &mut Video, id: Uuid) -> Option<&mut Comment> {
    video.comments.iter_mut().find(|comment| comment.id == id)
}

fn comment_position(video: &Video, id: Uuid) -> Option<usize> {
    video.comments.iter().position(|comment| comment.id == id)
}

// Ids are opaque to clients; anything that does not parse cannot be in the
// store, so it resolves to the matching not-found case.
fn parse_video_id(id: &str) -> Result<Uuid, CatalogError> {
    Uuid::parse_str(id).map_err(|_| CatalogError::VideoNotFound(id.to_string()))
}

fn parse_comment_id(id: &str) -> Result<Uuid, CatalogError> {
    Uuid::parse_str(id).map_err(|_| CatalogError::CommentNotFound(id.to_string()))
}

fn poster_index(image: &str) -> Option<u32> {
    let name = image.rsplit('/').next().unwrap_or(image);
    let rest = name.strip_prefix("image")?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

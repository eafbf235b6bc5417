use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::counter;

/// A persisted video record, one element of the store's JSON array.
///
/// `views` and `likes` are integers in memory but serialize through the counter
/// codec, so the file and the API keep the `"12,345"` display shape.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub channel: String,
    pub description: String,
    #[serde(with = "counter")]
    pub views: u64,
    #[serde(with = "counter")]
    pub likes: u64,
    pub duration: String,
    pub video: String,
    pub image: String,
    /// Creation time in milliseconds since the epoch.
    pub timestamp: i64,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A comment embedded in its parent video. Insertion order is display order.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Comment {
    pub id: Uuid,
    pub name: String,
    pub comment: String,
    pub likes: u64,
    pub timestamp: i64,
}

/// The projection returned by the listing endpoint; full records stay in the
/// store.
#[derive(Debug, Serialize, Clone)]
pub struct VideoSummary {
    pub id: Uuid,
    pub title: String,
    pub channel: String,
    pub image: String,
}

impl From<&Video> for VideoSummary {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id,
            title: video.title.clone(),
            channel: video.channel.clone(),
            image: video.image.clone(),
        }
    }
}

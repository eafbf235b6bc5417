//! JSON-file persistence for the video collection.
//!
//! The whole collection lives in one pretty-printed JSON array on disk and is
//! rewritten in full on every mutation. Two contract points callers must know:
//!
//! - Reads fail open. A missing file is a normal first run; a file that cannot
//!   be read or parsed is logged and treated as an empty collection. `read`
//!   never returns an error.
//! - Writes fail silently. `mutate` returns the closure's value even when the
//!   save afterwards failed; the failure is logged and the mutation is lost on
//!   restart. The service stays available at the cost of durability.
//!
//! A store-wide mutex serializes every load-mutate-save cycle, so two
//! in-process writers cannot lose each other's updates.

pub mod counter;
pub mod models;

use std::io::ErrorKind;
use std::path::PathBuf;
use std::{fs, io};

use parking_lot::Mutex;

use self::models::Video;

pub struct VideoStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl VideoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the current collection. Never fails; see the module docs.
    pub fn read(&self) -> Vec<Video> {
        let _guard = self.lock.lock();
        self.load()
    }

    /// Runs `f` over the collection inside the store lock. The collection is
    /// saved back only when `f` succeeds; a failed lookup must not rewrite the
    /// file.
    pub fn mutate<T, E>(&self, f: impl FnOnce(&mut Vec<Video>) -> Result<T, E>) -> Result<T, E> {
        let _guard = self.lock.lock();
        let mut videos = self.load();
        let value = f(&mut videos)?;
        self.save(&videos);
        Ok(value)
    }

    fn load(&self) -> Vec<Video> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("store {} does not exist yet", self.path.display());
                return Vec::new();
            }
            Err(err) => {
                log::error!("failed to read store {}: {}", self.path.display(), err);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(videos) => videos,
            Err(err) => {
                log::error!("store {} is not a valid video array: {}", self.path.display(), err);
                Vec::new()
            }
        }
    }

    fn save(&self, videos: &[Video]) {
        if let Err(err) = self.try_save(videos) {
            log::error!("failed to write store {}: {}", self.path.display(), err);
        }
    }

    fn try_save(&self, videos: &[Video]) -> io::Result<()> {
        let json = serde_json::to_string_pretty(videos)?;
        fs::write(&self.path, json)
    }
}

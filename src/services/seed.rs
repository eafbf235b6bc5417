//! Canned data for newly created videos.
//!
//! Every created video gets a channel name, starting view/like counts and a
//! handful of comments so the demo frontend has something to show. Channel
//! names, comment authors and comment bodies rotate through shuffled fixed
//! sets: within one cycle no entry repeats, and the order changes whenever a
//! cycle completes. The generator is constructed once at startup and shared
//! behind a lock; its cursors live for the process and are never persisted.

use std::ops::RangeInclusive;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use uuid::Uuid;

use crate::store::models::Comment;

pub const CHANNEL_NAMES: [&str; 7] = [
    "First Light Films",
    "Peak Pixel",
    "Wanderframe",
    "Campfire Collective",
    "The Daily Reel",
    "Orbit & Oak",
    "Studio Nightjar",
];

const COMMENT_AUTHORS: [&str; 8] = [
    "Priya Raman",
    "Marcus Webb",
    "Elena Kovacs",
    "Dev Okafor",
    "Sofia Lindgren",
    "Jamal Carter",
    "Mei Tanaka",
    "Lucas Moreau",
];

const COMMENT_BODIES: [&str; 8] = [
    "This deserves way more views.",
    "The editing on this is so clean.",
    "Came for the thumbnail, stayed for the whole thing.",
    "Watching this on my lunch break, no regrets.",
    "That transition at the start caught me off guard.",
    "Instant subscribe.",
    "The sound design alone is worth a rewatch.",
    "Sharing this with everyone I know.",
];

const SEED_VIEWS: RangeInclusive<u64> = 1_000..=1_000_999;
const SEED_VIDEO_LIKES: RangeInclusive<u64> = 500..=110_499;
const SEED_COMMENT_LIKES: RangeInclusive<u64> = 0..=999;

/// Seeded comments are backdated one day per index so the list reads oldest
/// last.
const SEED_COMMENT_AGE_STEP_MS: i64 = 86_400_000;

/// A cursor over a shuffled fixed set. Serves the entry at the cursor and
/// advances; the permutation is redrawn every time the cursor wraps to zero.
struct Rotation {
    items: Vec<&'static str>,
    cursor: usize,
}

impl Rotation {
    fn new(set: &[&'static str]) -> Self {
        let mut items = set.to_vec();
        items.shuffle(&mut thread_rng());
        Self { items, cursor: 0 }
    }

    fn next(&mut self) -> &'static str {
        let pick = self.items[self.cursor];
        self.cursor = (self.cursor + 1) % self.items.len();
        if self.cursor == 0 {
            self.items.shuffle(&mut thread_rng());
        }
        pick
    }
}

pub struct SeedGenerator {
    channels: Rotation,
    authors: Rotation,
    bodies: Rotation,
}

impl SeedGenerator {
    pub fn new() -> Self {
        Self {
            channels: Rotation::new(&CHANNEL_NAMES),
            authors: Rotation::new(&COMMENT_AUTHORS),
            bodies: Rotation::new(&COMMENT_BODIES),
        }
    }

    pub fn next_channel(&mut self) -> &'static str {
        self.channels.next()
    }

    pub fn seed_views(&mut self) -> u64 {
        thread_rng().gen_range(SEED_VIEWS)
    }

    pub fn seed_likes(&mut self) -> u64 {
        thread_rng().gen_range(SEED_VIDEO_LIKES)
    }

    /// Produces `count` canned comments. Author and body cursors advance
    /// independently of each other.
    pub fn seed_comments(&mut self, count: usize) -> Vec<Comment> {
        let mut rng = thread_rng();
        let now = Utc::now().timestamp_millis();
        (0..count)
            .map(|index| Comment {
                id: Uuid::new_v4(),
                name: self.authors.next().to_string(),
                comment: self.bodies.next().to_string(),
                likes: rng.gen_range(SEED_COMMENT_LIKES),
                timestamp: now - index as i64 * SEED_COMMENT_AGE_STEP_MS,
            })
            .collect()
    }
}

impl Default for SeedGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_cycle_serves_every_name_exactly_once() {
        let mut generator = SeedGenerator::new();
        let mut served: Vec<&str> = (0..CHANNEL_NAMES.len())
            .map(|_| generator.next_channel())
            .collect();
        served.sort_unstable();
        let mut expected = CHANNEL_NAMES.to_vec();
        expected.sort_unstable();
        assert_eq!(served, expected);
    }

    #[test]
    fn second_cycle_serves_every_name_again() {
        let mut generator = SeedGenerator::new();
        let served: Vec<&str> = (0..CHANNEL_NAMES.len() * 2)
            .map(|_| generator.next_channel())
            .collect();
        for name in CHANNEL_NAMES {
            let hits = served.iter().filter(|&&s| s == name).count();
            assert_eq!(hits, 2, "expected {name} twice across two cycles");
        }
    }

    #[test]
    fn rotation_reshuffle_never_loses_items() {
        let mut rotation = Rotation::new(&COMMENT_AUTHORS);
        for _ in 0..3 {
            let mut cycle: Vec<&str> = (0..COMMENT_AUTHORS.len()).map(|_| rotation.next()).collect();
            cycle.sort_unstable();
            let mut expected = COMMENT_AUTHORS.to_vec();
            expected.sort_unstable();
            assert_eq!(cycle, expected);
        }
    }

    #[test]
    fn seed_comments_draw_from_the_canned_sets() {
        let mut generator = SeedGenerator::new();
        let comments = generator.seed_comments(3);
        assert_eq!(comments.len(), 3);
        for comment in &comments {
            assert!(COMMENT_AUTHORS.contains(&comment.name.as_str()));
            assert!(COMMENT_BODIES.contains(&comment.comment.as_str()));
            assert!(SEED_COMMENT_LIKES.contains(&comment.likes));
        }
    }

    #[test]
    fn seed_comments_are_backdated_one_step_per_index() {
        let mut generator = SeedGenerator::new();
        let comments = generator.seed_comments(3);
        assert_eq!(
            comments[0].timestamp - comments[1].timestamp,
            SEED_COMMENT_AGE_STEP_MS
        );
        assert_eq!(
            comments[1].timestamp - comments[2].timestamp,
            SEED_COMMENT_AGE_STEP_MS
        );
    }

    #[test]
    fn numeric_seeds_stay_in_their_ranges() {
        let mut generator = SeedGenerator::new();
        for _ in 0..50 {
            assert!(SEED_VIEWS.contains(&generator.seed_views()));
            assert!(SEED_VIDEO_LIKES.contains(&generator.seed_likes()));
        }
    }
}

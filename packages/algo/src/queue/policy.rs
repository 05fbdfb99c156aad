//! Reinsertion policy for missed items
//!
//! A policy is a list of tiers. The first tier whose `min_remaining` is met
//! by the number of items left in the queue (after removing the missed one)
//! gives the window the item is reinserted into. When no tier applies the
//! item goes to the end of the queue.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReinsertTier {
    /// Tier applies when at least this many other items remain
    pub min_remaining: usize,
    /// Lowest reinsertion index
    pub min_position: usize,
    /// Highest reinsertion index, `None` for the end of the queue
    pub max_position: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReinsertPolicy {
    pub tiers: Vec<ReinsertTier>,
}

impl Default for ReinsertPolicy {
    fn default() -> Self {
        Self::learn()
    }
}

impl ReinsertPolicy {
    /// Learn/typing policy: at least two other items before the retry
    pub fn learn() -> Self {
        Self {
            tiers: vec![ReinsertTier {
                min_remaining: 2,
                min_position: 2,
                max_position: None,
            }],
        }
    }

    /// Flashcard swipe policy: 5 to 10 cards later, or at the end of short queues
    pub fn swipe() -> Self {
        Self {
            tiers: vec![
                ReinsertTier {
                    min_remaining: 10,
                    min_position: 5,
                    max_position: Some(10),
                },
                ReinsertTier {
                    min_remaining: 5,
                    min_position: 5,
                    max_position: None,
                },
            ],
        }
    }

    /// Always append missed items to the end
    pub fn append() -> Self {
        Self { tiers: Vec::new() }
    }

    /// Inclusive window of reinsertion indices for `remaining` other items
    pub fn window(&self, remaining: usize) -> RangeInclusive<usize> {
        let tier = self
            .tiers
            .iter()
            .filter(|t| remaining >= t.min_remaining)
            .max_by_key(|t| t.min_remaining);

        match tier {
            Some(t) => {
                let hi = t.max_position.unwrap_or(remaining).min(remaining);
                let lo = t.min_position.min(hi);
                lo..=hi
            }
            None => remaining..=remaining,
        }
    }

    /// Minimum distance from the front the policy guarantees
    pub fn min_position(&self, remaining: usize) -> usize {
        *self.window(remaining).start()
    }

    /// Draw a reinsertion index uniformly from the window
    pub fn reinsert_position<R: Rng + ?Sized>(&self, remaining: usize, rng: &mut R) -> usize {
        let window = self.window(remaining);
        if window.start() == window.end() {
            return *window.start();
        }
        rng.gen_range(window)
    }
}

//! Linear run over a fixed list
//!
//! Typing and flashcard "stay on the card" flows walk the list index by
//! index without reordering. Multiple choice advances on every answer.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{prepare_items, seeded_rng, QueueOptions};
use crate::error::{AlgoError, Result};
use crate::types::{score_percentage, ItemId, Outcome, PracticeItem, SessionSummary};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RetryRule {
    /// A wrong answer keeps the same item until it is answered correctly
    #[default]
    RetryUntilCorrect,
    /// Every answer moves on
    AdvanceAlways,
}

pub struct PassThroughRun<R = ChaCha8Rng> {
    items: Vec<PracticeItem>,
    index: usize,
    correct_count: u32,
    incorrect_count: u32,
    mistakes: Vec<ItemId>,
    rule: RetryRule,
    shuffle: bool,
    rng: R,
}

impl PassThroughRun<ChaCha8Rng> {
    pub fn build(items: &[PracticeItem], options: &QueueOptions, rule: RetryRule) -> Result<Self> {
        Self::with_rng(items, options, rule, seeded_rng(options.seed))
    }
}

impl<R: Rng> PassThroughRun<R> {
    pub fn with_rng(
        items: &[PracticeItem],
        options: &QueueOptions,
        rule: RetryRule,
        mut rng: R,
    ) -> Result<Self> {
        let mut items = prepare_items(items, options)?;
        if options.shuffle {
            items.shuffle(&mut rng);
        }
        info!(items = items.len(), ?rule, "pass-through run built");

        Ok(Self {
            items,
            index: 0,
            correct_count: 0,
            incorrect_count: 0,
            mistakes: Vec::new(),
            rule,
            shuffle: options.shuffle,
            rng,
        })
    }

    pub fn current(&self) -> Option<&PracticeItem> {
        self.items.get(self.index)
    }

    /// Record an answer for the current item. Returns whether the run moved on.
    pub fn submit(&mut self, outcome: Outcome) -> Result<bool> {
        let Some(item) = self.items.get(self.index) else {
            warn!("answer submitted after the run finished");
            return Err(AlgoError::EmptyQueue);
        };

        let advance = match outcome {
            Outcome::Correct => {
                self.correct_count += 1;
                true
            }
            Outcome::Incorrect => {
                self.incorrect_count += 1;
                self.mistakes.push(item.id);
                self.rule == RetryRule::AdvanceAlways
            }
        };
        debug!(item_id = item.id, ?outcome, advance, "pass-through answer");

        if advance {
            self.index += 1;
            if self.is_finished() {
                info!(
                    correct = self.correct_count,
                    incorrect = self.incorrect_count,
                    "pass-through run finished"
                );
            }
        }
        Ok(advance)
    }

    pub fn restart(&mut self) {
        self.index = 0;
        self.correct_count = 0;
        self.incorrect_count = 0;
        self.mistakes.clear();
        if self.shuffle {
            self.items.shuffle(&mut self.rng);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.items.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[PracticeItem] {
        &self.items
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    /// Ids answered wrongly, one entry per mistake
    pub fn mistakes(&self) -> &[ItemId] {
        &self.mistakes
    }

    pub fn progress(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.index.min(self.items.len()) as f64 / self.items.len() as f64 * 100.0
    }

    pub fn summary(&self, duration_seconds: u64) -> SessionSummary {
        SessionSummary {
            score: score_percentage(self.correct_count, self.incorrect_count),
            total_items: self.items.len() as u32,
            mistakes_count: self.incorrect_count,
            duration_seconds,
        }
    }
}

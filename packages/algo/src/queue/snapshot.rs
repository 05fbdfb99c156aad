//! Session Snapshots
//!
//! An unfinished queue can be stored and picked up later. A snapshot is
//! bound to the mode and set it was taken in and only resumes over a word
//! list that still contains every stored item.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{AlgoError, Result};
use crate::types::{ItemId, PracticeItem, StudyMode};

/// Stored progress of an unfinished session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSnapshot {
    pub mode: StudyMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_id: Option<u64>,
    pub active_words: Vec<PracticeItem>,
    pub mastered_words: Vec<PracticeItem>,
    /// One id per wrong answer so far
    #[serde(default)]
    pub mistake_words: Vec<ItemId>,
    pub correct_count: u32,
    pub incorrect_count: u32,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl QueueSnapshot {
    /// Check that the snapshot fits a session of `mode` over `set_id`
    /// whose prepared items are `source`.
    pub fn check(
        &self,
        mode: StudyMode,
        set_id: Option<u64>,
        source: &[PracticeItem],
    ) -> Result<()> {
        if self.mode != mode {
            return Err(AlgoError::SnapshotMismatch {
                expected: mode,
                found: self.mode,
            });
        }
        if self.set_id != set_id {
            return Err(AlgoError::SnapshotSetMismatch {
                expected: set_id,
                found: self.set_id,
            });
        }

        let known: HashSet<&PracticeItem> = source.iter().collect();
        match self
            .active_words
            .iter()
            .chain(&self.mastered_words)
            .find(|item| !known.contains(item))
        {
            Some(item) => Err(AlgoError::SnapshotForeignItem(item.id)),
            None => Ok(()),
        }
    }
}

/// Newest snapshot that still has items to practice, e.g. local vs. synced copy
pub fn latest_snapshot<I>(candidates: I) -> Option<QueueSnapshot>
where
    I: IntoIterator<Item = Option<QueueSnapshot>>,
{
    candidates
        .into_iter()
        .flatten()
        .filter(|s| !s.active_words.is_empty())
        .max_by_key(|s| s.timestamp)
}

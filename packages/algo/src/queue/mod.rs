//! Adaptive Practice Queue
//!
//! Session-scoped working set of practice items shared by the flashcard,
//! typing and learn modes.
//!
//! Core rules:
//! - A correct answer removes the front item for the rest of the session
//! - A wrong answer moves the front item back into the queue at a position
//!   drawn from the active [`ReinsertPolicy`], so other items are seen first
//! - The last [`HISTORY_LIMIT`] answers can be undone
//!
//! Every queue slot carries a sequence number. Undo locates slots by that
//! number, so duplicate ids (for example the two orientations produced by
//! [`Direction::Both`]) never make undo touch the wrong entry.

mod pass_through;
mod policy;
mod snapshot;

pub use pass_through::{PassThroughRun, RetryRule};
pub use policy::{ReinsertPolicy, ReinsertTier};
pub use snapshot::{latest_snapshot, QueueSnapshot};

use std::collections::{HashSet, VecDeque};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::answer;
use crate::error::{AlgoError, Result};
use crate::types::{
    score_percentage, Direction, ItemId, Outcome, PracticeItem, SessionSummary, StudyMode,
    HISTORY_LIMIT,
};

// ==================== Options ====================

/// What to do with repeated ids in the input list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep every entry; undo stays exact through slot sequence numbers
    #[default]
    Allow,
    /// Keep the first entry of each id
    Dedup,
    /// Fail the build with [`AlgoError::DuplicateId`]
    Reject,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueueOptions {
    pub direction: Direction,
    pub shuffle: bool,
    /// Random seed for reproducibility (optional)
    pub seed: Option<u64>,
    pub policy: ReinsertPolicy,
    pub duplicates: DuplicatePolicy,
    /// Only keep these ids when set and non-empty
    pub selected_ids: Option<Vec<ItemId>>,
}

impl Default for QueueOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Forward,
            shuffle: true,
            seed: None,
            policy: ReinsertPolicy::learn(),
            duplicates: DuplicatePolicy::Allow,
            selected_ids: None,
        }
    }
}

/// Random generator from an optional seed, falling back to the system clock
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });
    ChaCha8Rng::seed_from_u64(seed)
}

/// Apply selection, duplicate handling and direction to a set's items.
/// Shuffling is left to the caller.
pub fn prepare_items(items: &[PracticeItem], options: &QueueOptions) -> Result<Vec<PracticeItem>> {
    let selected: Vec<PracticeItem> = match options.selected_ids.as_deref() {
        Some(ids) if !ids.is_empty() => {
            let allow: HashSet<ItemId> = ids.iter().copied().collect();
            items
                .iter()
                .filter(|item| allow.contains(&item.id))
                .cloned()
                .collect()
        }
        _ => items.to_vec(),
    };

    let unique = match options.duplicates {
        DuplicatePolicy::Allow => selected,
        DuplicatePolicy::Dedup => {
            let mut seen = HashSet::new();
            selected
                .into_iter()
                .filter(|item| seen.insert(item.id))
                .collect()
        }
        DuplicatePolicy::Reject => {
            let mut seen = HashSet::new();
            if let Some(dup) = selected.iter().find(|item| !seen.insert(item.id)) {
                return Err(AlgoError::DuplicateId(dup.id));
            }
            selected
        }
    };

    Ok(options.direction.apply(&unique))
}

// ==================== Queue ====================

/// A queue entry with its per-queue sequence number
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub seq: u64,
    pub item: PracticeItem,
}

#[derive(Clone, Copy, Debug)]
struct HistoryEntry {
    outcome: Outcome,
    seq: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Active,
    Finished,
}

pub struct AdaptiveQueue<R = ChaCha8Rng> {
    /// Oriented and filtered items, used again on restart
    source: Vec<PracticeItem>,
    active: VecDeque<Slot>,
    mastered: Vec<Slot>,
    /// One id per wrong answer, in answer order
    mistakes: Vec<ItemId>,
    history: VecDeque<HistoryEntry>,
    correct_count: u32,
    incorrect_count: u32,
    initial_count: usize,
    next_seq: u64,
    shuffle: bool,
    policy: ReinsertPolicy,
    rng: R,
}

impl AdaptiveQueue<ChaCha8Rng> {
    /// Build a queue using a ChaCha generator seeded from `options.seed`
    pub fn build(items: &[PracticeItem], options: QueueOptions) -> Result<Self> {
        let rng = seeded_rng(options.seed);
        Self::with_rng(items, options, rng)
    }

    /// Resume a session from a stored snapshot of the same mode and set
    pub fn resume(
        items: &[PracticeItem],
        options: QueueOptions,
        snapshot: QueueSnapshot,
        mode: StudyMode,
        set_id: Option<u64>,
    ) -> Result<Self> {
        let rng = seeded_rng(options.seed);
        Self::resume_with_rng(items, options, snapshot, mode, set_id, rng)
    }
}

impl<R: Rng> AdaptiveQueue<R> {
    /// Build a queue drawing all randomness from `rng`
    pub fn with_rng(items: &[PracticeItem], options: QueueOptions, rng: R) -> Result<Self> {
        let source = prepare_items(items, &options)?;
        let mut queue = Self {
            source,
            active: VecDeque::new(),
            mastered: Vec::new(),
            mistakes: Vec::new(),
            history: VecDeque::with_capacity(HISTORY_LIMIT),
            correct_count: 0,
            incorrect_count: 0,
            initial_count: 0,
            next_seq: 0,
            shuffle: options.shuffle,
            policy: options.policy,
            rng,
        };
        queue.fill();

        info!(
            items = queue.initial_count,
            shuffle = queue.shuffle,
            "practice queue built"
        );
        Ok(queue)
    }

    pub fn resume_with_rng(
        items: &[PracticeItem],
        options: QueueOptions,
        snapshot: QueueSnapshot,
        mode: StudyMode,
        set_id: Option<u64>,
        rng: R,
    ) -> Result<Self> {
        let mut queue = Self::with_rng(items, options, rng)?;
        if let Err(err) = snapshot.check(mode, set_id, &queue.source) {
            warn!(error = %err, "snapshot does not fit this session");
            return Err(err);
        }

        queue.active = snapshot
            .active_words
            .into_iter()
            .map(|item| queue.next_slot(item))
            .collect();
        queue.mastered = snapshot
            .mastered_words
            .into_iter()
            .map(|item| queue.next_slot(item))
            .collect();
        queue.initial_count = queue.active.len() + queue.mastered.len();
        queue.mistakes = snapshot.mistake_words;
        queue.correct_count = snapshot.correct_count;
        queue.incorrect_count = snapshot.incorrect_count;

        info!(
            active = queue.active.len(),
            mastered = queue.mastered.len(),
            "practice queue resumed"
        );
        Ok(queue)
    }

    fn next_slot(&mut self, item: PracticeItem) -> Slot {
        let seq = self.next_seq;
        self.next_seq += 1;
        Slot { seq, item }
    }

    fn fill(&mut self) {
        let mut items = self.source.clone();
        if self.shuffle {
            items.shuffle(&mut self.rng);
        }
        let slots: VecDeque<Slot> = items.into_iter().map(|item| self.next_slot(item)).collect();
        self.active = slots;
        self.initial_count = self.active.len();
    }

    fn record(&mut self, outcome: Outcome, seq: u64) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(HistoryEntry { outcome, seq });
    }

    // ==================== Answers ====================

    /// Master the front item. Returns the number of items left.
    pub fn submit_correct(&mut self) -> Result<usize> {
        let Some(slot) = self.active.pop_front() else {
            warn!("correct answer submitted on an empty queue");
            return Err(AlgoError::EmptyQueue);
        };

        debug!(item_id = slot.item.id, remaining = self.active.len(), "item mastered");
        self.record(Outcome::Correct, slot.seq);
        self.mastered.push(slot);
        self.correct_count += 1;

        if self.active.is_empty() {
            info!(
                correct = self.correct_count,
                incorrect = self.incorrect_count,
                "practice session finished"
            );
        }
        Ok(self.active.len())
    }

    /// Move the front item back into the queue. Returns its new index.
    pub fn submit_incorrect(&mut self) -> Result<usize> {
        let Some(slot) = self.active.pop_front() else {
            warn!("incorrect answer submitted on an empty queue");
            return Err(AlgoError::EmptyQueue);
        };

        let remaining = self.active.len();
        let insert_pos = self.policy.reinsert_position(remaining, &mut self.rng);
        debug!(item_id = slot.item.id, remaining, insert_pos, "item requeued");

        self.record(Outcome::Incorrect, slot.seq);
        self.mistakes.push(slot.item.id);
        self.active.insert(insert_pos, slot);
        self.incorrect_count += 1;
        Ok(insert_pos)
    }

    pub fn submit(&mut self, outcome: Outcome) -> Result<usize> {
        match outcome {
            Outcome::Correct => self.submit_correct(),
            Outcome::Incorrect => self.submit_incorrect(),
        }
    }

    /// Revert the most recent answer. Returns `None` when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> Option<Outcome> {
        let entry = self.history.pop_back()?;

        match entry.outcome {
            Outcome::Correct => {
                self.correct_count = self.correct_count.saturating_sub(1);
                match self.mastered.iter().rposition(|s| s.seq == entry.seq) {
                    Some(idx) => {
                        let slot = self.mastered.remove(idx);
                        self.active.push_front(slot);
                    }
                    None => warn!(seq = entry.seq, "undo: mastered slot not found"),
                }
            }
            Outcome::Incorrect => {
                self.incorrect_count = self.incorrect_count.saturating_sub(1);
                self.mistakes.pop();
                let slot = self
                    .active
                    .iter()
                    .position(|s| s.seq == entry.seq)
                    .and_then(|idx| self.active.remove(idx));
                match slot {
                    Some(slot) => self.active.push_front(slot),
                    None => warn!(seq = entry.seq, "undo: requeued slot not found"),
                }
            }
        }

        debug!(outcome = ?entry.outcome, remaining = self.active.len(), "answer undone");
        Some(entry.outcome)
    }

    /// Start over with the full item list, reshuffled when shuffling is on
    pub fn restart(&mut self) {
        self.mastered.clear();
        self.mistakes.clear();
        self.history.clear();
        self.correct_count = 0;
        self.incorrect_count = 0;
        self.fill();
        info!(items = self.initial_count, "practice queue restarted");
    }

    // ==================== Accessors ====================

    pub fn current(&self) -> Option<&PracticeItem> {
        self.active.front().map(|slot| &slot.item)
    }

    /// Hint for the current item's answer
    pub fn hint(&self) -> Option<String> {
        self.current().map(|item| answer::hint(&item.answer))
    }

    pub fn items(&self) -> impl Iterator<Item = &PracticeItem> {
        self.active.iter().map(|slot| &slot.item)
    }

    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.active.iter()
    }

    pub fn mastered(&self) -> impl Iterator<Item = &PracticeItem> {
        self.mastered.iter().map(|slot| &slot.item)
    }

    /// Ids answered wrongly, one entry per mistake
    pub fn mistakes(&self) -> &[ItemId] {
        &self.mistakes
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.active.is_empty() {
            SessionPhase::Finished
        } else {
            SessionPhase::Active
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == SessionPhase::Finished
    }

    pub fn initial_count(&self) -> usize {
        self.initial_count
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn policy(&self) -> &ReinsertPolicy {
        &self.policy
    }

    /// Mastered share of the initial queue, in percent
    pub fn progress(&self) -> f64 {
        if self.initial_count == 0 {
            return 0.0;
        }
        self.mastered.len() as f64 / self.initial_count as f64 * 100.0
    }

    /// Summary record for persistence
    pub fn summary(&self, duration_seconds: u64) -> SessionSummary {
        SessionSummary {
            score: score_percentage(self.correct_count, self.incorrect_count),
            total_items: self.initial_count as u32,
            mistakes_count: self.incorrect_count,
            duration_seconds,
        }
    }

    /// Serializable progress for resuming later
    pub fn snapshot(&self, mode: StudyMode, set_id: Option<u64>, timestamp: i64) -> QueueSnapshot {
        QueueSnapshot {
            mode,
            set_id,
            active_words: self.items().cloned().collect(),
            mastered_words: self.mastered().cloned().collect(),
            mistake_words: self.mistakes.clone(),
            correct_count: self.correct_count,
            incorrect_count: self.incorrect_count,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn words(n: u64) -> Vec<PracticeItem> {
        (1..=n)
            .map(|id| PracticeItem::new(id, format!("woord{id}"), format!("mot{id}")))
            .collect()
    }

    fn ordered() -> QueueOptions {
        QueueOptions {
            shuffle: false,
            ..QueueOptions::default()
        }
    }

    fn ids<R: Rng>(queue: &AdaptiveQueue<R>) -> Vec<ItemId> {
        queue.items().map(|item| item.id).collect()
    }

    #[test]
    fn test_build_keeps_order_without_shuffle() {
        let queue = AdaptiveQueue::build(&words(4), ordered()).unwrap();
        assert_eq!(ids(&queue), vec![1, 2, 3, 4]);
        assert_eq!(queue.initial_count(), 4);
        assert_eq!(queue.phase(), SessionPhase::Active);
    }

    #[test]
    fn test_build_both_directions() {
        let options = QueueOptions {
            direction: Direction::Both,
            ..ordered()
        };
        let queue = AdaptiveQueue::build(&words(3), options).unwrap();
        assert_eq!(queue.len(), 6);
        assert_eq!(queue.initial_count(), 6);
        let last: Vec<&PracticeItem> = queue.items().skip(3).collect();
        assert_eq!(last[0].prompt, "mot1");
    }

    #[test]
    fn test_same_seed_same_shuffle() {
        let options = QueueOptions {
            seed: Some(42),
            ..QueueOptions::default()
        };
        let a = AdaptiveQueue::build(&words(20), options.clone()).unwrap();
        let b = AdaptiveQueue::build(&words(20), options).unwrap();
        assert_eq!(ids(&a), ids(&b));

        let mut sorted = ids(&a);
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input_is_finished() {
        let mut queue = AdaptiveQueue::build(&[], ordered()).unwrap();
        assert!(queue.is_finished());
        assert_eq!(queue.progress(), 0.0);
        assert_eq!(queue.submit_correct(), Err(AlgoError::EmptyQueue));
        assert_eq!(queue.submit_incorrect(), Err(AlgoError::EmptyQueue));
        assert_eq!(queue.correct_count(), 0);
        assert_eq!(queue.incorrect_count(), 0);
    }

    #[test]
    fn test_correct_removes_front() {
        let mut queue = AdaptiveQueue::build(&words(3), ordered()).unwrap();
        assert_eq!(queue.submit_correct().unwrap(), 2);
        assert_eq!(ids(&queue), vec![2, 3]);
        assert_eq!(queue.correct_count(), 1);
        assert_eq!(queue.mastered().count(), 1);
        assert!((queue.progress() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_correct_finishes_in_initial_count_steps() {
        let mut queue = AdaptiveQueue::build(&words(5), QueueOptions::default()).unwrap();
        let mut steps = 0;
        while !queue.is_finished() {
            queue.submit_correct().unwrap();
            steps += 1;
        }
        assert_eq!(steps, queue.initial_count());
        assert_eq!(queue.progress(), 100.0);
    }

    #[test]
    fn test_incorrect_lowest_position_with_zero_rng() {
        let mut queue =
            AdaptiveQueue::with_rng(&words(6), ordered(), StepRng::new(0, 0)).unwrap();
        assert_eq!(queue.submit_incorrect().unwrap(), 2);
        assert_eq!(ids(&queue), vec![2, 3, 1, 4, 5, 6]);
        assert_eq!(queue.incorrect_count(), 1);
    }

    #[test]
    fn test_incorrect_with_one_other_item_goes_last() {
        let mut queue = AdaptiveQueue::build(&words(2), ordered()).unwrap();
        assert_eq!(queue.submit_incorrect().unwrap(), 1);
        assert_eq!(ids(&queue), vec![2, 1]);
    }

    #[test]
    fn test_incorrect_single_item_stays() {
        let mut queue = AdaptiveQueue::build(&words(1), ordered()).unwrap();
        assert_eq!(queue.submit_incorrect().unwrap(), 0);
        assert_eq!(ids(&queue), vec![1]);
    }

    #[test]
    fn test_swipe_policy_delays_further() {
        let options = QueueOptions {
            policy: ReinsertPolicy::swipe(),
            ..ordered()
        };
        let mut queue = AdaptiveQueue::with_rng(&words(12), options, StepRng::new(0, 0)).unwrap();
        assert_eq!(queue.submit_incorrect().unwrap(), 5);
        assert_eq!(queue.items().nth(5).map(|i| i.id), Some(1));
    }

    #[test]
    fn test_undo_correct_restores_front() {
        let mut queue = AdaptiveQueue::build(&words(4), ordered()).unwrap();
        queue.submit_correct().unwrap();
        assert_eq!(queue.undo(), Some(Outcome::Correct));
        assert_eq!(ids(&queue), vec![1, 2, 3, 4]);
        assert_eq!(queue.correct_count(), 0);
        assert_eq!(queue.mastered().count(), 0);
    }

    #[test]
    fn test_undo_incorrect_restores_order() {
        let mut queue = AdaptiveQueue::build(&words(8), QueueOptions {
            seed: Some(3),
            ..ordered()
        })
        .unwrap();
        queue.submit_incorrect().unwrap();
        assert_eq!(queue.undo(), Some(Outcome::Incorrect));
        assert_eq!(ids(&queue), (1..=8).collect::<Vec<_>>());
        assert_eq!(queue.incorrect_count(), 0);
    }

    #[test]
    fn test_undo_reopens_finished_session() {
        let mut queue = AdaptiveQueue::build(&words(1), ordered()).unwrap();
        queue.submit_correct().unwrap();
        assert!(queue.is_finished());
        queue.undo();
        assert_eq!(queue.phase(), SessionPhase::Active);
        assert_eq!(queue.current().map(|i| i.id), Some(1));
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut queue = AdaptiveQueue::build(&words(2), ordered()).unwrap();
        assert_eq!(queue.undo(), None);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut queue = AdaptiveQueue::build(&words(3), ordered()).unwrap();
        for _ in 0..15 {
            queue.submit_incorrect().unwrap();
        }
        let mut undone = 0;
        while queue.undo().is_some() {
            undone += 1;
        }
        assert_eq!(undone, HISTORY_LIMIT);
        assert_eq!(queue.incorrect_count(), 5);
    }

    #[test]
    fn test_undo_with_duplicate_ids_removes_requeued_slot() {
        let options = QueueOptions {
            direction: Direction::Both,
            ..ordered()
        };
        let mut queue = AdaptiveQueue::with_rng(&words(3), options, StepRng::new(0, 0)).unwrap();
        // [1, 2, 3, 1r, 2r, 3r] -> forward 1 lands at index 2, before its reverse twin
        queue.submit_incorrect().unwrap();
        queue.undo();
        let front = queue.current().unwrap();
        assert_eq!(front.id, 1);
        assert_eq!(front.prompt, "woord1");
        let reverse_one = queue.items().nth(3).unwrap();
        assert_eq!(reverse_one.id, 1);
        assert_eq!(reverse_one.prompt, "mot1");
        assert_eq!(queue.len(), 6);
    }

    #[test]
    fn test_restart_resets_counters() {
        let mut queue = AdaptiveQueue::build(&words(3), ordered()).unwrap();
        queue.submit_correct().unwrap();
        queue.submit_incorrect().unwrap();
        queue.restart();
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.correct_count(), 0);
        assert_eq!(queue.incorrect_count(), 0);
        assert!(!queue.can_undo());
        assert_eq!(ids(&queue), vec![1, 2, 3]);
    }

    #[test]
    fn test_selection_filter() {
        let options = QueueOptions {
            selected_ids: Some(vec![2, 4]),
            ..ordered()
        };
        let queue = AdaptiveQueue::build(&words(5), options).unwrap();
        assert_eq!(ids(&queue), vec![2, 4]);
    }

    #[test]
    fn test_duplicate_policies() {
        let mut items = words(3);
        items.push(PracticeItem::new(2, "dubbel", "double"));

        let dedup = QueueOptions {
            duplicates: DuplicatePolicy::Dedup,
            ..ordered()
        };
        let queue = AdaptiveQueue::build(&items, dedup).unwrap();
        assert_eq!(ids(&queue), vec![1, 2, 3]);

        let reject = QueueOptions {
            duplicates: DuplicatePolicy::Reject,
            ..ordered()
        };
        assert!(matches!(
            AdaptiveQueue::build(&items, reject),
            Err(AlgoError::DuplicateId(2))
        ));
    }

    #[test]
    fn test_summary_and_hint() {
        let mut queue = AdaptiveQueue::build(&words(2), ordered()).unwrap();
        assert_eq!(queue.hint().as_deref(), Some("mo..."));
        queue.submit_incorrect().unwrap();
        queue.submit_correct().unwrap();
        queue.submit_correct().unwrap();
        let summary = queue.summary(95);
        assert_eq!(summary.score, 67);
        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.mistakes_count, 1);
        assert_eq!(summary.duration_seconds, 95);
    }

    #[test]
    fn test_snapshot_resume() {
        let mut queue = AdaptiveQueue::build(&words(4), ordered()).unwrap();
        queue.submit_correct().unwrap();
        queue.submit_incorrect().unwrap();
        let snapshot = queue.snapshot(StudyMode::Learn, Some(9), 1_000);

        let resumed = AdaptiveQueue::resume(
            &words(4),
            ordered(),
            snapshot.clone(),
            StudyMode::Learn,
            Some(9),
        )
        .unwrap();
        assert_eq!(ids(&resumed), ids(&queue));
        assert_eq!(resumed.correct_count(), 1);
        assert_eq!(resumed.incorrect_count(), 1);
        assert_eq!(resumed.initial_count(), 4);
        assert_eq!(resumed.progress(), 25.0);
        assert_eq!(resumed.mistakes(), &[2]);

        let err = AdaptiveQueue::resume(
            &words(4),
            ordered(),
            snapshot.clone(),
            StudyMode::Typing,
            Some(9),
        );
        assert!(matches!(err, Err(AlgoError::SnapshotMismatch { .. })));

        let err = AdaptiveQueue::resume(&words(4), ordered(), snapshot, StudyMode::Learn, None);
        assert!(matches!(err, Err(AlgoError::SnapshotSetMismatch { .. })));
    }

    #[test]
    fn test_resume_over_another_word_list_fails() {
        let first = vec![
            PracticeItem::new(1, "huis", "maison"),
            PracticeItem::new(2, "kat", "chat"),
        ];
        let second = vec![
            PracticeItem::new(1, "rood", "rouge"),
            PracticeItem::new(2, "groen", "vert"),
            PracticeItem::new(3, "blauw", "bleu"),
        ];
        let mut queue = AdaptiveQueue::build(&first, ordered()).unwrap();
        queue.submit_incorrect().unwrap();
        let snapshot = queue.snapshot(StudyMode::Learn, None, 1_000);

        let err =
            AdaptiveQueue::resume(&second, ordered(), snapshot.clone(), StudyMode::Learn, None);
        assert!(matches!(err, Err(AlgoError::SnapshotForeignItem(_))));

        // Reversed direction prepares different items from the same list
        let reversed = QueueOptions {
            direction: Direction::Reverse,
            ..ordered()
        };
        let err = AdaptiveQueue::resume(&first, reversed, snapshot, StudyMode::Learn, None);
        assert!(matches!(err, Err(AlgoError::SnapshotForeignItem(_))));
    }

    #[test]
    fn test_mistakes_follow_answers_and_undo() {
        let mut queue =
            AdaptiveQueue::with_rng(&words(4), ordered(), StepRng::new(0, 0)).unwrap();
        queue.submit_incorrect().unwrap();
        queue.submit_incorrect().unwrap();
        assert_eq!(queue.mistakes(), &[1, 2]);
        queue.undo();
        assert_eq!(queue.mistakes(), &[1]);
        queue.restart();
        assert!(queue.mistakes().is_empty());
    }
}

//! Word Progress
//!
//! Per-word counters kept across sessions, the most missed words of a set
//! and the wrong answers that feed multiple-choice distractors.

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ItemId, PracticeItem};

/// Missed words shown per set
pub const MOST_MISSED_LIMIT: usize = 5;

/// A wrong answer is "common" from this share of the times a word was shown
pub const COMMON_MISTAKE_MIN_PERCENT: f64 = 20.0;

/// Times a word must have been shown before its wrong answers count
pub const COMMON_MISTAKE_MIN_SHOWN: u32 = 3;

/// Wrong answers offered as distractors at most
pub const COMMON_MISTAKE_LIMIT: usize = 5;

/// Per-word answer counters kept across sessions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordProgress {
    pub word_id: ItemId,
    pub correct_count: u32,
    pub mistake_count: u32,
    pub last_studied: Option<DateTime<Utc>>,
}

/// Add one session's answers to stored progress.
///
/// Every occurrence of an id in `correct_ids` / `mistake_ids` counts once.
/// Only words touched by the session are returned, in order of first
/// appearance, with `last_studied` set to `now`.
pub fn merge_word_progress(
    existing: &[WordProgress],
    correct_ids: &[ItemId],
    mistake_ids: &[ItemId],
    now: DateTime<Utc>,
) -> Vec<WordProgress> {
    let stored: HashMap<ItemId, &WordProgress> =
        existing.iter().map(|p| (p.word_id, p)).collect();

    let mut order: Vec<ItemId> = Vec::new();
    let mut deltas: HashMap<ItemId, (u32, u32)> = HashMap::new();
    for &id in correct_ids {
        let entry = deltas.entry(id).or_insert_with(|| {
            order.push(id);
            (0, 0)
        });
        entry.0 += 1;
    }
    for &id in mistake_ids {
        let entry = deltas.entry(id).or_insert_with(|| {
            order.push(id);
            (0, 0)
        });
        entry.1 += 1;
    }

    order
        .into_iter()
        .map(|id| {
            let (correct, mistakes) = deltas[&id];
            let (base_correct, base_mistakes) = stored
                .get(&id)
                .map(|p| (p.correct_count, p.mistake_count))
                .unwrap_or((0, 0));
            WordProgress {
                word_id: id,
                correct_count: base_correct + correct,
                mistake_count: base_mistakes + mistakes,
                last_studied: Some(now),
            }
        })
        .collect()
}

impl WordProgress {
    pub fn attempts(&self) -> u32 {
        self.correct_count + self.mistake_count
    }
}

/// Words with at least one mistake, most mistakes first. Ties go to the
/// word with fewer attempts, then the lower id.
pub fn most_missed_words(progress: &[WordProgress], limit: usize) -> Vec<&WordProgress> {
    let mut missed: Vec<&WordProgress> = progress.iter().filter(|p| p.mistake_count > 0).collect();
    missed.sort_by_key(|p| (Reverse(p.mistake_count), p.attempts(), p.word_id));
    missed.truncate(limit);
    missed
}

// ==================== Wrong Answers ====================

/// How often a specific wrong answer was given for a word
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrongAnswer {
    pub word_id: ItemId,
    /// The answer that was expected, so both directions stay apart
    pub expected: String,
    pub given: String,
    pub count: u32,
}

/// Count one wrong answer. Blank answers are not recorded.
pub fn record_wrong_answer(log: &mut Vec<WrongAnswer>, item: &PracticeItem, given: &str) {
    let given = given.trim();
    if given.is_empty() {
        return;
    }
    match log
        .iter_mut()
        .find(|w| w.word_id == item.id && w.expected == item.answer && w.given == given)
    {
        Some(entry) => entry.count += 1,
        None => log.push(WrongAnswer {
            word_id: item.id,
            expected: item.answer.clone(),
            given: given.to_string(),
            count: 1,
        }),
    }
}

/// Frequent wrong answers for `item`, most frequent first.
///
/// `times_shown` is how often the word was asked. Nothing is returned until
/// it was shown [`COMMON_MISTAKE_MIN_SHOWN`] times; after that a wrong
/// answer needs a share of at least [`COMMON_MISTAKE_MIN_PERCENT`].
pub fn common_mistakes(log: &[WrongAnswer], item: &PracticeItem, times_shown: u32) -> Vec<String> {
    if times_shown < COMMON_MISTAKE_MIN_SHOWN {
        return Vec::new();
    }

    let mut frequent: Vec<&WrongAnswer> = log
        .iter()
        .filter(|w| w.word_id == item.id && w.expected == item.answer)
        .filter(|w| w.count as f64 / times_shown as f64 * 100.0 >= COMMON_MISTAKE_MIN_PERCENT)
        .collect();
    frequent.sort_by_key(|w| Reverse(w.count));
    frequent
        .into_iter()
        .take(COMMON_MISTAKE_LIMIT)
        .map(|w| w.given.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn progress(word_id: ItemId, correct_count: u32, mistake_count: u32) -> WordProgress {
        WordProgress {
            word_id,
            correct_count,
            mistake_count,
            last_studied: None,
        }
    }

    #[test]
    fn test_most_missed_ranking() {
        let all = vec![
            progress(1, 9, 1),
            progress(2, 0, 4),
            progress(3, 5, 0),
            progress(4, 1, 4),
            progress(5, 2, 2),
        ];
        let ids: Vec<ItemId> = most_missed_words(&all, MOST_MISSED_LIMIT)
            .iter()
            .map(|p| p.word_id)
            .collect();
        assert_eq!(ids, vec![2, 4, 5, 1]);

        assert_eq!(most_missed_words(&all, 2).len(), 2);
        assert!(most_missed_words(&[progress(1, 3, 0)], 5).is_empty());
    }

    #[test]
    fn test_common_mistakes_need_enough_data() {
        let item = PracticeItem::new(1, "hond", "chien");
        let mut log = Vec::new();
        record_wrong_answer(&mut log, &item, "chat");
        record_wrong_answer(&mut log, &item, " chat ");
        record_wrong_answer(&mut log, &item, "cheval");
        record_wrong_answer(&mut log, &item, "   ");
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].count, 2);

        assert!(common_mistakes(&log, &item, 2).is_empty());
        // 2/6 = 33%, 1/6 = 17%
        assert_eq!(common_mistakes(&log, &item, 6), vec!["chat".to_string()]);
        assert_eq!(common_mistakes(&log, &item, 4), vec!["chat", "cheval"]);
    }

    #[test]
    fn test_common_mistakes_keep_directions_apart() {
        let forward = PracticeItem::new(1, "hond", "chien");
        let mut log = Vec::new();
        record_wrong_answer(&mut log, &forward.reversed(), "kat");
        assert!(common_mistakes(&log, &forward, 3).is_empty());
        assert_eq!(common_mistakes(&log, &forward.reversed(), 3), vec!["kat"]);
    }

    #[test]
    fn test_merge_adds_counts() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let existing = vec![WordProgress {
            word_id: 7,
            correct_count: 3,
            mistake_count: 1,
            last_studied: None,
        }];

        let merged = merge_word_progress(&existing, &[7, 8], &[8, 8, 9], now);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].word_id, 7);
        assert_eq!((merged[0].correct_count, merged[0].mistake_count), (4, 1));
        assert_eq!((merged[1].correct_count, merged[1].mistake_count), (1, 2));
        assert_eq!((merged[2].correct_count, merged[2].mistake_count), (0, 1));
        assert!(merged.iter().all(|p| p.last_studied == Some(now)));
    }

    #[test]
    fn test_untouched_words_are_not_returned() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let existing = vec![WordProgress {
            word_id: 1,
            correct_count: 1,
            mistake_count: 0,
            last_studied: None,
        }];
        assert!(merge_word_progress(&existing, &[], &[], now).is_empty());
    }
}

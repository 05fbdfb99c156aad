//! Study Settings
//!
//! User-facing session configuration as stored by the client. Every field
//! has a default so partial JSON documents deserialize.

use serde::{Deserialize, Serialize};

use crate::queue::{DuplicatePolicy, QueueOptions, ReinsertPolicy};
use crate::types::{Direction, ItemId, PracticeItem, StudyMode};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudySettings {
    pub mode: StudyMode,
    pub direction: Direction,
    pub shuffle: bool,
    pub case_sensitive: bool,
    pub accent_sensitive: bool,
    /// Only practice these word ids when set
    pub selected_word_ids: Option<Vec<ItemId>>,
    /// Exam: number of questions drawn from the pool
    pub question_count: Option<usize>,
    /// Exam: time limit in seconds
    pub time_limit_seconds: Option<u64>,
    /// Fixed seed for reproducible shuffles
    pub seed: Option<u64>,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            mode: StudyMode::Learn,
            direction: Direction::Forward,
            shuffle: true,
            case_sensitive: false,
            accent_sensitive: true,
            selected_word_ids: None,
            question_count: None,
            time_limit_seconds: None,
            seed: None,
        }
    }
}

impl StudySettings {
    /// Reinsertion policy matching the feel of the configured mode
    pub fn reinsert_policy(&self) -> ReinsertPolicy {
        match self.mode {
            StudyMode::Flashcard => ReinsertPolicy::swipe(),
            _ => ReinsertPolicy::learn(),
        }
    }

    pub fn queue_options(&self) -> QueueOptions {
        QueueOptions {
            direction: self.direction,
            shuffle: self.shuffle,
            seed: self.seed,
            policy: self.reinsert_policy(),
            duplicates: DuplicatePolicy::Allow,
            selected_ids: self.selected_word_ids.clone(),
        }
    }
}

/// Ids of the items at 1-based positions `start..=end` of the set order.
/// Out-of-range bounds are clamped; an inverted range selects nothing.
pub fn select_range(items: &[PracticeItem], start: usize, end: usize) -> Vec<ItemId> {
    let start = start.max(1);
    let end = end.min(items.len());
    if start > end {
        return Vec::new();
    }
    items[start - 1..end].iter().map(|item| item.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: StudySettings =
            serde_json::from_str(r#"{"mode":"flashcard","direction":"both"}"#).unwrap();
        assert_eq!(settings.mode, StudyMode::Flashcard);
        assert_eq!(settings.direction, Direction::Both);
        assert!(settings.shuffle);
        assert!(!settings.case_sensitive);
        assert!(settings.accent_sensitive);
    }

    #[test]
    fn test_policy_follows_mode() {
        let mut settings = StudySettings::default();
        assert_eq!(settings.reinsert_policy(), ReinsertPolicy::learn());
        settings.mode = StudyMode::Flashcard;
        assert_eq!(settings.queue_options().policy, ReinsertPolicy::swipe());
    }

    #[test]
    fn test_select_range() {
        let items: Vec<PracticeItem> = (10..15)
            .map(|id| PracticeItem::new(id, "a", "b"))
            .collect();
        assert_eq!(select_range(&items, 2, 4), vec![11, 12, 13]);
        assert_eq!(select_range(&items, 0, 99), vec![10, 11, 12, 13, 14]);
        assert!(select_range(&items, 4, 2).is_empty());
    }
}

//! Common Types and Constants
//!
//! Shared data structures used across all algorithm modules.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AlgoError;

// ==================== Constants ====================

/// Number of answer actions kept for undo
pub const HISTORY_LIMIT: usize = 10;

/// Share of the answer revealed by a hint
pub const HINT_RATIO: f64 = 0.3;

/// Mastery milestones (percent) used for forecasting
pub const MILESTONES: [u8; 4] = [50, 80, 90, 100];

/// Numerical stability epsilon
pub const EPSILON: f64 = 1e-10;

// ==================== Items ====================

/// Identifier of a word pair within a set
pub type ItemId = u64;

/// One quizzable prompt/answer pair
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PracticeItem {
    pub id: ItemId,
    pub prompt: String,
    pub answer: String,
}

impl PracticeItem {
    pub fn new(id: ItemId, prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    /// Same item with prompt and answer swapped
    pub fn reversed(&self) -> Self {
        Self {
            id: self.id,
            prompt: self.answer.clone(),
            answer: self.prompt.clone(),
        }
    }
}

/// Which side of a word pair is asked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
    Both,
}

impl FromStr for Direction {
    type Err = AlgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" => Ok(Direction::Forward),
            "reverse" => Ok(Direction::Reverse),
            "both" => Ok(Direction::Both),
            _ => Err(AlgoError::InvalidSetting {
                field: "direction",
                value: s.to_string(),
            }),
        }
    }
}

impl Direction {
    /// Orient a list of items. `Both` yields the forward list followed by
    /// the swapped copy.
    pub fn apply(self, items: &[PracticeItem]) -> Vec<PracticeItem> {
        match self {
            Direction::Forward => items.to_vec(),
            Direction::Reverse => items.iter().map(PracticeItem::reversed).collect(),
            Direction::Both => items
                .iter()
                .cloned()
                .chain(items.iter().map(PracticeItem::reversed))
                .collect(),
        }
    }
}

/// Practice mode of a session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StudyMode {
    Flashcard,
    Typing,
    #[default]
    Learn,
    MultipleChoice,
    Exam,
}

impl FromStr for StudyMode {
    type Err = AlgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flashcard" | "study" => Ok(StudyMode::Flashcard),
            "typing" => Ok(StudyMode::Typing),
            "learn" => Ok(StudyMode::Learn),
            "multiplechoice" | "multiple-choice" => Ok(StudyMode::MultipleChoice),
            "exam" | "test" => Ok(StudyMode::Exam),
            _ => Err(AlgoError::InvalidSetting {
                field: "mode",
                value: s.to_string(),
            }),
        }
    }
}

// ==================== Session Types ====================

/// Result of one answer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Session result handed to persistence after a session ends
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Percentage of correct answers (0-100)
    pub score: u8,
    pub total_items: u32,
    pub mistakes_count: u32,
    pub duration_seconds: u64,
}

/// Percentage of correct answers, rounded; zero when nothing was answered
pub fn score_percentage(correct: u32, incorrect: u32) -> u8 {
    let total = correct + incorrect;
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u8
}

// ==================== History Types ====================

/// One historical practice session of a set
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySample {
    pub timestamp: DateTime<Utc>,
    /// Score 0-100
    pub score: f64,
    pub duration_seconds: f64,
}

impl StudySample {
    pub fn new(timestamp: DateTime<Utc>, score: f64, duration_seconds: f64) -> Self {
        Self {
            timestamp,
            score,
            duration_seconds,
        }
    }
}

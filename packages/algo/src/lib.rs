//! # woordjes-algo - practice algorithms for vocabulary sets
//!
//! Pure Rust implementations of the study logic behind the trainer:
//!
//! - **Adaptive queue** - convergent practice queue with tiered reinsertion and undo
//! - **Pass-through run** - one pass over the items for typing and multiple choice
//! - **Mastery forecast** - log-linear regression over past sessions
//!
//! ## Modules
//!
//! - [`queue`] - adaptive queue, reinsertion policies, pass-through runs, snapshots
//! - [`forecast`] - milestone dates, learning velocity, retention index
//! - [`answer`] - answer normalization, similarity and hints
//! - [`choice`] - multiple choice questions
//! - [`exam`] - shuffled, optionally timed exams
//! - [`parse`] - quick-entry word list parsing
//! - [`progress`] - per-word counters, most missed words and common wrong answers
//! - [`stats`] - dashboard aggregates, heatmap and growth
//! - [`settings`] - study settings
//! - [`types`] - shared types and constants
//!
//! ## Example
//!
//! ```rust
//! use woordjes_algo::{AdaptiveQueue, PracticeItem, QueueOptions};
//!
//! let items = vec![
//!     PracticeItem::new(1, "huis", "maison"),
//!     PracticeItem::new(2, "kat", "chat"),
//! ];
//! let options = QueueOptions { seed: Some(42), ..QueueOptions::default() };
//! let mut queue = AdaptiveQueue::build(&items, options).unwrap();
//!
//! queue.submit_incorrect().unwrap();
//! queue.undo();
//! while !queue.is_finished() {
//!     queue.submit_correct().unwrap();
//! }
//! assert_eq!(queue.progress(), 100.0);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod answer;
pub mod choice;
pub mod error;
pub mod exam;
pub mod forecast;
pub mod parse;
pub mod progress;
pub mod queue;
pub mod settings;
pub mod stats;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use types::*;

pub use error::{AlgoError, Result};

pub use queue::{
    latest_snapshot, seeded_rng, AdaptiveQueue, DuplicatePolicy, PassThroughRun, QueueOptions,
    QueueSnapshot, ReinsertPolicy, ReinsertTier, RetryRule, SessionPhase, Slot,
};

pub use forecast::{
    predict_mastery, retention_index, MasteryForecast, MilestoneForecast, MilestoneStatus,
    NextMilestone,
};

pub use answer::{check_answer, hint, normalize, similarity};
pub use choice::{build_question, ChoiceQuestion};
pub use exam::{Exam, ExamReport, QuestionResult, TimeLimit};
pub use parse::{parse_items, parse_vocab_text};
pub use progress::{
    common_mistakes, merge_word_progress, most_missed_words, record_wrong_answer, WordProgress,
    WrongAnswer, MOST_MISSED_LIMIT,
};
pub use settings::{select_range, StudySettings};
pub use stats::{dashboard_stats, growth, heatmap, DashboardStats, SessionRecord};

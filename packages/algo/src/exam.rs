//! Timed Exam
//!
//! All questions are shown at once and graded together. The question list
//! is always shuffled and may be cut to a fixed number of questions.

use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::answer::check_answer;
use crate::error::{AlgoError, Result};
use crate::queue::{prepare_items, QueueOptions};
use crate::settings::StudySettings;
use crate::types::{score_percentage, PracticeItem, SessionSummary};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLimit {
    pub seconds: u64,
}

impl TimeLimit {
    pub fn remaining(&self, elapsed_seconds: u64) -> u64 {
        self.seconds.saturating_sub(elapsed_seconds)
    }

    pub fn expired(&self, elapsed_seconds: u64) -> bool {
        elapsed_seconds >= self.seconds
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub item: PracticeItem,
    pub given: String,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamReport {
    pub results: Vec<QuestionResult>,
    pub correct_count: u32,
    pub incorrect_count: u32,
    /// Graded because the time limit ran out
    pub timed_out: bool,
    pub summary: SessionSummary,
}

#[derive(Clone, Debug)]
pub struct Exam {
    questions: Vec<PracticeItem>,
    time_limit: Option<TimeLimit>,
    case_sensitive: bool,
    accent_sensitive: bool,
}

impl Exam {
    pub fn build<R: Rng + ?Sized>(
        items: &[PracticeItem],
        settings: &StudySettings,
        rng: &mut R,
    ) -> Result<Self> {
        if settings.question_count == Some(0) {
            return Err(AlgoError::InvalidExam(
                "question count must be at least 1".to_string(),
            ));
        }
        if settings.time_limit_seconds == Some(0) {
            return Err(AlgoError::InvalidExam(
                "time limit must be at least 1 second".to_string(),
            ));
        }

        // Exams always ask the forward direction
        let options = QueueOptions {
            selected_ids: settings.selected_word_ids.clone(),
            ..QueueOptions::default()
        };
        let mut questions = prepare_items(items, &options)?;
        questions.shuffle(rng);
        if let Some(count) = settings.question_count {
            questions.truncate(count);
        }

        info!(
            questions = questions.len(),
            time_limit = ?settings.time_limit_seconds,
            "exam built"
        );

        Ok(Self {
            questions,
            time_limit: settings.time_limit_seconds.map(|seconds| TimeLimit { seconds }),
            case_sensitive: settings.case_sensitive,
            accent_sensitive: settings.accent_sensitive,
        })
    }

    pub fn questions(&self) -> &[PracticeItem] {
        &self.questions
    }

    pub fn time_limit(&self) -> Option<TimeLimit> {
        self.time_limit
    }

    /// Grade the answers by question index; missing answers count as wrong
    pub fn grade<S: AsRef<str>>(&self, answers: &[S], duration_seconds: u64) -> ExamReport {
        let results: Vec<QuestionResult> = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let given = answers.get(i).map(|a| a.as_ref()).unwrap_or("");
                QuestionResult {
                    item: item.clone(),
                    given: given.to_string(),
                    correct: check_answer(
                        given,
                        &item.answer,
                        self.case_sensitive,
                        self.accent_sensitive,
                    ),
                }
            })
            .collect();

        let correct_count = results.iter().filter(|r| r.correct).count() as u32;
        let incorrect_count = results.len() as u32 - correct_count;
        let timed_out = self
            .time_limit
            .map(|limit| limit.expired(duration_seconds))
            .unwrap_or(false);

        info!(correct_count, incorrect_count, timed_out, "exam graded");

        ExamReport {
            correct_count,
            incorrect_count,
            timed_out,
            summary: SessionSummary {
                score: score_percentage(correct_count, incorrect_count),
                total_items: results.len() as u32,
                mistakes_count: incorrect_count,
                duration_seconds,
            },
            results,
        }
    }
}

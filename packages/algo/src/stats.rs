//! Dashboard Statistics
//!
//! Aggregates over the stored session history: totals, streaks, XP and
//! level, this week's activity, the yearly heatmap and cumulative growth.
//! Calendar days are UTC days.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{SessionSummary, StudySample};

// ==================== Constants ====================

/// XP per item studied
pub const XP_PER_ITEM: f64 = 2.0;

/// XP per minute of study
pub const XP_PER_MINUTE: f64 = 10.0;

/// Bonus XP for a session at or above `HIGH_SCORE`
pub const XP_HIGH_SCORE_BONUS: f64 = 50.0;

pub const HIGH_SCORE: u8 = 80;

/// Days covered by the heatmap
pub const HEATMAP_DAYS: i64 = 365;

/// Sessions longer than this count double in the heatmap
pub const HEATMAP_LONG_SESSION_SECONDS: u64 = 60;

const WEEKDAY_LABELS: [&str; 7] = ["ma", "di", "wo", "do", "vr", "za", "zo"];

// ==================== Types ====================

/// A finished session as stored in the history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub score: u8,
    pub duration_seconds: u64,
    pub total_items: u32,
    pub mistakes_count: u32,
}

impl SessionRecord {
    pub fn from_summary(
        set_id: Option<u64>,
        created_at: DateTime<Utc>,
        summary: &SessionSummary,
    ) -> Self {
        Self {
            set_id,
            created_at,
            score: summary.score,
            duration_seconds: summary.duration_seconds,
            total_items: summary.total_items,
            mistakes_count: summary.mistakes_count,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

impl From<&SessionRecord> for StudySample {
    fn from(record: &SessionRecord) -> Self {
        StudySample::new(
            record.created_at,
            record.score as f64,
            record.duration_seconds as f64,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayActivity {
    pub day: String,
    pub date: NaiveDate,
    pub count: u32,
    pub seconds: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_time_seconds: u64,
    pub total_sessions: u32,
    pub total_items_studied: u64,
    pub average_score: u8,
    pub current_streak: u32,
    pub best_streak: u32,
    pub xp: u64,
    pub level: u32,
    pub weekly_activity: Vec<DayActivity>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub count: u32,
    /// Intensity: 2 per long session, 1 per short one
    pub score: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub date: NaiveDate,
    pub total_items: u64,
    pub score: u8,
}

// ==================== Aggregates ====================

pub fn dashboard_stats(sessions: &[SessionRecord], today: NaiveDate) -> DashboardStats {
    let weekly_activity = weekly_activity(sessions, today);
    if sessions.is_empty() {
        return DashboardStats {
            total_time_seconds: 0,
            total_sessions: 0,
            total_items_studied: 0,
            average_score: 0,
            current_streak: 0,
            best_streak: 0,
            xp: 0,
            level: 1,
            weekly_activity,
        };
    }

    let total_time_seconds: u64 = sessions.iter().map(|s| s.duration_seconds).sum();
    let total_items_studied: u64 = sessions.iter().map(|s| s.total_items as u64).sum();
    let score_sum: f64 = sessions.iter().map(|s| s.score as f64).sum();
    let average_score = (score_sum / sessions.len() as f64).round() as u8;

    let (current_streak, best_streak) = streaks(sessions, today);

    let high_scores = sessions.iter().filter(|s| s.score >= HIGH_SCORE).count() as f64;
    let xp = (total_items_studied as f64 * XP_PER_ITEM
        + total_time_seconds as f64 / 60.0 * XP_PER_MINUTE
        + high_scores * XP_HIGH_SCORE_BONUS)
        .floor() as u64;

    DashboardStats {
        total_time_seconds,
        total_sessions: sessions.len() as u32,
        total_items_studied,
        average_score,
        current_streak,
        best_streak,
        xp,
        level: level_for_xp(xp),
        weekly_activity,
    }
}

pub fn level_for_xp(xp: u64) -> u32 {
    ((xp as f64).sqrt() / 5.0).floor() as u32 + 1
}

/// `(current, best)` runs of consecutive study days. The current run only
/// counts when the last study day is today or yesterday.
pub fn streaks(sessions: &[SessionRecord], today: NaiveDate) -> (u32, u32) {
    let mut days: Vec<NaiveDate> = sessions.iter().map(SessionRecord::day).collect();
    days.sort_unstable();
    days.dedup();

    let Some(&last) = days.last() else {
        return (0, 0);
    };

    let mut best = 0;
    let mut run = 1;
    for pair in days.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
        } else {
            best = best.max(run);
            run = 1;
        }
    }
    best = best.max(run);

    let current = if (today - last).num_days() <= 1 { run } else { 0 };
    (current, best)
}

/// Monday to Sunday of the week containing `today`
pub fn weekly_activity(sessions: &[SessionRecord], today: NaiveDate) -> Vec<DayActivity> {
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    WEEKDAY_LABELS
        .iter()
        .enumerate()
        .map(|(offset, label)| {
            let date = monday + Duration::days(offset as i64);
            let (count, seconds) = sessions
                .iter()
                .filter(|s| s.day() == date)
                .fold((0, 0), |(c, secs), s| (c + 1, secs + s.duration_seconds));
            DayActivity {
                day: label.to_string(),
                date,
                count,
                seconds,
            }
        })
        .collect()
}

/// Sessions of the last year grouped by day, oldest first
pub fn heatmap(sessions: &[SessionRecord], today: NaiveDate) -> Vec<HeatmapDay> {
    let since = today - Duration::days(HEATMAP_DAYS);
    let mut grouped: BTreeMap<NaiveDate, HeatmapDay> = BTreeMap::new();
    for session in sessions.iter().filter(|s| s.day() >= since) {
        let date = session.day();
        let entry = grouped.entry(date).or_insert(HeatmapDay {
            date,
            count: 0,
            score: 0,
        });
        entry.count += 1;
        entry.score += if session.duration_seconds > HEATMAP_LONG_SESSION_SECONDS {
            2
        } else {
            1
        };
    }
    grouped.into_values().collect()
}

/// Running total of studied items, one point per session in time order
pub fn growth(sessions: &[SessionRecord]) -> Vec<GrowthPoint> {
    let mut ordered: Vec<&SessionRecord> = sessions.iter().collect();
    ordered.sort_by_key(|s| s.created_at);

    let mut total = 0u64;
    ordered
        .into_iter()
        .map(|s| {
            total += s.total_items as u64;
            GrowthPoint {
                date: s.day(),
                total_items: total,
                score: s.score,
            }
        })
        .collect()
}

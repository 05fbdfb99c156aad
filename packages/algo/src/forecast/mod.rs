//! Mastery Forecast
//!
//! Predicts when a learner reaches the mastery milestones of one set, using
//! the learning curve fitted to the set's session history.
//!
//! Model: `score = a * ln(cumulative_hours) + b`, fitted by ordinary least
//! squares on `X = ln(x)`. Learning is fast at first and then plateaus, so
//! each further milestone costs more study time than the previous one.
//!
//! The retention index is a separate heuristic over the same samples and
//! does not use the regression.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AlgoError, Result};
use crate::types::{StudySample, EPSILON, MILESTONES};

// ==================== Constants ====================

/// Cumulative hours start here so the first sample never hits ln(0)
pub const INITIAL_HOURS_OFFSET: f64 = 0.1;

/// Fitted slopes at or below this are treated as no growth
pub const MIN_GROWTH_SLOPE: f64 = 1.0;

/// Largest ln(total hours) still forecast (e^8 is about 3000 hours)
pub const MAX_LOG_HOURS: f64 = 8.0;

/// Optimistic floor for the observed study pace (15 minutes a day)
pub const MIN_HOURS_PER_DAY: f64 = 0.25;

/// Display scale from fitted slope to learning velocity
pub const VELOCITY_SCALE: f64 = 5.0;

/// Samples averaged for the retention index
const RETENTION_RECENT_SAMPLES: usize = 3;

const RETENTION_SCORE_WEIGHT: f64 = 0.6;
const RETENTION_RECENCY_WEIGHT: f64 = 0.4;

/// Recency points lost per day without practice
const RETENTION_DECAY_PER_DAY: f64 = 10.0;

// ==================== Data Structures ====================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MilestoneStatus {
    /// Current score is already at or above the milestone
    Reached,
    /// Forecast date is available
    Projected,
    /// Fitted curve does not grow
    Unreachable,
    /// Would need more study time than the model is trusted for
    TooFar,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneForecast {
    /// Target mastery in percent
    pub target: u8,
    pub status: MilestoneStatus,
    /// `None` when the milestone is unreachable or too far
    pub date: Option<NaiveDate>,
    /// Additional study hours; `None` when the milestone is unreachable or too far
    pub hours_needed: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextMilestone {
    pub target: u8,
    pub date: NaiveDate,
    pub hours_needed: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryForecast {
    /// Last score, clamped to 0-100 and rounded
    pub current_mastery: u8,
    /// One entry per milestone in [`MILESTONES`] order
    pub milestones: Vec<MilestoneForecast>,
    /// Display-only speed gauge
    pub learning_velocity: f64,
    /// Cumulative study time including the initial offset
    pub total_study_hours: f64,
    /// 0-100
    pub retention_index: u8,
    pub next_milestone: Option<NextMilestone>,
    /// Fitted `a`
    pub slope: f64,
    /// Fitted `b`
    pub intercept: f64,
}

impl MasteryForecast {
    pub fn milestone(&self, target: u8) -> Option<&MilestoneForecast> {
        self.milestones.iter().find(|m| m.target == target)
    }
}

/// Least-squares fit of `y = slope * ln(x) + intercept`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LogFit {
    /// Fit over `(x, y)` points with `x > 0`. `None` for fewer than two points
    /// or when every `x` is the same.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        let n = points.len() as f64;
        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
        for &(x, y) in points {
            let ln_x = x.ln();
            sum_x += ln_x;
            sum_y += y;
            sum_xy += ln_x * y;
            sum_xx += ln_x * ln_x;
        }

        let denominator = n * sum_xx - sum_x * sum_x;
        if denominator.abs() < EPSILON {
            return None;
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;
        if !slope.is_finite() || !intercept.is_finite() {
            return None;
        }
        Some(Self { slope, intercept })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x.ln() + self.intercept
    }
}

/// Study hours still needed for a target score
#[derive(Clone, Copy, Debug, PartialEq)]
enum HoursEstimate {
    Reached,
    Hours(f64),
    Unreachable,
    TooFar,
}

// ==================== Prediction ====================

fn validate(samples: &[StudySample]) -> Result<()> {
    for (index, sample) in samples.iter().enumerate() {
        if !sample.score.is_finite() {
            return Err(AlgoError::InvalidSample {
                index,
                reason: "score is not a finite number".to_string(),
            });
        }
        if !sample.duration_seconds.is_finite() || sample.duration_seconds < 0.0 {
            return Err(AlgoError::InvalidSample {
                index,
                reason: "duration must be a non-negative number".to_string(),
            });
        }
    }
    Ok(())
}

/// Forecast the mastery milestones of one set.
///
/// Returns `Ok(None)` when there are fewer than two samples or the samples
/// cannot be fitted. `now` is the reference point for forecast dates and
/// the retention index.
pub fn predict_mastery(
    samples: &[StudySample],
    now: DateTime<Utc>,
) -> Result<Option<MasteryForecast>> {
    validate(samples)?;
    if samples.len() < 2 {
        return Ok(None);
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by_key(|s| s.timestamp);

    let mut cumulative_hours = INITIAL_HOURS_OFFSET;
    let points: Vec<(f64, f64)> = sorted
        .iter()
        .map(|s| {
            cumulative_hours += s.duration_seconds / 3600.0;
            (cumulative_hours, s.score)
        })
        .collect();
    let total_study_hours = cumulative_hours;

    let Some(fit) = LogFit::fit(&points) else {
        warn!(samples = points.len(), "mastery regression is degenerate");
        return Ok(None);
    };

    let current_score = sorted[sorted.len() - 1].score;
    let first = sorted[0].timestamp;
    let last = sorted[sorted.len() - 1].timestamp;
    let days_active = ((last - first).num_days() + 1).max(1);
    let hours_per_day = (total_study_hours / days_active as f64).max(MIN_HOURS_PER_DAY);
    let today = now.date_naive();

    let estimate = |target: f64| -> HoursEstimate {
        if target <= current_score {
            return HoursEstimate::Reached;
        }
        if fit.slope <= MIN_GROWTH_SLOPE {
            return HoursEstimate::Unreachable;
        }
        let log_hours = (target - fit.intercept) / fit.slope;
        if log_hours > MAX_LOG_HOURS {
            return HoursEstimate::TooFar;
        }
        HoursEstimate::Hours((log_hours.exp() - total_study_hours).max(0.0))
    };

    let milestones: Vec<MilestoneForecast> = MILESTONES
        .iter()
        .map(|&target| {
            let (status, date, hours_needed) = match estimate(target as f64) {
                HoursEstimate::Reached => (MilestoneStatus::Reached, Some(today), Some(0.0)),
                HoursEstimate::Hours(hours) => {
                    let days = (hours / hours_per_day).ceil() as i64;
                    (
                        MilestoneStatus::Projected,
                        Some(today + Duration::days(days)),
                        Some(hours),
                    )
                }
                HoursEstimate::Unreachable => (MilestoneStatus::Unreachable, None, None),
                HoursEstimate::TooFar => (MilestoneStatus::TooFar, None, None),
            };
            MilestoneForecast {
                target,
                status,
                date,
                hours_needed,
            }
        })
        .collect();

    let next_milestone = milestones
        .iter()
        .filter(|m| m.target as f64 > current_score)
        .find_map(|m| {
            Some(NextMilestone {
                target: m.target,
                date: m.date?,
                hours_needed: m.hours_needed.unwrap_or(0.0),
            })
        });

    let forecast = MasteryForecast {
        current_mastery: current_score.round().clamp(0.0, 100.0) as u8,
        milestones,
        learning_velocity: (fit.slope * VELOCITY_SCALE).max(0.0),
        total_study_hours,
        retention_index: retention_index(&sorted, now),
        next_milestone,
        slope: fit.slope,
        intercept: fit.intercept,
    };

    debug!(
        slope = fit.slope,
        intercept = fit.intercept,
        current = forecast.current_mastery,
        total_hours = total_study_hours,
        "mastery forecast computed"
    );
    Ok(Some(forecast))
}

/// Heuristic retention (0-100): 60% average of the last three scores,
/// 40% recency, which loses ten points per day since the last session.
pub fn retention_index(samples: &[StudySample], now: DateTime<Utc>) -> u8 {
    let Some(last) = samples.iter().max_by_key(|s| s.timestamp) else {
        return 0;
    };

    let mut recent: Vec<&StudySample> = samples.iter().collect();
    recent.sort_by_key(|s| s.timestamp);
    let recent = &recent[recent.len().saturating_sub(RETENTION_RECENT_SAMPLES)..];
    let avg_recent = recent.iter().map(|s| s.score).sum::<f64>() / recent.len() as f64;

    let days_since = (now - last.timestamp).num_days() as f64;
    let recency = (100.0 - days_since * RETENTION_DECAY_PER_DAY).max(0.0);

    (avg_recent * RETENTION_SCORE_WEIGHT + recency * RETENTION_RECENCY_WEIGHT)
        .round()
        .clamp(0.0, 100.0) as u8
}

//! Plain-text rendering of forecasts, missed words and dashboard statistics

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use woordjes_algo::{
    predict_mastery, DashboardStats, MasteryForecast, MilestoneStatus, PracticeItem,
    SessionRecord, StudySample, WordProgress,
};

/// One forecast per set found in the history, sessions without a set last.
/// `only` keeps a single set.
pub fn forecasts_by_set(
    sessions: &[SessionRecord],
    only: Option<u64>,
    now: DateTime<Utc>,
) -> Result<Vec<(Option<u64>, Option<MasteryForecast>)>> {
    let mut by_set: BTreeMap<Option<u64>, Vec<StudySample>> = BTreeMap::new();
    for session in sessions
        .iter()
        .filter(|s| only.is_none() || s.set_id == only)
    {
        by_set
            .entry(session.set_id)
            .or_default()
            .push(StudySample::from(session));
    }

    let mut forecasts = Vec::with_capacity(by_set.len());
    let mut unassigned = None;
    for (set_id, samples) in by_set {
        let forecast = predict_mastery(&samples, now)?;
        match set_id {
            Some(_) => forecasts.push((set_id, forecast)),
            None => unassigned = Some((None, forecast)),
        }
    }
    forecasts.extend(unassigned);
    Ok(forecasts)
}

pub fn write_set_forecasts<O: Write>(
    output: &mut O,
    forecasts: &[(Option<u64>, Option<MasteryForecast>)],
) -> Result<()> {
    if forecasts.is_empty() {
        return write_forecast(output, None);
    }
    for (index, (set_id, forecast)) in forecasts.iter().enumerate() {
        if index > 0 {
            writeln!(output)?;
        }
        match set_id {
            Some(id) => writeln!(output, "== set {id} ==")?,
            None => writeln!(output, "== sessions without a set ==")?,
        }
        write_forecast(output, forecast.as_ref())?;
    }
    Ok(())
}

pub fn write_forecast<O: Write>(output: &mut O, forecast: Option<&MasteryForecast>) -> Result<()> {
    let Some(forecast) = forecast else {
        writeln!(output, "not enough sessions for a forecast (need at least 2)")?;
        return Ok(());
    };

    writeln!(output, "current mastery:   {}%", forecast.current_mastery)?;
    writeln!(output, "study time:        {:.1} h", forecast.total_study_hours)?;
    writeln!(output, "learning velocity: {:.1}", forecast.learning_velocity)?;
    writeln!(output, "retention index:   {}", forecast.retention_index)?;
    writeln!(output)?;

    for milestone in &forecast.milestones {
        let detail = match (milestone.status, milestone.date, milestone.hours_needed) {
            (MilestoneStatus::Reached, _, _) => "reached".to_string(),
            (MilestoneStatus::Projected, Some(date), Some(hours)) => {
                format!("{date} (+{hours:.1} h)")
            }
            (MilestoneStatus::TooFar, _, _) => "too far to project".to_string(),
            _ => "not reachable at the current pace".to_string(),
        };
        writeln!(output, "{:>3}%  {detail}", milestone.target)?;
    }

    if let Some(next) = &forecast.next_milestone {
        writeln!(output)?;
        writeln!(output, "next: {}% on {}", next.target, next.date)?;
    }
    Ok(())
}

/// Missed words with their prompt and answer. Writes nothing when the list
/// is empty.
pub fn write_most_missed<O: Write>(
    output: &mut O,
    missed: &[&WordProgress],
    items: &[PracticeItem],
) -> Result<()> {
    if missed.is_empty() {
        return Ok(());
    }
    writeln!(output, "most missed:")?;
    for progress in missed {
        let Some(item) = items.iter().find(|item| item.id == progress.word_id) else {
            continue;
        };
        writeln!(
            output,
            "  {} - {}  ({} of {} wrong)",
            item.prompt,
            item.answer,
            progress.mistake_count,
            progress.attempts()
        )?;
    }
    Ok(())
}

pub fn write_stats<O: Write>(output: &mut O, stats: &DashboardStats) -> Result<()> {
    writeln!(output, "sessions:      {}", stats.total_sessions)?;
    writeln!(output, "study time:    {} min", stats.total_time_seconds / 60)?;
    writeln!(output, "items studied: {}", stats.total_items_studied)?;
    writeln!(output, "average score: {}%", stats.average_score)?;
    writeln!(
        output,
        "streak:        {} (best {})",
        stats.current_streak, stats.best_streak
    )?;
    writeln!(output, "level:         {} ({} xp)", stats.level, stats.xp)?;
    writeln!(output)?;

    for day in &stats.weekly_activity {
        let bar = "#".repeat(day.count as usize);
        writeln!(output, "{}  {bar}", day.day)?;
    }
    Ok(())
}

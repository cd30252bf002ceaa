use chrono::{DateTime, Utc};
use tracing::debug;

use crate::adaptive::config::InferenceParams;
use crate::adaptive::mastery::success_rate;
use crate::adaptive::types::{activity_type_of, LearningProfile, LearningSpeed, PerformanceRecord, StreakData};

/// Classifies speed from the average time of the last `speed_window` records.
/// Returns `None` for an empty history.
pub fn infer_learning_speed(
    history: &[PerformanceRecord],
    params: &InferenceParams,
) -> Option<LearningSpeed> {
    let start = history.len().saturating_sub(params.speed_window);
    let recent = &history[start..];
    if recent.is_empty() {
        return None;
    }

    let average = recent.iter().map(|r| r.time_spent).sum::<f64>() / recent.len() as f64;
    let speed = if average < params.fast_below_secs {
        LearningSpeed::Fast
    } else if average > params.slow_above_secs {
        LearningSpeed::Slow
    } else {
        LearningSpeed::Average
    };
    Some(speed)
}

/// Adds the record's activity type to the preferred set when the last
/// `preference_window` records of that type clear the success bar.
/// The set only grows.
pub fn update_preferred_activity_types(
    profile: &mut LearningProfile,
    history: &[PerformanceRecord],
    record: &PerformanceRecord,
    params: &InferenceParams,
) {
    let activity_type = record.activity_type();
    let same_type: Vec<&PerformanceRecord> = history
        .iter()
        .filter(|r| activity_type_of(&r.activity_id) == activity_type)
        .collect();
    let start = same_type.len().saturating_sub(params.preference_window);

    let Some(rate) = success_rate(same_type[start..].iter().copied()) else {
        return;
    };

    if rate > params.preference_success_rate
        && !profile
            .preferred_activity_types
            .iter()
            .any(|t| t == activity_type)
    {
        debug!(activity_type, rate, "activity type marked as preferred");
        profile
            .preferred_activity_types
            .push(activity_type.to_string());
    }
}

/// Calendar-day streak update. A gap of more than one day restarts at 1.
pub fn update_streak(streak: &mut StreakData, is_active: bool, now: DateTime<Utc>) {
    if !is_active {
        return;
    }

    let days = (now.date_naive() - streak.last_active_date.date_naive()).num_days();
    match days {
        1 => streak.current += 1,
        0 if streak.current > 0 => {}
        _ => streak.current = 1,
    }

    streak.longest = streak.longest.max(streak.current);
    streak.last_active_date = now;
}

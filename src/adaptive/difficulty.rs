use crate::adaptive::config::DifficultyParams;
use crate::adaptive::mastery::success_rate;
use crate::adaptive::types::{Difficulty, LearningProfile, PerformanceRecord};

/// Picks the difficulty of the next activity for `concept`.
///
/// Pure: reads the profile and history only.
pub fn select_difficulty(
    profile: &LearningProfile,
    history: &[PerformanceRecord],
    concept: &str,
    params: &DifficultyParams,
    default_mastery: f64,
) -> Difficulty {
    let mastery = profile.mastery(concept).unwrap_or(default_mastery);
    let recent_rate = recent_concept_rate(history, concept, params.recent_window)
        .unwrap_or(params.neutral_rate);

    if recent_rate > params.hard_rate_above && mastery > params.hard_mastery_above {
        Difficulty::Hard
    } else if recent_rate < params.easy_rate_below || mastery < params.easy_mastery_below {
        Difficulty::Easy
    } else {
        Difficulty::Medium
    }
}

fn recent_concept_rate(history: &[PerformanceRecord], concept: &str, window: usize) -> Option<f64> {
    let mut recent: Vec<&PerformanceRecord> = history
        .iter()
        .rev()
        .filter(|r| r.grammar_concept == concept)
        .take(window)
        .collect();
    recent.reverse();
    success_rate(recent)
}

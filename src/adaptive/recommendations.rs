use chrono::{DateTime, Utc};

use crate::adaptive::config::RecommendationParams;
use crate::adaptive::mastery::success_rate;
use crate::adaptive::types::{
    Difficulty, LearningProfile, PerformanceRecord, Priority, Recommendation,
    RecommendationAction, RecommendationType,
};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Builds the prioritised recommendation list.
///
/// Generation order: review-due concepts, struggling concepts, advancement,
/// break. The final sort is stable, so equal priorities keep that order.
pub fn build_recommendations(
    profile: &LearningProfile,
    history: &[PerformanceRecord],
    params: &RecommendationParams,
    default_mastery: f64,
    now: DateTime<Utc>,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for concept in concepts_due_for_review(profile, params, default_mastery, now) {
        recommendations.push(Recommendation {
            kind: RecommendationType::Review,
            priority: Priority::High,
            message: format!("Time to review {concept}! Let's strengthen your understanding."),
            action: Some(RecommendationAction {
                concept: Some(concept),
                difficulty: Some(Difficulty::Easy),
                ..Default::default()
            }),
        });
    }

    for concept in &profile.struggling_concepts {
        recommendations.push(Recommendation {
            kind: RecommendationType::Practice,
            priority: Priority::High,
            message: format!(
                "Let's practice {concept} with some easier activities to build confidence."
            ),
            action: Some(RecommendationAction {
                concept: Some(concept.clone()),
                difficulty: Some(Difficulty::Easy),
                ..Default::default()
            }),
        });
    }

    if is_ready_to_advance(history, params) {
        recommendations.push(Recommendation {
            kind: RecommendationType::Advance,
            priority: Priority::Medium,
            message: "Great progress! You're ready for more challenging activities.".to_string(),
            action: Some(RecommendationAction {
                difficulty: Some(Difficulty::Hard),
                ..Default::default()
            }),
        });
    }

    if needs_break(history, params) {
        recommendations.push(Recommendation {
            kind: RecommendationType::Break,
            priority: Priority::Medium,
            message: "You've been working hard! Consider taking a short break.".to_string(),
            action: None,
        });
    }

    recommendations.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    recommendations
}

pub fn review_interval_days(mastery: f64, params: &RecommendationParams) -> f64 {
    if mastery > params.review_mastered_above {
        params.review_days_mastered
    } else if mastery > params.review_familiar_above {
        params.review_days_familiar
    } else {
        params.review_days_default
    }
}

pub fn concepts_due_for_review(
    profile: &LearningProfile,
    params: &RecommendationParams,
    default_mastery: f64,
    now: DateTime<Utc>,
) -> Vec<String> {
    profile
        .last_review_date
        .iter()
        .filter(|(concept, last_review)| {
            let elapsed_days = (now - **last_review).num_seconds() as f64 / SECONDS_PER_DAY;
            let mastery = profile.mastery(concept).unwrap_or(default_mastery);
            elapsed_days >= review_interval_days(mastery, params)
        })
        .map(|(concept, _)| concept.clone())
        .collect()
}

fn tail<'a>(history: &'a [PerformanceRecord], window: usize) -> &'a [PerformanceRecord] {
    &history[history.len().saturating_sub(window)..]
}

pub fn is_ready_to_advance(history: &[PerformanceRecord], params: &RecommendationParams) -> bool {
    let recent = tail(history, params.advance_window);
    if recent.len() < params.advance_min_records {
        return false;
    }

    let rate = success_rate(recent).unwrap_or(0.0);
    let average_hints =
        recent.iter().map(|r| f64::from(r.hints_used)).sum::<f64>() / recent.len() as f64;

    rate > params.advance_success_rate && average_hints < params.advance_max_avg_hints
}

pub fn needs_break(history: &[PerformanceRecord], params: &RecommendationParams) -> bool {
    let recent = tail(history, params.break_window);
    if recent.len() < params.break_min_records {
        return false;
    }

    let total_time: f64 = recent.iter().map(|r| r.time_spent).sum();
    let average_attempts =
        recent.iter().map(|r| f64::from(r.attempts)).sum::<f64>() / recent.len() as f64;

    total_time > params.break_total_secs || average_attempts > params.break_avg_attempts
}

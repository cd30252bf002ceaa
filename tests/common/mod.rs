#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use grammar_galaxy_engine::adaptive::{Difficulty, PerformanceRecord};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub fn record(concept: &str, activity_id: &str, correct: bool) -> PerformanceRecord {
    PerformanceRecord {
        lesson_id: format!("{concept}-lesson-1"),
        activity_id: activity_id.to_string(),
        attempts: if correct { 1 } else { 2 },
        correct_on_first_try: correct,
        time_spent: 45.0,
        hints_used: 0,
        completed_at: base_time(),
        difficulty: Difficulty::Medium,
        grammar_concept: concept.to_string(),
    }
}

pub fn record_at(concept: &str, correct: bool, minutes: i64) -> PerformanceRecord {
    PerformanceRecord {
        completed_at: base_time() + Duration::minutes(minutes),
        ..record(concept, "multiple-choice-1", correct)
    }
}

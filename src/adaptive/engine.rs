use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::adaptive::config::EngineConfig;
use crate::adaptive::difficulty::select_difficulty;
use crate::adaptive::hints::personalized_hint;
use crate::adaptive::inference::{infer_learning_speed, update_preferred_activity_types, update_streak};
use crate::adaptive::mastery::{build_rule, reclassify_concept, MasteryRule};
use crate::adaptive::recommendations::build_recommendations;
use crate::adaptive::types::{Difficulty, LearningProfile, PerformanceRecord, Recommendation};

/// Per-student adaptive learning state: the profile plus the append-only
/// performance history it was derived from.
pub struct AdaptiveLearningEngine {
    config: EngineConfig,
    rule: Box<dyn MasteryRule>,
    profile: LearningProfile,
    history: Vec<PerformanceRecord>,
}

impl AdaptiveLearningEngine {
    pub fn new(student_id: impl Into<String>) -> Self {
        Self::with_config(student_id, EngineConfig::default())
    }

    pub fn with_config(student_id: impl Into<String>, config: EngineConfig) -> Self {
        let profile = LearningProfile::new(student_id, Utc::now());
        Self::from_profile(profile, config)
    }

    pub fn from_profile(profile: LearningProfile, config: EngineConfig) -> Self {
        let rule = build_rule(config.mastery_rule, &config.mastery);
        Self {
            config,
            rule,
            profile,
            history: Vec::new(),
        }
    }

    /// Swaps the mastery update rule. Existing scores are kept as-is.
    pub fn with_rule(mut self, rule: Box<dyn MasteryRule>) -> Self {
        self.rule = rule;
        self
    }

    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    pub fn record_performance(&mut self, record: PerformanceRecord) {
        let concept = record.grammar_concept.clone();
        self.history.push(record);
        let Some(record) = self.history.last() else {
            return;
        };

        let concept_history: Vec<&PerformanceRecord> = self
            .history
            .iter()
            .filter(|r| r.grammar_concept == concept)
            .collect();
        let previous = self.profile.mastery(&concept);
        let mastery = self.rule.next_mastery(previous, record, &concept_history);

        self.profile.concept_mastery.insert(concept.clone(), mastery);
        self.profile
            .last_review_date
            .insert(concept.clone(), record.completed_at);
        reclassify_concept(&mut self.profile, &concept, &self.config.mastery);

        if let Some(speed) = infer_learning_speed(&self.history, &self.config.inference) {
            self.profile.learning_speed = speed;
        }
        update_preferred_activity_types(
            &mut self.profile,
            &self.history,
            record,
            &self.config.inference,
        );

        debug!(
            student_id = %self.profile.student_id,
            concept = %concept,
            difficulty = record.difficulty.as_str(),
            rule = self.rule.name(),
            previous = ?previous,
            mastery,
            speed = self.profile.learning_speed.as_str(),
            "performance recorded"
        );
    }

    pub fn adaptive_difficulty(&self, concept: &str) -> Difficulty {
        select_difficulty(
            &self.profile,
            &self.history,
            concept,
            &self.config.difficulty,
            self.config.mastery.initial,
        )
    }

    pub fn personalized_hint(&self, concept: &str, activity_type: &str) -> &'static str {
        personalized_hint(&self.profile, concept, activity_type, self.config.mastery.initial)
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.recommendations_at(Utc::now())
    }

    pub fn recommendations_at(&self, now: DateTime<Utc>) -> Vec<Recommendation> {
        build_recommendations(
            &self.profile,
            &self.history,
            &self.config.recommendation,
            self.config.mastery.initial,
            now,
        )
    }

    pub fn update_streak(&mut self, is_active: bool) {
        self.update_streak_at(is_active, Utc::now());
    }

    pub fn update_streak_at(&mut self, is_active: bool, now: DateTime<Utc>) {
        update_streak(&mut self.profile.streak_data, is_active, now);
    }

    pub fn learning_profile(&self) -> &LearningProfile {
        &self.profile
    }

    pub fn performance_history(&self) -> &[PerformanceRecord] {
        &self.history
    }

    /// Replaces the history wholesale, e.g. when restoring a saved session.
    /// The profile is not recomputed.
    pub fn load_performance_history(&mut self, history: Vec<PerformanceRecord>) {
        info!(
            student_id = %self.profile.student_id,
            records = history.len(),
            "performance history loaded"
        );
        self.history = history;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::config::MasteryRuleKind;
    use crate::adaptive::types::LearningSpeed;

    fn record(concept: &str, activity_id: &str, correct: bool) -> PerformanceRecord {
        PerformanceRecord {
            lesson_id: "lesson-1".to_string(),
            activity_id: activity_id.to_string(),
            attempts: 1,
            correct_on_first_try: correct,
            time_spent: 15.0,
            hints_used: 0,
            completed_at: Utc::now(),
            difficulty: Difficulty::Medium,
            grammar_concept: concept.to_string(),
        }
    }

    #[test]
    fn test_three_correct_nouns_become_mastered() {
        let mut engine = AdaptiveLearningEngine::new("student-1");
        for _ in 0..3 {
            engine.record_performance(record("nouns", "drag-1", true));
        }
        let profile = engine.learning_profile();
        assert_eq!(profile.mastery("nouns"), Some(0.8));
        assert!(profile.is_mastered("nouns"));
        assert!(!profile.is_struggling("nouns"));
    }

    #[test]
    fn test_record_updates_review_date_and_speed() {
        let mut engine = AdaptiveLearningEngine::new("student-1");
        let r = record("verbs", "typing-1", false);
        let at = r.completed_at;
        engine.record_performance(r);

        let profile = engine.learning_profile();
        assert_eq!(profile.last_review_date.get("verbs"), Some(&at));
        assert_eq!(profile.learning_speed, LearningSpeed::Fast);
        assert_eq!(profile.mastery("verbs"), Some(0.45));
        assert_eq!(engine.performance_history().len(), 1);
    }

    #[test]
    fn test_rolling_rule_from_config() {
        let config = EngineConfig {
            mastery_rule: MasteryRuleKind::RollingAverage,
            ..Default::default()
        };
        let mut engine = AdaptiveLearningEngine::with_config("student-1", config);
        assert_eq!(engine.rule_name(), "rolling_average");

        engine.record_performance(record("nouns", "drag-1", true));
        engine.record_performance(record("nouns", "drag-1", false));
        assert_eq!(engine.learning_profile().mastery("nouns"), Some(0.5));
    }

    #[test]
    fn test_struggling_concept_produces_practice() {
        let mut engine = AdaptiveLearningEngine::new("student-1");
        for _ in 0..5 {
            engine.record_performance(record("adjectives", "matching-1", false));
        }
        assert!(engine.learning_profile().is_struggling("adjectives"));
        assert_eq!(engine.adaptive_difficulty("adjectives"), Difficulty::Easy);

        let recs = engine.recommendations();
        assert!(recs
            .iter()
            .any(|r| r.action.as_ref().and_then(|a| a.concept.as_deref()) == Some("adjectives")));
    }
}

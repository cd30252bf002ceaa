//! Property-based tests for the learning engine and unlock state machines.
//!
//! Invariants covered:
//! - Mastery stays within [0, 1] under either update rule
//! - A concept is never both struggling and mastered
//! - Difficulty selection does not mutate the profile
//! - Achievement unlocks are monotonic across arbitrary snapshots
//! - Companion level is the last tier before the first unmet one
//! - Profile and saved catalogue survive a JSON round-trip

mod common;

use proptest::prelude::*;

use common::record_at;
use grammar_galaxy_engine::achievements::{AchievementManager, ProgressSnapshot, SavedAchievement};
use grammar_galaxy_engine::adaptive::{AdaptiveLearningEngine, EngineConfig, LearningProfile, MasteryRuleKind};
use grammar_galaxy_engine::companion::{calculate_evolution_level, EvolutionProgress, EVOLUTION_LADDER};

const CONCEPTS: [&str; 4] = ["nouns", "verbs", "adjectives", "pronouns"];

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_rule() -> impl Strategy<Value = MasteryRuleKind> {
    prop_oneof![
        Just(MasteryRuleKind::Incremental),
        Just(MasteryRuleKind::RollingAverage),
    ]
}

fn arb_outcomes() -> impl Strategy<Value = Vec<(usize, bool)>> {
    prop::collection::vec((0..CONCEPTS.len(), any::<bool>()), 0..60)
}

fn arb_snapshot() -> impl Strategy<Value = ProgressSnapshot> {
    (
        0usize..60,
        0u64..12_000,
        0u64..25,
        0u64..35,
        prop::collection::hash_set(
            prop_oneof![
                Just("planet-core".to_string()),
                Just("planet-morph".to_string()),
                Just("planet-time-warp".to_string()),
            ],
            0..3,
        ),
    )
        .prop_map(|(lessons, star_dust, perfect_scores, streak_count, completed_planets)| {
            ProgressSnapshot {
                completed_lessons: (0..lessons).map(|i| format!("lesson-{i}")).collect(),
                star_dust,
                perfect_scores,
                streak_count,
                time_spent: 0,
                completed_planets,
            }
        })
}

fn arb_progress() -> impl Strategy<Value = EvolutionProgress> {
    (0u64..60, 0u64..8, 0u64..20, 0u64..10_000).prop_map(
        |(completed_lessons, completed_planets, achievements, star_dust)| EvolutionProgress {
            completed_lessons,
            completed_planets,
            achievements,
            star_dust,
        },
    )
}

fn replay(rule: MasteryRuleKind, outcomes: &[(usize, bool)]) -> AdaptiveLearningEngine {
    let config = EngineConfig {
        mastery_rule: rule,
        ..Default::default()
    };
    let mut engine = AdaptiveLearningEngine::with_config("pbt-student", config);
    for (minute, &(concept, correct)) in outcomes.iter().enumerate() {
        engine.record_performance(record_at(CONCEPTS[concept], correct, minute as i64));
    }
    engine
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_mastery_stays_in_unit_interval(rule in arb_rule(), outcomes in arb_outcomes()) {
        let engine = replay(rule, &outcomes);
        for (concept, mastery) in &engine.learning_profile().concept_mastery {
            prop_assert!((0.0..=1.0).contains(mastery), "{} = {}", concept, mastery);
        }
    }

    #[test]
    fn prop_struggling_and_mastered_are_disjoint(rule in arb_rule(), outcomes in arb_outcomes()) {
        let engine = replay(rule, &outcomes);
        let profile = engine.learning_profile();
        for concept in &profile.struggling_concepts {
            prop_assert!(!profile.is_mastered(concept));
            prop_assert!(profile.mastery(concept).unwrap_or(1.0) < 0.3);
        }
        for concept in &profile.mastered_concepts {
            prop_assert!(profile.mastery(concept).unwrap_or(0.0) >= 0.8);
        }
    }

    #[test]
    fn prop_difficulty_selection_is_pure(outcomes in arb_outcomes(), concept in 0..CONCEPTS.len()) {
        let engine = replay(MasteryRuleKind::Incremental, &outcomes);
        let before = engine.learning_profile().clone();
        let first = engine.adaptive_difficulty(CONCEPTS[concept]);
        let second = engine.adaptive_difficulty(CONCEPTS[concept]);
        prop_assert_eq!(first, second);
        prop_assert_eq!(&before, engine.learning_profile());
    }

    #[test]
    fn prop_unlocks_are_monotonic(snapshots in prop::collection::vec(arb_snapshot(), 1..8)) {
        let mut manager = AchievementManager::new();
        let mut seen: Vec<(String, Option<chrono::DateTime<chrono::Utc>>)> = Vec::new();

        for snapshot in &snapshots {
            let newly = manager.check_achievements(snapshot);
            for achievement in &newly {
                prop_assert!(seen.iter().all(|(id, _)| id != &achievement.id));
            }
            for (id, unlocked_at) in &seen {
                let current = manager.get(id).unwrap();
                prop_assert!(current.is_unlocked);
                prop_assert_eq!(&current.unlocked_at, unlocked_at);
            }
            seen.extend(newly.into_iter().map(|a| (a.id, a.unlocked_at)));
            for achievement in manager.achievements() {
                prop_assert!(achievement.progress <= achievement.requirements.target);
            }
        }
        prop_assert_eq!(seen.len(), manager.unlocked_count());
    }

    #[test]
    fn prop_evolution_stops_at_first_unmet_tier(progress in arb_progress()) {
        let level = calculate_evolution_level(&progress) as usize;
        for tier in &EVOLUTION_LADDER[..=level] {
            prop_assert!(tier.unlock_requirement.is_met(&progress));
        }
        if let Some(next) = EVOLUTION_LADDER.get(level + 1) {
            prop_assert!(!next.unlock_requirement.is_met(&progress));
        }
    }

    #[test]
    fn prop_profile_json_round_trip(outcomes in arb_outcomes()) {
        let engine = replay(MasteryRuleKind::Incremental, &outcomes);
        let json = serde_json::to_string(engine.learning_profile()).unwrap();
        let restored: LearningProfile = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&restored, engine.learning_profile());
    }

    #[test]
    fn prop_saved_catalog_round_trip(snapshot in arb_snapshot()) {
        let mut manager = AchievementManager::new();
        manager.check_achievements(&snapshot);
        let json = serde_json::to_string(&manager.saved_state()).unwrap();
        let saved: Vec<SavedAchievement> = serde_json::from_str(&json).unwrap();
        let restored = AchievementManager::from_saved(&saved);
        prop_assert_eq!(restored.achievements(), manager.achievements());
    }
}

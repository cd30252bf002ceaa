//! Companion evolution ladder.
//!
//! The level is found by walking the ladder in order and stopping at the
//! first tier whose requirement is unmet. Later tiers are never considered
//! once one fails, even if their own requirement happens to hold.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockKind {
    Lessons,
    Planets,
    Achievements,
    StarDust,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRequirement {
    #[serde(rename = "type")]
    pub kind: UnlockKind,
    pub target: u64,
}

impl UnlockRequirement {
    pub const fn new(kind: UnlockKind, target: u64) -> Self {
        Self { kind, target }
    }

    pub fn is_met(&self, progress: &EvolutionProgress) -> bool {
        let value = match self.kind {
            UnlockKind::Lessons => progress.completed_lessons,
            UnlockKind::Planets => progress.completed_planets,
            UnlockKind::Achievements => progress.achievements,
            UnlockKind::StarDust => progress.star_dust,
        };
        value >= self.target
    }
}

/// Cumulative counters that gate companion growth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvolutionProgress {
    pub completed_lessons: u64,
    pub completed_planets: u64,
    pub achievements: u64,
    pub star_dust: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodVariations {
    pub happy: &'static str,
    pub excited: &'static str,
    pub sleepy: &'static str,
    pub curious: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionEvolution {
    pub level: u32,
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub unlock_requirement: UnlockRequirement,
    pub traits: &'static [&'static str],
    pub special_abilities: &'static [&'static str],
    pub mood_variations: MoodVariations,
}

pub static EVOLUTION_LADDER: &[CompanionEvolution] = &[
    CompanionEvolution {
        level: 0,
        name: "Grammar Egg",
        emoji: "🥚",
        description: "Your companion is still developing inside this mysterious egg!",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Lessons, 0),
        traits: &["Mysterious", "Potential"],
        special_abilities: &["Stores learning energy"],
        mood_variations: MoodVariations {
            happy: "🥚",
            excited: "🥚✨",
            sleepy: "🥚💤",
            curious: "🥚❓",
        },
    },
    CompanionEvolution {
        level: 1,
        name: "Grammar Hatchling",
        emoji: "🐣",
        description: "A curious little creature emerges, eager to learn grammar!",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Lessons, 3),
        traits: &["Curious", "Energetic", "Learning"],
        special_abilities: &["Provides basic hints", "Celebrates achievements"],
        mood_variations: MoodVariations {
            happy: "🐣😊",
            excited: "🐣🎉",
            sleepy: "🐣😴",
            curious: "🐣🤔",
        },
    },
    CompanionEvolution {
        level: 2,
        name: "Word Sprite",
        emoji: "🧚‍♀️",
        description: "A magical sprite that dances around words and helps with grammar!",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Lessons, 10),
        traits: &["Magical", "Helpful", "Playful", "Word-loving"],
        special_abilities: &["Advanced hints", "Word suggestions", "Grammar corrections"],
        mood_variations: MoodVariations {
            happy: "🧚‍♀️✨",
            excited: "🧚‍♀️🌟",
            sleepy: "🧚‍♀️💤",
            curious: "🧚‍♀️🔍",
        },
    },
    CompanionEvolution {
        level: 3,
        name: "Cosmic Unicorn",
        emoji: "🦄",
        description: "A majestic unicorn with cosmic powers and deep grammar wisdom!",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Planets, 2),
        traits: &["Wise", "Magical", "Majestic", "Grammar Master"],
        special_abilities: &["Expert guidance", "Mistake prevention", "Advanced explanations"],
        mood_variations: MoodVariations {
            happy: "🦄🌈",
            excited: "🦄⚡",
            sleepy: "🦄🌙",
            curious: "🦄📚",
        },
    },
    CompanionEvolution {
        level: 4,
        name: "Grammar Dragon",
        emoji: "🐉",
        description: "A powerful dragon that guards the secrets of perfect grammar!",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Planets, 4),
        traits: &["Powerful", "Protective", "Ancient Wisdom", "Grammar Guardian"],
        special_abilities: &["Master-level guidance", "Error detection", "Advanced teaching"],
        mood_variations: MoodVariations {
            happy: "🐉💚",
            excited: "🐉🔥",
            sleepy: "🐉💤",
            curious: "🐉📖",
        },
    },
    CompanionEvolution {
        level: 5,
        name: "Galactic Grammar Phoenix",
        emoji: "🔥🦅",
        description: "The ultimate companion - a phoenix that embodies all grammar knowledge!",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Planets, 6),
        traits: &["Legendary", "All-knowing", "Inspiring", "Grammar Deity"],
        special_abilities: &["Ultimate guidance", "Perfect predictions", "Inspirational teaching"],
        mood_variations: MoodVariations {
            happy: "🔥🦅✨",
            excited: "🔥🦅🌟",
            sleepy: "🔥🦅🌙",
            curious: "🔥🦅🔮",
        },
    },
];

pub fn calculate_evolution_level(progress: &EvolutionProgress) -> u32 {
    evolution_level_on(EVOLUTION_LADDER.iter().map(|e| (e.level, e.unlock_requirement)), progress)
}

/// Stop-at-first-failure walk over `(level, requirement)` pairs in ladder
/// order. Returns 0 when even the first tier is unmet.
pub fn evolution_level_on<I>(ladder: I, progress: &EvolutionProgress) -> u32
where
    I: IntoIterator<Item = (u32, UnlockRequirement)>,
{
    let mut level = 0;
    for (tier, requirement) in ladder {
        if !requirement.is_met(progress) {
            break;
        }
        level = tier;
    }
    level
}

/// Clamps to the top of the ladder.
pub fn companion_evolution(level: u32) -> &'static CompanionEvolution {
    let last = EVOLUTION_LADDER.len() - 1;
    &EVOLUTION_LADDER[(level as usize).min(last)]
}

pub fn next_evolution_requirement(current_level: u32) -> Option<&'static CompanionEvolution> {
    let next = current_level.checked_add(1)?;
    EVOLUTION_LADDER.iter().find(|e| e.level == next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(lessons: u64, planets: u64) -> EvolutionProgress {
        EvolutionProgress {
            completed_lessons: lessons,
            completed_planets: planets,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_ladder_levels() {
        assert_eq!(calculate_evolution_level(&progress(0, 0)), 0);
        assert_eq!(calculate_evolution_level(&progress(3, 0)), 1);
        assert_eq!(calculate_evolution_level(&progress(10, 1)), 2);
        assert_eq!(calculate_evolution_level(&progress(10, 2)), 3);
        assert_eq!(calculate_evolution_level(&progress(50, 6)), 5);
    }

    #[test]
    fn test_stops_at_first_failing_tier() {
        // Planets alone never skip the lesson tiers.
        assert_eq!(calculate_evolution_level(&progress(5, 6)), 1);

        let ladder = [
            (1, UnlockRequirement::new(UnlockKind::Lessons, 3)),
            (2, UnlockRequirement::new(UnlockKind::Planets, 2)),
            (3, UnlockRequirement::new(UnlockKind::Lessons, 1)),
        ];
        assert_eq!(evolution_level_on(ladder, &progress(5, 0)), 1);
    }

    #[test]
    fn test_first_tier_unmet_is_zero() {
        let ladder = [(1, UnlockRequirement::new(UnlockKind::StarDust, 100))];
        assert_eq!(evolution_level_on(ladder, &EvolutionProgress::default()), 0);
    }

    #[test]
    fn test_lookup_helpers() {
        assert_eq!(companion_evolution(2).name, "Word Sprite");
        assert_eq!(companion_evolution(99).level, 5);
        assert_eq!(next_evolution_requirement(0).unwrap().level, 1);
        assert!(next_evolution_requirement(5).is_none());
    }
}

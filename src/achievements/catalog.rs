//! Static achievement catalogue and reconciliation of saved state against it.

use std::collections::HashMap;

use tracing::debug;

use crate::achievements::types::{
    Achievement, AchievementCategory, Rarity, Requirement, RequirementType, Reward,
    SavedAchievement,
};

struct AchievementDef {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    category: AchievementCategory,
    rarity: Rarity,
    kind: RequirementType,
    target: u64,
    planet_id: Option<&'static str>,
    star_dust: u64,
    reward_title: Option<&'static str>,
}

impl AchievementDef {
    fn build(&self) -> Achievement {
        Achievement {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            category: self.category,
            rarity: self.rarity,
            requirements: Requirement {
                kind: self.kind,
                target: self.target,
                planet_id: self.planet_id.map(str::to_string),
                grammar_concept: None,
            },
            reward: Reward {
                star_dust: self.star_dust,
                title: self.reward_title.map(str::to_string),
            },
            is_unlocked: false,
            unlocked_at: None,
            progress: 0,
        }
    }
}

use AchievementCategory::{Exploration, Mastery, Progress, Special};
use Rarity::{Common, Epic, Legendary, Rare};
use RequirementType::{LessonsCompleted, PerfectScores, PlanetCompleted, StarDust, Streak};

static CATALOG: &[AchievementDef] = &[
    AchievementDef {
        id: "first-steps",
        title: "First Steps",
        description: "Complete your first lesson in the Grammar Kingdom!",
        icon: "👶",
        category: Progress,
        rarity: Common,
        kind: LessonsCompleted,
        target: 1,
        planet_id: None,
        star_dust: 25,
        reward_title: None,
    },
    AchievementDef {
        id: "grammar-explorer",
        title: "Grammar Explorer",
        description: "Complete 10 lessons across different planets!",
        icon: "🚀",
        category: Progress,
        rarity: Common,
        kind: LessonsCompleted,
        target: 10,
        planet_id: None,
        star_dust: 100,
        reward_title: None,
    },
    AchievementDef {
        id: "grammar-adventurer",
        title: "Grammar Adventurer",
        description: "Complete 25 lessons and become a true adventurer!",
        icon: "⚔️",
        category: Progress,
        rarity: Rare,
        kind: LessonsCompleted,
        target: 25,
        planet_id: None,
        star_dust: 250,
        reward_title: Some("Grammar Adventurer"),
    },
    AchievementDef {
        id: "grammar-master",
        title: "Grammar Master",
        description: "Complete all 50+ lessons in the Grammar Kingdom!",
        icon: "👑",
        category: Progress,
        rarity: Legendary,
        kind: LessonsCompleted,
        target: 50,
        planet_id: None,
        star_dust: 1000,
        reward_title: Some("Grammar Master"),
    },
    AchievementDef {
        id: "castle-conqueror",
        title: "Castle Conqueror",
        description: "Master all lessons in Building Blocks Castle!",
        icon: "🏰",
        category: Mastery,
        rarity: Rare,
        kind: PlanetCompleted,
        target: 1,
        planet_id: Some("planet-core"),
        star_dust: 200,
        reward_title: Some("Noun Knight"),
    },
    AchievementDef {
        id: "village-navigator",
        title: "Village Navigator",
        description: "Complete all lessons in Signpost Village!",
        icon: "🗺️",
        category: Mastery,
        rarity: Rare,
        kind: PlanetCompleted,
        target: 1,
        planet_id: Some("planet-signpost"),
        star_dust: 200,
        reward_title: Some("Village Guide"),
    },
    AchievementDef {
        id: "palace-royalty",
        title: "Palace Royalty",
        description: "Master all lessons in Pronoun Palace!",
        icon: "👸",
        category: Mastery,
        rarity: Rare,
        kind: PlanetCompleted,
        target: 1,
        planet_id: Some("planet-morph"),
        star_dust: 200,
        reward_title: Some("Royal Advisor"),
    },
    AchievementDef {
        id: "time-master",
        title: "Time Master",
        description: "Complete all lessons in Time Travel Academy!",
        icon: "⏰",
        category: Mastery,
        rarity: Epic,
        kind: PlanetCompleted,
        target: 1,
        planet_id: Some("planet-time-warp"),
        star_dust: 300,
        reward_title: Some("Time Master"),
    },
    AchievementDef {
        id: "bridge-builder",
        title: "Master Bridge Builder",
        description: "Complete all lessons on Connection Bridge!",
        icon: "🌉",
        category: Mastery,
        rarity: Rare,
        kind: PlanetCompleted,
        target: 1,
        planet_id: Some("planet-connector"),
        star_dust: 200,
        reward_title: Some("Bridge Master"),
    },
    AchievementDef {
        id: "punctuation-princess",
        title: "Punctuation Princess",
        description: "Master all lessons in Punctuation Palace!",
        icon: "💎",
        category: Mastery,
        rarity: Epic,
        kind: PlanetCompleted,
        target: 1,
        planet_id: Some("punctuation-palace"),
        star_dust: 400,
        reward_title: Some("Punctuation Princess"),
    },
    AchievementDef {
        id: "perfectionist",
        title: "Perfectionist",
        description: "Get perfect scores on 5 lessons!",
        icon: "⭐",
        category: Mastery,
        rarity: Rare,
        kind: PerfectScores,
        target: 5,
        planet_id: None,
        star_dust: 150,
        reward_title: None,
    },
    AchievementDef {
        id: "flawless-champion",
        title: "Flawless Champion",
        description: "Achieve perfect scores on 20 lessons!",
        icon: "🏆",
        category: Mastery,
        rarity: Epic,
        kind: PerfectScores,
        target: 20,
        planet_id: None,
        star_dust: 500,
        reward_title: Some("Flawless Champion"),
    },
    AchievementDef {
        id: "consistent-learner",
        title: "Consistent Learner",
        description: "Complete lessons for 3 days in a row!",
        icon: "🔥",
        category: Special,
        rarity: Common,
        kind: Streak,
        target: 3,
        planet_id: None,
        star_dust: 75,
        reward_title: None,
    },
    AchievementDef {
        id: "dedicated-student",
        title: "Dedicated Student",
        description: "Maintain a 7-day learning streak!",
        icon: "📚",
        category: Special,
        rarity: Rare,
        kind: Streak,
        target: 7,
        planet_id: None,
        star_dust: 200,
        reward_title: None,
    },
    AchievementDef {
        id: "grammar-devotee",
        title: "Grammar Devotee",
        description: "Achieve a 30-day learning streak!",
        icon: "🌟",
        category: Special,
        rarity: Legendary,
        kind: Streak,
        target: 30,
        planet_id: None,
        star_dust: 1000,
        reward_title: Some("Grammar Devotee"),
    },
    AchievementDef {
        id: "star-collector",
        title: "Star Collector",
        description: "Collect 1,000 Star Dust!",
        icon: "✨",
        category: Exploration,
        rarity: Common,
        kind: StarDust,
        target: 1000,
        planet_id: None,
        star_dust: 100,
        reward_title: None,
    },
    AchievementDef {
        id: "cosmic-treasurer",
        title: "Cosmic Treasurer",
        description: "Accumulate 5,000 Star Dust!",
        icon: "💰",
        category: Exploration,
        rarity: Rare,
        kind: StarDust,
        target: 5000,
        planet_id: None,
        star_dust: 500,
        reward_title: None,
    },
    AchievementDef {
        id: "galaxy-tycoon",
        title: "Galaxy Tycoon",
        description: "Amass 10,000 Star Dust!",
        icon: "🌌",
        category: Exploration,
        rarity: Legendary,
        kind: StarDust,
        target: 10000,
        planet_id: None,
        star_dust: 2000,
        reward_title: Some("Galaxy Tycoon"),
    },
];

/// Fresh, fully locked copy of the catalogue.
pub fn default_catalog() -> Vec<Achievement> {
    CATALOG.iter().map(AchievementDef::build).collect()
}

/// Overlays saved unlock state onto the current catalogue by id. Catalogue
/// order wins; definitions missing from `saved` start locked and saved ids
/// with no definition are dropped.
pub fn reconcile_catalog(saved: &[SavedAchievement]) -> Vec<Achievement> {
    let by_id: HashMap<&str, &SavedAchievement> =
        saved.iter().map(|s| (s.id.as_str(), s)).collect();

    let dropped = saved
        .iter()
        .filter(|s| !CATALOG.iter().any(|def| def.id == s.id))
        .count();
    if dropped > 0 {
        debug!(dropped, "saved achievements without a definition were dropped");
    }

    CATALOG
        .iter()
        .map(|def| {
            let mut achievement = def.build();
            if let Some(saved) = by_id.get(def.id) {
                achievement.is_unlocked = saved.is_unlocked;
                achievement.unlocked_at = saved.unlocked_at;
                achievement.progress = saved.progress.min(achievement.requirements.target);
            }
            achievement
        })
        .collect()
}

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Progress,
    Mastery,
    Exploration,
    Special,
}

impl AchievementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Progress => "progress",
            Self::Mastery => "mastery",
            Self::Exploration => "exploration",
            Self::Special => "special",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    LessonsCompleted,
    PlanetCompleted,
    PerfectScores,
    Streak,
    StarDust,
    TimeSpent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    #[serde(rename = "type")]
    pub kind: RequirementType,
    pub target: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar_concept: Option<String>,
}

impl Requirement {
    /// Raw counter this requirement measures. A planet requirement without a
    /// planet id measures nothing.
    pub fn current_value(&self, snapshot: &ProgressSnapshot) -> Option<u64> {
        match self.kind {
            RequirementType::LessonsCompleted => Some(snapshot.completed_lessons.len() as u64),
            RequirementType::PlanetCompleted => self
                .planet_id
                .as_ref()
                .map(|planet| u64::from(snapshot.completed_planets.contains(planet))),
            RequirementType::PerfectScores => Some(snapshot.perfect_scores),
            RequirementType::Streak => Some(snapshot.streak_count),
            RequirementType::StarDust => Some(snapshot.star_dust),
            RequirementType::TimeSpent => Some(snapshot.time_spent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub star_dust: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub category: AchievementCategory,
    pub rarity: Rarity,
    pub requirements: Requirement,
    pub reward: Reward,
    pub is_unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
    pub progress: u64,
}

impl Achievement {
    pub fn progress_percentage(&self) -> f64 {
        if self.is_unlocked {
            return 100.0;
        }
        let target = self.requirements.target;
        if target == 0 {
            return 100.0;
        }
        self.progress as f64 / target as f64 * 100.0
    }
}

/// Mutable part of an achievement as it appears in saved state. Extra fields
/// in the saved JSON are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAchievement {
    pub id: String,
    #[serde(default)]
    pub is_unlocked: bool,
    #[serde(default)]
    pub progress: u64,
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl From<&Achievement> for SavedAchievement {
    fn from(a: &Achievement) -> Self {
        Self {
            id: a.id.clone(),
            is_unlocked: a.is_unlocked,
            progress: a.progress,
            unlocked_at: a.unlocked_at,
        }
    }
}

/// Counters assembled by the game layer for achievement evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressSnapshot {
    pub completed_lessons: HashSet<String>,
    pub star_dust: u64,
    pub perfect_scores: u64,
    pub streak_count: u64,
    pub time_spent: u64,
    pub completed_planets: HashSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirement(kind: RequirementType, planet: Option<&str>) -> Requirement {
        Requirement {
            kind,
            target: 1,
            planet_id: planet.map(str::to_string),
            grammar_concept: None,
        }
    }

    #[test]
    fn test_current_value_per_type() {
        let snapshot = ProgressSnapshot {
            completed_lessons: ["l1".to_string(), "l2".to_string()].into_iter().collect(),
            star_dust: 40,
            perfect_scores: 3,
            streak_count: 2,
            time_spent: 99,
            completed_planets: ["planet-core".to_string()].into_iter().collect(),
        };

        assert_eq!(
            requirement(RequirementType::LessonsCompleted, None).current_value(&snapshot),
            Some(2)
        );
        assert_eq!(
            requirement(RequirementType::PlanetCompleted, Some("planet-core")).current_value(&snapshot),
            Some(1)
        );
        assert_eq!(
            requirement(RequirementType::PlanetCompleted, Some("planet-morph")).current_value(&snapshot),
            Some(0)
        );
        assert_eq!(
            requirement(RequirementType::PlanetCompleted, None).current_value(&snapshot),
            None
        );
        assert_eq!(requirement(RequirementType::StarDust, None).current_value(&snapshot), Some(40));
        assert_eq!(requirement(RequirementType::TimeSpent, None).current_value(&snapshot), Some(99));
    }

    #[test]
    fn test_snapshot_fields_default_when_missing() {
        let snapshot: ProgressSnapshot = serde_json::from_str(r#"{"starDust": 10000}"#).unwrap();
        assert_eq!(snapshot.star_dust, 10000);
        assert!(snapshot.completed_lessons.is_empty());
    }
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LearningSpeed {
    Slow,
    #[default]
    Average,
    Fast,
}

impl LearningSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Average => "average",
            Self::Fast => "fast",
        }
    }
}

/// One scored activity attempt, as produced by the lesson UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub lesson_id: String,
    pub activity_id: String,
    pub attempts: u32,
    pub correct_on_first_try: bool,
    /// Seconds.
    pub time_spent: f64,
    pub hints_used: u32,
    pub completed_at: DateTime<Utc>,
    pub difficulty: Difficulty,
    pub grammar_concept: String,
}

impl PerformanceRecord {
    /// Activity type is the token before the first hyphen of the activity id
    /// (`"drag-drop-nouns-1"` -> `"drag"`).
    pub fn activity_type(&self) -> &str {
        activity_type_of(&self.activity_id)
    }
}

pub fn activity_type_of(activity_id: &str) -> &str {
    activity_id.split('-').next().unwrap_or(activity_id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakData {
    pub current: u32,
    pub longest: u32,
    pub last_active_date: DateTime<Utc>,
}

impl StreakData {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            current: 0,
            longest: 0,
            last_active_date: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProfile {
    pub student_id: String,
    pub overall_difficulty: Difficulty,
    pub concept_mastery: BTreeMap<String, f64>,
    pub learning_speed: LearningSpeed,
    pub preferred_activity_types: Vec<String>,
    pub struggling_concepts: Vec<String>,
    pub mastered_concepts: Vec<String>,
    pub last_review_date: BTreeMap<String, DateTime<Utc>>,
    pub streak_data: StreakData,
}

impl LearningProfile {
    pub fn new(student_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            student_id: student_id.into(),
            overall_difficulty: Difficulty::Medium,
            concept_mastery: BTreeMap::new(),
            learning_speed: LearningSpeed::Average,
            preferred_activity_types: Vec::new(),
            struggling_concepts: Vec::new(),
            mastered_concepts: Vec::new(),
            last_review_date: BTreeMap::new(),
            streak_data: StreakData::new(now),
        }
    }

    pub fn mastery(&self, concept: &str) -> Option<f64> {
        self.concept_mastery.get(concept).copied()
    }

    pub fn is_struggling(&self, concept: &str) -> bool {
        self.struggling_concepts.iter().any(|c| c == concept)
    }

    pub fn is_mastered(&self, concept: &str) -> bool {
        self.mastered_concepts.iter().any(|c| c == concept)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Review,
    Advance,
    Practice,
    Hint,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub priority: Priority,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<RecommendationAction>,
}

use serde::Serialize;
use tracing::debug;

use crate::adaptive::types::LearningProfile;

pub const FALLBACK_CONCEPT: &str = "nouns";

const BEGINNER_BELOW: f64 = 0.3;
const INTERMEDIATE_BELOW: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HintTier {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy)]
pub struct HintSet {
    pub beginner: &'static str,
    pub intermediate: &'static str,
    pub advanced: &'static str,
}

impl HintSet {
    pub fn for_tier(&self, tier: HintTier) -> &'static str {
        match tier {
            HintTier::Beginner => self.beginner,
            HintTier::Intermediate => self.intermediate,
            HintTier::Advanced => self.advanced,
        }
    }
}

static HINT_TABLE: &[(&str, HintSet)] = &[
    (
        "nouns",
        HintSet {
            beginner: "Remember: A noun is a person, place, or thing! Look for words that name something.",
            intermediate: "Try asking 'What is this?' or 'Who is this?' to identify nouns in the sentence.",
            advanced: "Consider whether the word is concrete (you can touch it) or abstract (an idea or feeling).",
        },
    ),
    (
        "verbs",
        HintSet {
            beginner: "Verbs are action words! Look for what someone or something is doing.",
            intermediate: "Ask yourself: 'What is happening?' or 'What action is being performed?'",
            advanced: "Remember that verbs can show action, state of being, or help other verbs.",
        },
    ),
    (
        "adjectives",
        HintSet {
            beginner: "Adjectives describe nouns! They tell us what something looks, feels, or sounds like.",
            intermediate: "Look for words that answer 'What kind?' or 'How many?' about a noun.",
            advanced: "Consider the position: adjectives usually come before nouns or after linking verbs.",
        },
    ),
];

pub fn hint_set(concept: &str) -> Option<&'static HintSet> {
    HINT_TABLE
        .iter()
        .find(|(key, _)| *key == concept)
        .map(|(_, set)| set)
}

pub fn hint_tier(mastery: f64, is_struggling: bool) -> HintTier {
    if mastery < BEGINNER_BELOW || is_struggling {
        HintTier::Beginner
    } else if mastery < INTERMEDIATE_BELOW {
        HintTier::Intermediate
    } else {
        HintTier::Advanced
    }
}

/// Unrecognised concepts are answered from the "nouns" table.
pub fn personalized_hint(
    profile: &LearningProfile,
    concept: &str,
    activity_type: &str,
    default_mastery: f64,
) -> &'static str {
    let mastery = profile.mastery(concept).unwrap_or(default_mastery);
    let tier = hint_tier(mastery, profile.is_struggling(concept));

    let set = match hint_set(concept) {
        Some(set) => set,
        None => {
            debug!(concept, activity_type, "no hint table for concept, using fallback");
            hint_set(FALLBACK_CONCEPT).unwrap_or(&HINT_TABLE[0].1)
        }
    };

    set.for_tier(tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(hint_tier(0.29, false), HintTier::Beginner);
        assert_eq!(hint_tier(0.3, false), HintTier::Intermediate);
        assert_eq!(hint_tier(0.69, false), HintTier::Intermediate);
        assert_eq!(hint_tier(0.7, false), HintTier::Advanced);
        assert_eq!(hint_tier(0.95, true), HintTier::Beginner);
    }

    #[test]
    fn test_default_mastery_gives_intermediate() {
        let profile = LearningProfile::new("s", Utc::now());
        let hint = personalized_hint(&profile, "verbs", "typing", 0.5);
        assert_eq!(hint, hint_set("verbs").unwrap().intermediate);
    }

    #[test]
    fn test_unknown_concept_falls_back_to_nouns() {
        let mut profile = LearningProfile::new("s", Utc::now());
        profile.concept_mastery.insert("past tense".to_string(), 0.9);
        let hint = personalized_hint(&profile, "past tense", "typing", 0.5);
        assert_eq!(hint, hint_set("nouns").unwrap().advanced);
    }

    #[test]
    fn test_struggling_forces_beginner() {
        let mut profile = LearningProfile::new("s", Utc::now());
        profile.concept_mastery.insert("adjectives".to_string(), 0.75);
        profile.struggling_concepts.push("adjectives".to_string());
        let hint = personalized_hint(&profile, "adjectives", "matching", 0.5);
        assert_eq!(hint, hint_set("adjectives").unwrap().beginner);
    }
}

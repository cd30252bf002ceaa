use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::companion::evolution::CompanionEvolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanionMood {
    #[default]
    Happy,
    Excited,
    Sleepy,
    Curious,
}

impl CompanionMood {
    /// Emoji for this mood at the given evolution stage.
    pub fn emoji_for(&self, evolution: &CompanionEvolution) -> &'static str {
        let moods = &evolution.mood_variations;
        match self {
            Self::Happy => moods.happy,
            Self::Excited => moods.excited,
            Self::Sleepy => moods.sleepy,
            Self::Curious => moods.curious,
        }
    }
}

pub fn mood_from_activity(is_correct: bool) -> CompanionMood {
    mood_from_activity_with(&mut rand::rng(), is_correct)
}

/// Correct answers pick between happy and excited, misses between curious
/// and sleepy, each with even odds.
pub fn mood_from_activity_with<R: Rng + ?Sized>(rng: &mut R, is_correct: bool) -> CompanionMood {
    let coin = rng.random_bool(0.5);
    match (is_correct, coin) {
        (true, true) => CompanionMood::Happy,
        (true, false) => CompanionMood::Excited,
        (false, true) => CompanionMood::Curious,
        (false, false) => CompanionMood::Sleepy,
    }
}

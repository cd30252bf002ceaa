use serde::Serialize;

use crate::companion::evolution::{EvolutionProgress, UnlockKind, UnlockRequirement};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorOption {
    pub id: &'static str,
    pub name: &'static str,
    pub value: &'static str,
    pub unlock_requirement: UnlockRequirement,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryOption {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub unlock_requirement: UnlockRequirement,
}

pub static COLORS: &[ColorOption] = &[
    ColorOption {
        id: "default",
        name: "Natural",
        value: "default",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Lessons, 0),
    },
    ColorOption {
        id: "golden",
        name: "Golden",
        value: "filter: hue-rotate(45deg) saturate(1.5)",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Achievements, 5),
    },
    ColorOption {
        id: "rainbow",
        name: "Rainbow",
        value: "filter: hue-rotate(180deg) saturate(2)",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Planets, 3),
    },
    ColorOption {
        id: "cosmic",
        name: "Cosmic",
        value: "filter: hue-rotate(270deg) brightness(1.2)",
        unlock_requirement: UnlockRequirement::new(UnlockKind::StarDust, 5000),
    },
    ColorOption {
        id: "shadow",
        name: "Shadow",
        value: "filter: grayscale(0.5) contrast(1.5)",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Achievements, 10),
    },
];

pub static ACCESSORIES: &[AccessoryOption] = &[
    AccessoryOption {
        id: "none",
        name: "None",
        emoji: "",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Lessons, 0),
    },
    AccessoryOption {
        id: "crown",
        name: "Royal Crown",
        emoji: "👑",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Achievements, 3),
    },
    AccessoryOption {
        id: "glasses",
        name: "Smart Glasses",
        emoji: "🤓",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Lessons, 15),
    },
    AccessoryOption {
        id: "hat",
        name: "Wizard Hat",
        emoji: "🎩",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Planets, 2),
    },
    AccessoryOption {
        id: "bow",
        name: "Cute Bow",
        emoji: "🎀",
        unlock_requirement: UnlockRequirement::new(UnlockKind::StarDust, 2000),
    },
    AccessoryOption {
        id: "cape",
        name: "Hero Cape",
        emoji: "🦸",
        unlock_requirement: UnlockRequirement::new(UnlockKind::Achievements, 8),
    },
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnlockedCustomizations {
    pub colors: Vec<&'static ColorOption>,
    pub accessories: Vec<&'static AccessoryOption>,
}

/// Each option is checked on its own; unlike the evolution ladder there is
/// no ordering between them.
pub fn unlocked_customizations(progress: &EvolutionProgress) -> UnlockedCustomizations {
    UnlockedCustomizations {
        colors: COLORS
            .iter()
            .filter(|c| c.unlock_requirement.is_met(progress))
            .collect(),
        accessories: ACCESSORIES
            .iter()
            .filter(|a| a.unlock_requirement.is_met(progress))
            .collect(),
    }
}

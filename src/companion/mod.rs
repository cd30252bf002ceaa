pub mod customization;
pub mod evolution;
pub mod mood;

pub use customization::{unlocked_customizations, AccessoryOption, ColorOption, UnlockedCustomizations};
pub use evolution::{
    calculate_evolution_level, companion_evolution, evolution_level_on, next_evolution_requirement,
    CompanionEvolution, EvolutionProgress, UnlockKind, UnlockRequirement, EVOLUTION_LADDER,
};
pub use mood::{mood_from_activity, CompanionMood};

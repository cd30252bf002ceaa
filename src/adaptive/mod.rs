//! Adaptive learning layer: concept mastery, learner inference, difficulty
//! selection, hints and recommendations.

pub mod config;
pub mod difficulty;
pub mod engine;
pub mod hints;
pub mod inference;
pub mod mastery;
pub mod recommendations;
pub mod types;

pub use config::{EngineConfig, MasteryRuleKind};
pub use engine::AdaptiveLearningEngine;
pub use mastery::{IncrementalNudge, MasteryRule, RollingSuccessRate};
pub use types::*;

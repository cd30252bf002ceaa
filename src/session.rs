use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::achievements::{Achievement, AchievementManager, ProgressSnapshot};
use crate::adaptive::{AdaptiveLearningEngine, EngineConfig, LearningProfile, PerformanceRecord};
use crate::companion::{calculate_evolution_level, EvolutionProgress};
use crate::error::StoreResult;
use crate::persistence::{
    load_achievements, load_learning_profile, load_performance_history, save_achievements,
    save_learning_profile, save_performance_history, StateStore,
};

/// All mutations of one student's state go through a single session.
pub type SharedSession = Arc<Mutex<GameSession>>;

pub struct GameSession {
    engine: AdaptiveLearningEngine,
    achievements: AchievementManager,
    store: Box<dyn StateStore>,
}

impl GameSession {
    /// Restores the student's state from `store`, starting fresh for
    /// anything missing. When the stored profile belongs to another
    /// student, none of the stored blobs are used.
    pub fn load(store: Box<dyn StateStore>, student_id: &str, config: EngineConfig) -> StoreResult<Self> {
        let mut foreign = false;
        let profile = match load_learning_profile(store.as_ref())? {
            Some(profile) if profile.student_id == student_id => Some(profile),
            Some(profile) => {
                warn!(
                    stored = %profile.student_id,
                    requested = %student_id,
                    "stored state belongs to another student, starting fresh"
                );
                foreign = true;
                None
            }
            None => None,
        };

        let restored = profile.is_some();
        let mut engine = match profile {
            Some(profile) => AdaptiveLearningEngine::from_profile(profile, config),
            None => AdaptiveLearningEngine::with_config(student_id, config),
        };

        if restored {
            if let Some(history) = load_performance_history(store.as_ref())? {
                engine.load_performance_history(history);
            }
        }

        let achievements = if foreign {
            AchievementManager::new()
        } else {
            load_achievements(store.as_ref())?
        };

        info!(
            student_id,
            restored,
            foreign,
            unlocked = achievements.unlocked_count(),
            "game session loaded"
        );

        Ok(Self {
            engine,
            achievements,
            store,
        })
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn save(&self) -> StoreResult<()> {
        let store = self.store.as_ref();
        save_learning_profile(store, self.engine.learning_profile())?;
        save_performance_history(store, self.engine.performance_history())?;
        save_achievements(store, &self.achievements)?;
        Ok(())
    }

    pub fn record_performance(&mut self, record: PerformanceRecord) {
        self.engine.record_performance(record);
    }

    pub fn check_achievements(&mut self, snapshot: &ProgressSnapshot) -> Vec<Achievement> {
        self.achievements.check_achievements(snapshot)
    }

    /// Companion gates read lessons and planets from the snapshot and the
    /// achievement count from this session's unlocks.
    pub fn evolution_progress(&self, snapshot: &ProgressSnapshot) -> EvolutionProgress {
        EvolutionProgress {
            completed_lessons: snapshot.completed_lessons.len() as u64,
            completed_planets: snapshot.completed_planets.len() as u64,
            achievements: self.achievements.unlocked_count() as u64,
            star_dust: snapshot.star_dust,
        }
    }

    pub fn evolution_level(&self, snapshot: &ProgressSnapshot) -> u32 {
        calculate_evolution_level(&self.evolution_progress(snapshot))
    }

    pub fn profile(&self) -> &LearningProfile {
        self.engine.learning_profile()
    }

    pub fn engine(&self) -> &AdaptiveLearningEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AdaptiveLearningEngine {
        &mut self.engine
    }

    pub fn achievements(&self) -> &AchievementManager {
        &self.achievements
    }
}

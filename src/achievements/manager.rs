use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::achievements::catalog::{default_catalog, reconcile_catalog};
use crate::achievements::listeners::{Subscription, UnlockListeners};
use crate::achievements::types::{
    Achievement, AchievementCategory, ProgressSnapshot, Rarity, SavedAchievement,
};

const RECENT_LIMIT: usize = 5;

/// Owns one student's achievement catalogue: the ordered list plus an
/// id -> position index. Unlocks are one-way.
#[derive(Debug)]
pub struct AchievementManager {
    achievements: Vec<Achievement>,
    index: HashMap<String, usize>,
    listeners: UnlockListeners,
}

impl Default for AchievementManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementManager {
    pub fn new() -> Self {
        Self::from_catalog(default_catalog(), UnlockListeners::new())
    }

    /// Restores from saved state, reconciled against the current catalogue.
    pub fn from_saved(saved: &[SavedAchievement]) -> Self {
        Self::from_catalog(reconcile_catalog(saved), UnlockListeners::new())
    }

    /// Uses an externally owned listener registry, e.g. one shared with the
    /// notification layer.
    pub fn with_listeners(mut self, listeners: UnlockListeners) -> Self {
        self.listeners = listeners;
        self
    }

    fn from_catalog(achievements: Vec<Achievement>, listeners: UnlockListeners) -> Self {
        let index = achievements
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();
        Self {
            achievements,
            index,
            listeners,
        }
    }

    pub fn on_achievement_unlocked<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Achievement) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.index.get(id).and_then(|&i| self.achievements.get(i))
    }

    pub fn unlocked_achievements(&self) -> Vec<&Achievement> {
        self.achievements.iter().filter(|a| a.is_unlocked).collect()
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.is_unlocked).count()
    }

    pub fn check_achievements(&mut self, snapshot: &ProgressSnapshot) -> Vec<Achievement> {
        self.check_achievements_at(snapshot, Utc::now())
    }

    /// Evaluates every locked achievement against `snapshot`, records
    /// progress, and unlocks those whose target is met. Returns the newly
    /// unlocked ones in catalogue order; listeners fire as each unlocks.
    pub fn check_achievements_at(
        &mut self,
        snapshot: &ProgressSnapshot,
        now: DateTime<Utc>,
    ) -> Vec<Achievement> {
        let mut newly_unlocked = Vec::new();

        for achievement in self.achievements.iter_mut().filter(|a| !a.is_unlocked) {
            let target = achievement.requirements.target;
            let Some(current) = achievement.requirements.current_value(snapshot) else {
                continue;
            };

            achievement.progress = current.min(target);

            if current >= target {
                achievement.is_unlocked = true;
                achievement.unlocked_at = Some(now);
                info!(
                    achievement_id = %achievement.id,
                    category = achievement.category.as_str(),
                    rarity = achievement.rarity.as_str(),
                    star_dust = achievement.reward.star_dust,
                    "achievement unlocked"
                );
                self.listeners.notify(achievement);
                newly_unlocked.push(achievement.clone());
            }
        }

        debug!(unlocked = newly_unlocked.len(), "achievements checked");
        newly_unlocked
    }

    /// Percentage towards unlock; 100 once unlocked, 0 for unknown ids.
    pub fn achievement_progress(&self, id: &str) -> f64 {
        self.get(id)
            .map(Achievement::progress_percentage)
            .unwrap_or(0.0)
    }

    pub fn total_achievement_star_dust(&self) -> u64 {
        self.achievements
            .iter()
            .filter(|a| a.is_unlocked)
            .map(|a| a.reward.star_dust)
            .sum()
    }

    pub fn earned_titles(&self) -> Vec<&str> {
        self.achievements
            .iter()
            .filter(|a| a.is_unlocked)
            .filter_map(|a| a.reward.title.as_deref())
            .collect()
    }

    /// `None` selects every category.
    pub fn achievements_by_category(&self, category: Option<AchievementCategory>) -> Vec<&Achievement> {
        self.achievements
            .iter()
            .filter(|a| category.map_or(true, |c| a.category == c))
            .collect()
    }

    pub fn achievements_by_rarity(&self, rarity: Rarity) -> Vec<&Achievement> {
        self.achievements
            .iter()
            .filter(|a| a.rarity == rarity)
            .collect()
    }

    pub fn completion_percentage(&self) -> f64 {
        if self.achievements.is_empty() {
            return 0.0;
        }
        self.unlocked_count() as f64 / self.achievements.len() as f64 * 100.0
    }

    /// Relocks everything. Listeners stay registered.
    pub fn reset_achievements(&mut self) {
        info!("achievements reset");
        self.achievements = default_catalog();
    }

    /// Locked achievement closest to completion; the earlier one wins a tie.
    pub fn next_achievement(&self) -> Option<&Achievement> {
        let mut best: Option<&Achievement> = None;
        for achievement in self.achievements.iter().filter(|a| !a.is_unlocked) {
            match best {
                Some(current) if achievement.progress_percentage() <= current.progress_percentage() => {}
                _ => best = Some(achievement),
            }
        }
        best
    }

    /// Up to five most recently unlocked, newest first.
    pub fn recent_achievements(&self) -> Vec<&Achievement> {
        let mut unlocked: Vec<&Achievement> = self
            .achievements
            .iter()
            .filter(|a| a.is_unlocked && a.unlocked_at.is_some())
            .collect();
        unlocked.sort_by(|a, b| b.unlocked_at.cmp(&a.unlocked_at));
        unlocked.truncate(RECENT_LIMIT);
        unlocked
    }

    pub fn saved_state(&self) -> Vec<SavedAchievement> {
        self.achievements.iter().map(SavedAchievement::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn lessons(n: usize) -> ProgressSnapshot {
        ProgressSnapshot {
            completed_lessons: (0..n).map(|i| format!("lesson-{i}")).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_lesson_unlocks_first_steps() {
        let mut manager = AchievementManager::new();
        let unlocked = manager.check_achievements(&lessons(1));

        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "first-steps");
        assert_eq!(unlocked[0].reward.star_dust, 25);
        assert!(unlocked[0].unlocked_at.is_some());
        assert_eq!(manager.get("grammar-explorer").unwrap().progress, 1);
    }

    #[test]
    fn test_star_dust_unlocks_every_met_threshold() {
        let mut manager = AchievementManager::new();
        let snapshot = ProgressSnapshot {
            star_dust: 10000,
            ..Default::default()
        };
        let ids: Vec<String> = manager
            .check_achievements(&snapshot)
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["star-collector", "cosmic-treasurer", "galaxy-tycoon"]);
    }

    #[test]
    fn test_unlock_is_permanent() {
        let mut manager = AchievementManager::new();
        let rich = ProgressSnapshot {
            star_dust: 1500,
            ..Default::default()
        };
        manager.check_achievements(&rich);
        let unlocked_at = manager.get("star-collector").unwrap().unlocked_at;

        let spent = ProgressSnapshot {
            star_dust: 10,
            ..Default::default()
        };
        let again = manager.check_achievements(&spent);
        assert!(again.is_empty());

        let collector = manager.get("star-collector").unwrap();
        assert!(collector.is_unlocked);
        assert_eq!(collector.unlocked_at, unlocked_at);
        assert_eq!(collector.progress, 1000);
        assert_eq!(manager.get("cosmic-treasurer").unwrap().progress, 10);
    }

    #[test]
    fn test_planet_achievement() {
        let mut manager = AchievementManager::new();
        let snapshot = ProgressSnapshot {
            completed_planets: ["planet-morph".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let ids: Vec<String> = manager
            .check_achievements(&snapshot)
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["palace-royalty"]);
        assert_eq!(manager.earned_titles(), vec!["Royal Advisor"]);
        assert_eq!(manager.total_achievement_star_dust(), 200);
    }

    #[test]
    fn test_listeners_fire_per_unlock() {
        let mut manager = AchievementManager::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = manager.on_achievement_unlocked(move |a| sink.lock().push(a.id.clone()));

        manager.check_achievements(&lessons(10));
        assert_eq!(*seen.lock(), vec!["first-steps", "grammar-explorer"]);

        assert!(sub.unsubscribe());
        manager.check_achievements(&lessons(25));
        assert_eq!(seen.lock().len(), 2);
        assert!(manager.get("grammar-adventurer").unwrap().is_unlocked);
    }

    #[test]
    fn test_progress_and_completion_queries() {
        let mut manager = AchievementManager::new();
        manager.check_achievements(&lessons(5));

        assert_eq!(manager.achievement_progress("first-steps"), 100.0);
        assert_eq!(manager.achievement_progress("grammar-explorer"), 50.0);
        assert_eq!(manager.achievement_progress("no-such-id"), 0.0);

        let total = manager.achievements().len() as f64;
        assert!((manager.completion_percentage() - 100.0 / total).abs() < 1e-9);

        assert_eq!(manager.next_achievement().unwrap().id, "grammar-explorer");
        assert_eq!(
            manager.achievements_by_category(Some(AchievementCategory::Progress)).len(),
            4
        );
        assert_eq!(manager.achievements_by_category(None).len(), manager.achievements().len());
        assert_eq!(manager.achievements_by_rarity(Rarity::Legendary).len(), 3);
    }

    #[test]
    fn test_recent_newest_first_and_capped() {
        let mut manager = AchievementManager::new();
        let start = Utc::now();
        manager.check_achievements_at(&lessons(1), start);
        manager.check_achievements_at(
            &ProgressSnapshot {
                star_dust: 10000,
                streak_count: 30,
                ..Default::default()
            },
            start + Duration::minutes(1),
        );

        let recent = manager.recent_achievements();
        assert_eq!(recent.len(), 5);
        assert!(recent.iter().all(|a| a.id != "first-steps"));
    }

    #[test]
    fn test_reset_relocks() {
        let mut manager = AchievementManager::new();
        manager.check_achievements(&lessons(1));
        manager.reset_achievements();
        assert_eq!(manager.unlocked_count(), 0);
        assert!(manager.get("first-steps").is_some());
    }
}

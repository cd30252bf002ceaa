//! Achievement catalogue, unlock evaluation and unlock observers.

pub mod catalog;
pub mod listeners;
pub mod manager;
pub mod types;

pub use catalog::{default_catalog, reconcile_catalog};
pub use listeners::{Subscription, UnlockListener, UnlockListeners};
pub use manager::AchievementManager;
pub use types::*;

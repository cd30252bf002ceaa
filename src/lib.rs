pub mod achievements;
pub mod adaptive;
pub mod companion;
pub mod config;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod session;

pub use error::{StoreError, StoreResult};
pub use session::{GameSession, SharedSession};

//! Configuration module for the level-sniper agent.

mod deriv;
mod settings;
mod types;

// Re-export commonly used items
pub use deriv::{DERIV, DerivApiConfig};
pub use settings::{AlertParams, LevelParams, Settings, TelegramSettings};
pub use types::{Atr, Timeframe};

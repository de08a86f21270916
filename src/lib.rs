// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod notify;

pub use config::Settings;
pub use data::{DerivProvider, MarketDataProvider};
pub use engine::Sniper;
pub use notify::{LogSink, NotificationSink, TelegramNotifier};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run a single sweep and exit instead of looping
    #[arg(long, default_value_t = false)]
    pub once: bool,
}

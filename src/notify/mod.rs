pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;
use log::info;

pub use telegram::TelegramNotifier;

/// Where finished alerts go. One text in, best-effort delivery out.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, text: &str) -> Result<()>;
}

/// Fallback sink used when no Telegram credentials are configured: alerts
/// land in the log instead of vanishing.
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn deliver(&self, text: &str) -> Result<()> {
        info!("ALERT (unrouted): {text}");
        Ok(())
    }
}

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::debug;

use crate::config::TelegramSettings;
use crate::notify::NotificationSink;

/// Delivers alert text to a Telegram chat through the Bot API.
pub struct TelegramNotifier {
    client: reqwest::Client,
    url: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(settings: &TelegramSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("https://api.telegram.org/bot{}/sendMessage", settings.token),
            chat_id: settings.chat_id.clone(),
        }
    }
}

#[async_trait]
impl NotificationSink for TelegramNotifier {
    async fn deliver(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .form(&[("chat_id", self.chat_id.as_str()), ("text", text)])
            .send()
            .await
            .context("telegram request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("telegram rejected message: {status} {body}");
        }
        debug!("telegram message delivered");
        Ok(())
    }
}

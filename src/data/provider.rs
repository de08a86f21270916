use async_trait::async_trait;
use thiserror::Error;

use crate::config::Timeframe;
use crate::domain::Candle;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Connection, timeout, or wire-level trouble. Worth retrying.
    #[error("transport: {0}")]
    Transport(String),
    /// The upstream API rejected the request. Retrying won't help.
    #[error("api error {code}: {message}")]
    Api { code: String, message: String },
    /// The request succeeded but came back with no candles.
    #[error("no candles returned")]
    Empty,
}

/// Abstract interface for fetching market data.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch the most recent `count` closed candles for one symbol and
    /// timeframe, oldest first.
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>, ProviderError>;
}

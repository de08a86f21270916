use crate::config::Timeframe;
use crate::domain::Candle;

/// Ordered candle history for one (symbol, timeframe) pair, most recent last.
/// Fetched fresh every scan and dropped afterwards; nothing mutates it.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    pub symbol: String,
    pub timeframe: Timeframe,
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe, candles: Vec<Candle>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            candles,
        }
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Timestamps must be strictly increasing; a provider handing back
    /// shuffled or duplicated candles poisons every windowed computation.
    pub fn is_strictly_ordered(&self) -> bool {
        self.candles
            .windows(2)
            .all(|w| w[0].timestamp_ms < w[1].timestamp_ms)
    }

    pub fn last_close(&self) -> Option<f64> {
        self.candles.last().map(|c| c.close_price)
    }

    /// Close of the bar before the latest one.
    pub fn prev_close(&self) -> Option<f64> {
        let n = self.candles.len();
        if n < 2 {
            return None;
        }
        Some(self.candles[n - 2].close_price)
    }

    pub fn last_timestamp_ms(&self) -> Option<i64> {
        self.candles.last().map(|c| c.timestamp_ms)
    }
}

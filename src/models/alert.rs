use chrono::{DateTime, Utc};

use crate::config::{Atr, Timeframe};
use crate::models::PivotKind;

/// Identity used for cooldown deduplication. Level centroids drift a little
/// between scans, so the price is bucketed to cents before it becomes part
/// of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertKey {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub kind: PivotKind,
    price_bucket: i64,
}

impl AlertKey {
    pub fn new(symbol: &str, timeframe: Timeframe, kind: PivotKind, level_price: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            timeframe,
            kind,
            price_bucket: (level_price * 100.0).round() as i64,
        }
    }
}

/// One approach alert, produced and dispatched within a single scan.
#[derive(Debug, Clone)]
pub struct AlertEvent {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub kind: PivotKind,
    pub level_price: f64,
    pub touch_count: usize,
    pub current_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub rr_ratio: f64,
    pub atr: Atr,
    pub timestamp_ms: i64,
}

impl AlertEvent {
    pub fn key(&self) -> AlertKey {
        AlertKey::new(&self.symbol, self.timeframe, self.kind, self.level_price)
    }

    /// Operator-facing message text: symbol, timeframe, kind, level,
    /// touches, SL, TP, R/R, ATR and the closing bar's time.
    pub fn message(&self) -> String {
        let emoji = match self.kind {
            PivotKind::Support => "\u{1F4C8}",    // chart up
            PivotKind::Resistance => "\u{1F4C9}", // chart down
        };
        let when = DateTime::<Utc>::from_timestamp_millis(self.timestamp_ms)
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        format!(
            "{emoji} {} {} | approaching {} ~ {:.2} (touches={})\n\
             SL: {:.2} | TP: {:.2} | R/R=1:{:.0} | ATR={:.2}\n\
             bar closed {when}",
            self.symbol,
            self.timeframe,
            self.kind,
            self.level_price,
            self.touch_count,
            self.stop_loss,
            self.take_profit,
            self.rr_ratio,
            self.atr.value(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_stable_under_small_centroid_drift() {
        let a = AlertKey::new("R_50", Timeframe::H1, PivotKind::Support, 100.001);
        let b = AlertKey::new("R_50", Timeframe::H1, PivotKind::Support, 100.004);
        assert_eq!(a, b);

        let c = AlertKey::new("R_50", Timeframe::H1, PivotKind::Support, 100.10);
        assert_ne!(a, c);
    }

    #[test]
    fn message_carries_the_operator_fields() {
        let event = AlertEvent {
            symbol: "R_50".into(),
            timeframe: Timeframe::H1,
            kind: PivotKind::Support,
            level_price: 100.0,
            touch_count: 5,
            current_price: 99.92,
            stop_loss: 99.9,
            take_profit: 100.12,
            rr_ratio: 10.0,
            atr: Atr::new(0.10),
            timestamp_ms: 0,
        };
        let msg = event.message();
        assert!(msg.contains("R_50"));
        assert!(msg.contains("1h"));
        assert!(msg.contains("SUPPORT"));
        assert!(msg.contains("touches=5"));
        assert!(msg.contains("SL: 99.90"));
        assert!(msg.contains("TP: 100.12"));
        assert!(msg.contains("R/R=1:10"));
        assert!(msg.contains("ATR=0.10"));
        assert!(msg.contains("1970-01-01 00:00 UTC"));
    }
}

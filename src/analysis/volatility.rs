use crate::config::Atr;
use crate::models::CandleSeries;

/// Average true range over the most recent `period` bars.
///
/// TR(i) = max(high-low, |high-prev_close|, |low-prev_close|); the result is
/// the simple mean of the last `period` TRs, NOT Wilder's smoothed average.
/// Returns `None` when fewer than `period + 1` bars exist (each TR needs the
/// previous close).
pub fn average_true_range(series: &CandleSeries, period: usize) -> Option<Atr> {
    let candles = series.candles();
    let n = candles.len();
    if period == 0 || n < period + 1 {
        return None;
    }

    let mut sum = 0.0;
    for i in (n - period)..n {
        let high = candles[i].high_price;
        let low = candles[i].low_price;
        let prev_close = candles[i - 1].close_price;

        let tr = (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs());
        sum += tr;
    }

    Some(Atr::new(sum / period as f64))
}

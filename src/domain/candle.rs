// Define the CandleType enum
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CandleType {
    Bullish,
    Bearish,
}

/// One OHLC candle. Deriv's synthetic indices carry no volume, so there is
/// none here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub timestamp_ms: i64,

    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
}

impl Candle {
    pub fn new(timestamp_ms: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Candle {
            timestamp_ms,
            open_price: open,
            high_price: high,
            low_price: low,
            close_price: close,
        }
    }

    // A method to determine the type of candle
    pub fn get_type(&self) -> CandleType {
        if self.close_price >= self.open_price {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    // Returns the low and high of the candle body as a tuple
    pub fn body_range(&self) -> (f64, f64) {
        match self.get_type() {
            CandleType::Bullish => (self.open_price, self.close_price),
            CandleType::Bearish => (self.close_price, self.open_price),
        }
    }

    /// Full high-to-low extent. Zero for a degenerate flat candle.
    pub fn range(&self) -> f64 {
        self.high_price - self.low_price
    }

    pub fn body_len(&self) -> f64 {
        (self.close_price - self.open_price).abs()
    }

    /// Length of the wick above the body.
    pub fn upper_wick_len(&self) -> f64 {
        self.high_price - self.body_range().1
    }

    /// Length of the wick below the body.
    pub fn lower_wick_len(&self) -> f64 {
        self.body_range().0 - self.low_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wick_lengths_split_around_the_body() {
        // Bearish candle: open 101, close 100, high 102, low 99.
        let c = Candle::new(0, 101.0, 102.0, 99.0, 100.0);
        assert_eq!(c.get_type(), CandleType::Bearish);
        assert_eq!(c.upper_wick_len(), 1.0);
        assert_eq!(c.lower_wick_len(), 1.0);
        assert_eq!(c.body_len(), 1.0);
        assert_eq!(c.range(), 3.0);
    }
}

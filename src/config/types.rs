//! Small value types shared across config and analysis.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Default)]
pub enum Timeframe {
    M15,
    M30,
    #[default]
    H1,
    H4,
    D1,
}

impl Timeframe {
    /// Candle granularity in seconds, as the Deriv `ticks_history` API expects it.
    pub fn granularity_secs(&self) -> u32 {
        match self {
            Self::M15 => 900,
            Self::M30 => 1800,
            Self::H1 => 3600,
            Self::H4 => 14_400,
            Self::D1 => 86_400,
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::M15 => write!(f, "15m"),
            Self::M30 => write!(f, "30m"),
            Self::H1 => write!(f, "1h"),
            Self::H4 => write!(f, "4h"),
            Self::D1 => write!(f, "1d"),
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "15m" => Ok(Self::M15),
            "30m" => Ok(Self::M30),
            "1h" => Ok(Self::H1),
            "4h" => Ok(Self::H4),
            "1d" => Ok(Self::D1),
            other => Err(format!("unsupported timeframe: {other}")),
        }
    }
}

/// Average true range in absolute price units. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Atr(f64);

impl Atr {
    pub const MIN_EPSILON: f64 = 1e-9;

    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 { 0.0 } else { val };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// A flat or degenerate series produces an ATR of zero; everything
    /// downstream divides or scales by it, so treat that as "no signal".
    pub fn is_usable(self) -> bool {
        self.0 > Self::MIN_EPSILON
    }
}

impl std::fmt::Display for Atr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn timeframe_round_trips_through_labels() {
        for tf in Timeframe::iter() {
            assert_eq!(tf.to_string().parse::<Timeframe>(), Ok(tf));
        }
    }

    #[test]
    fn atr_clamps_negative_and_flags_degenerate() {
        assert_eq!(Atr::new(-0.5).value(), 0.0);
        assert!(!Atr::new(0.0).is_usable());
        assert!(Atr::new(0.1).is_usable());
    }
}

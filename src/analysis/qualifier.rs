use crate::config::{Atr, LevelParams};
use crate::domain::Candle;
use crate::models::{CandleSeries, Level, Pivot, PivotKind};

/// Weighting between wick length and body smallness in the rejection score.
const WICK_WEIGHT: f64 = 0.7;
const BODY_WEIGHT: f64 = 0.3;

/// Evidence pivots a level needs in strict mode.
const MIN_STRONG_TOUCHES: usize = 2;

/// Filter clustered levels down to the ones worth watching.
///
/// Every level must have at least `min_touches` members. In strict mode a
/// level additionally needs `MIN_STRONG_TOUCHES` members whose bars closed
/// near the centroid, show a rejection wick, and were preceded by momentum
/// into the level. Survivors come back ranked by distance to the latest
/// close, nearest first; capping to a top-N is the caller's choice, so the
/// strict result is always a subset of the loose one.
pub fn qualify_levels(
    series: &CandleSeries,
    mut levels: Vec<Level>,
    atr: Atr,
    params: &LevelParams,
) -> Vec<Level> {
    levels.retain(|level| level.touch_count() >= params.min_touches);

    if params.strict {
        levels.retain(|level| {
            let strong = level
                .members
                .iter()
                .filter(|pivot| is_strong_touch(series, level, pivot, atr, params))
                .count();
            strong >= MIN_STRONG_TOUCHES
        });
    }

    if let Some(last_close) = series.last_close() {
        levels.sort_by(|a, b| {
            (a.price - last_close)
                .abs()
                .total_cmp(&(b.price - last_close).abs())
        });
    }
    levels
}

/// A touch is strong when the touching bar closed near the centroid, rejected
/// the level with a wick, and was preceded by momentum into the level.
fn is_strong_touch(
    series: &CandleSeries,
    level: &Level,
    pivot: &Pivot,
    atr: Atr,
    params: &LevelParams,
) -> bool {
    let candles = series.candles();
    let Some(candle) = candles.get(pivot.index) else {
        return false;
    };

    // A pivot that clustered geometrically but whose bar closed far from the
    // level is weak evidence.
    let close_tol = (params.touch_atr * atr.value()).max(params.cluster_pct * level.price);
    if (candle.close_price - level.price).abs() > close_tol {
        return false;
    }

    if wick_rejection_score(candle, level.kind) < params.wick_score_min {
        return false;
    }

    momentum_confirms(candles, pivot.index, level.kind, params)
}

/// Score in [0, 1]: how hard the bar rejected the level. Long wick on the
/// level side and a small body both raise it. Zero-range bars score 0.
pub fn wick_rejection_score(candle: &Candle, kind: PivotKind) -> f64 {
    let range = candle.range();
    if range <= 0.0 {
        return 0.0;
    }
    let wick = match kind {
        PivotKind::Support => candle.lower_wick_len(),
        PivotKind::Resistance => candle.upper_wick_len(),
    };
    let score = WICK_WEIGHT * (wick / range) + BODY_WEIGHT * (1.0 - candle.body_len() / range);
    score.clamp(0.0, 1.0)
}

/// Close-over-close confirmation: of the `momentum_look` bars immediately
/// preceding the touch, at least `momentum_ratio` must step toward the level
/// (closes falling into support, rising into resistance). A touch too early
/// in the series has no history to confirm with.
fn momentum_confirms(
    candles: &[Candle],
    touch_index: usize,
    kind: PivotKind,
    params: &LevelParams,
) -> bool {
    let look = params.momentum_look;
    if look == 0 || touch_index <= look {
        return false;
    }

    let toward = (touch_index - look..touch_index)
        .filter(|&j| {
            let step = candles[j].close_price - candles[j - 1].close_price;
            match kind {
                PivotKind::Support => step < 0.0,
                PivotKind::Resistance => step > 0.0,
            }
        })
        .count();

    toward as f64 / look as f64 >= params.momentum_ratio
}

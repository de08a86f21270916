use crate::models::{CandleSeries, Pivot, PivotKind};

/// Extract local extrema confirmed by `span` bars on each side.
///
/// Bar `i` is a resistance pivot when its high is >= every high in
/// `[i - span, i + span]`, and a support pivot when its low is <= every low
/// in that window. Ties count, so a flat shelf produces a pivot per bar.
/// The first and last `span` bars can never confirm and are skipped.
pub fn find_pivots(series: &CandleSeries, span: usize) -> Vec<Pivot> {
    let candles = series.candles();
    let n = candles.len();
    if span == 0 || n < 2 * span + 1 {
        return Vec::new();
    }

    let mut pivots = Vec::new();
    for i in span..(n - span) {
        let window = &candles[i - span..=i + span];

        let high = candles[i].high_price;
        if window.iter().all(|c| c.high_price <= high) {
            pivots.push(Pivot {
                index: i,
                price: high,
                kind: PivotKind::Resistance,
            });
        }

        let low = candles[i].low_price;
        if window.iter().all(|c| c.low_price >= low) {
            pivots.push(Pivot {
                index: i,
                price: low,
                kind: PivotKind::Support,
            });
        }
    }
    pivots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timeframe;
    use crate::domain::Candle;

    fn series_from_ranges(bars: &[(f64, f64)]) -> CandleSeries {
        let candles = bars
            .iter()
            .enumerate()
            .map(|(i, &(high, low))| {
                let mid = (high + low) / 2.0;
                Candle::new(i as i64 * 1000, mid, high, low, mid)
            })
            .collect();
        CandleSeries::new("R_10", Timeframe::H1, candles)
    }

    #[test]
    fn isolated_peak_and_trough_are_found() {
        // Highs ramp to a peak at index 3; lows dip to a trough at index 7.
        let s = series_from_ranges(&[
            (10.0, 9.0),
            (11.0, 9.1),
            (12.0, 9.2),
            (15.0, 9.3), // peak high
            (12.0, 9.2),
            (11.5, 8.0),
            (11.2, 7.0),
            (11.0, 5.0), // trough low
            (11.3, 7.0),
            (11.6, 8.0),
        ]);
        let pivots = find_pivots(&s, 2);

        let resistances: Vec<_> = pivots
            .iter()
            .filter(|p| p.kind == PivotKind::Resistance)
            .collect();
        assert_eq!(resistances.len(), 1);
        assert_eq!(resistances[0].index, 3);
        assert!((resistances[0].price - 15.0).abs() < 1e-12);

        let supports: Vec<_> = pivots
            .iter()
            .filter(|p| p.kind == PivotKind::Support)
            .collect();
        assert_eq!(supports.len(), 1);
        assert_eq!(supports[0].index, 7);
        assert!((supports[0].price - 5.0).abs() < 1e-12);
    }

    #[test]
    fn edges_never_confirm() {
        // Global extremes sit in the first and last bars.
        let s = series_from_ranges(&[
            (20.0, 1.0),
            (10.0, 9.0),
            (10.0, 9.0),
            (10.0, 9.0),
            (25.0, 0.5),
        ]);
        let pivots = find_pivots(&s, 2);
        assert!(pivots.iter().all(|p| p.index != 0 && p.index != 4));
    }

    #[test]
    fn monotone_slope_has_no_pivots() {
        let bars: Vec<(f64, f64)> = (0..10)
            .map(|i| (10.0 + i as f64, 9.0 + i as f64))
            .collect();
        let pivots = find_pivots(&series_from_ranges(&bars), 2);
        assert!(pivots.is_empty());
    }

    #[test]
    fn short_series_yields_nothing() {
        let s = series_from_ranges(&[(10.0, 9.0), (11.0, 8.0), (10.0, 9.0), (10.0, 9.0)]);
        assert!(find_pivots(&s, 2).is_empty());
    }

    #[test]
    fn every_reported_pivot_is_a_window_extreme_on_noisy_series() {
        // Deterministic LCG noise; brute-force re-check of the pivot
        // contract on each reported pivot, plus completeness the other way.
        let mut state: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) as f64 / (u32::MAX as f64)) - 0.5
        };

        let span = 2;
        let bars: Vec<(f64, f64)> = (0..120)
            .map(|_| {
                let mid = 100.0 + next() * 4.0;
                let spread = 0.2 + next().abs();
                (mid + spread, mid - spread)
            })
            .collect();
        let s = series_from_ranges(&bars);
        let pivots = find_pivots(&s, span);
        assert!(!pivots.is_empty(), "noise should produce some pivots");

        for p in &pivots {
            let window = &bars[p.index - span..=p.index + span];
            match p.kind {
                PivotKind::Resistance => {
                    assert!(window.iter().all(|&(h, _)| h <= p.price));
                    assert_eq!(p.price, bars[p.index].0);
                }
                PivotKind::Support => {
                    assert!(window.iter().all(|&(_, l)| l >= p.price));
                    assert_eq!(p.price, bars[p.index].1);
                }
            }
        }

        // Completeness: every interior window extreme is reported.
        for i in span..bars.len() - span {
            let window = &bars[i - span..=i + span];
            if window.iter().all(|&(h, _)| h <= bars[i].0) {
                assert!(pivots.iter().any(|p| p.index == i && p.kind == PivotKind::Resistance));
            }
            if window.iter().all(|&(_, l)| l >= bars[i].1) {
                assert!(pivots.iter().any(|p| p.index == i && p.kind == PivotKind::Support));
            }
        }
    }

    #[test]
    fn flat_shelf_ties_count_as_pivots() {
        let s = series_from_ranges(&[(10.0, 9.0); 7]);
        let pivots = find_pivots(&s, 2);
        // Interior bars 2..=4, each both a support and a resistance.
        assert_eq!(pivots.len(), 6);
    }
}

use crate::config::{AlertParams, Atr};
use crate::models::{Level, PivotKind};

/// Half-width of the alert zone around a level: the larger of a fixed price
/// fraction and an ATR fraction, so quiet markets still get a floor and
/// volatile ones widen with the tape.
pub fn proximity_tolerance(price: f64, atr: Atr, params: &AlertParams) -> f64 {
    (price * params.max_distance_pct).max(atr.value() * params.near_atr)
}

/// True when the latest close just entered the level's zone.
///
/// Three conditions, all on closes: the current close is inside the zone,
/// the previous close was outside it, and the move shrank the distance to
/// the level. Sitting inside the zone bar after bar fires once, on entry.
pub fn detect_approach(prev_close: f64, curr_close: f64, level_price: f64, tolerance: f64) -> bool {
    let d_curr = (curr_close - level_price).abs();
    let d_prev = (prev_close - level_price).abs();
    d_curr <= tolerance && d_prev > tolerance && d_curr < d_prev
}

/// Protective stop and target for a touch of `level`.
///
/// The stop sits `sl_atr_factor * ATR` beyond the level (below support,
/// above resistance); the target pays `rr_ratio` times the risk from the
/// current price.
pub fn stop_and_target(level: &Level, curr_close: f64, atr: Atr, params: &AlertParams) -> (f64, f64) {
    let offset = params.sl_atr_factor * atr.value();
    match level.kind {
        PivotKind::Support => {
            let sl = level.price - offset;
            let tp = curr_close + (curr_close - sl) * params.rr_ratio;
            (sl, tp)
        }
        PivotKind::Resistance => {
            let sl = level.price + offset;
            let tp = curr_close - (sl - curr_close) * params.rr_ratio;
            (sl, tp)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pivot;

    fn level(price: f64, kind: PivotKind) -> Level {
        Level::seed(Pivot {
            index: 0,
            price,
            kind,
        })
    }

    #[test]
    fn tolerance_takes_the_wider_of_the_two_scales() {
        let params = AlertParams {
            max_distance_pct: 0.001,
            near_atr: 0.2,
            ..AlertParams::default()
        };
        // Price floor dominates a sleepy ATR.
        let t = proximity_tolerance(100.0, Atr::new(0.1), &params);
        assert!((t - 0.1).abs() < 1e-12);
        // A hot ATR dominates the floor.
        let t = proximity_tolerance(100.0, Atr::new(5.0), &params);
        assert!((t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fires_only_on_zone_entry_toward_the_level() {
        let tol = 0.1;
        // Entering from outside, moving toward the level.
        assert!(detect_approach(100.5, 100.05, 100.0, tol));
        // Already inside last bar: no repeat.
        assert!(!detect_approach(100.05, 100.02, 100.0, tol));
        // Blew straight through and out the other side.
        assert!(!detect_approach(100.11, 99.88, 100.0, tol));
        // Still outside.
        assert!(!detect_approach(100.5, 100.3, 100.0, tol));
    }

    #[test]
    fn approach_works_from_either_side() {
        let tol = 0.1;
        assert!(detect_approach(99.5, 99.95, 100.0, tol));
        assert!(detect_approach(100.5, 100.05, 100.0, tol));
    }

    #[test]
    fn support_stop_sits_below_and_target_above() {
        let params = AlertParams {
            sl_atr_factor: 1.0,
            rr_ratio: 10.0,
            ..AlertParams::default()
        };
        let (sl, tp) = stop_and_target(&level(100.0, PivotKind::Support), 100.05, Atr::new(0.2), &params);
        assert!((sl - 99.8).abs() < 1e-12);
        assert!((tp - (100.05 + 0.25 * 10.0)).abs() < 1e-12);
    }

    #[test]
    fn resistance_stop_sits_above_and_target_below() {
        let params = AlertParams {
            sl_atr_factor: 1.0,
            rr_ratio: 10.0,
            ..AlertParams::default()
        };
        let (sl, tp) = stop_and_target(&level(100.0, PivotKind::Resistance), 99.95, Atr::new(0.2), &params);
        assert!((sl - 100.2).abs() < 1e-12);
        assert!((tp - (99.95 - 0.25 * 10.0)).abs() < 1e-12);
    }
}

use std::time::Instant;

use log::{debug, warn};

use crate::analysis::{
    average_true_range, cluster_levels, detect_approach, find_pivots, proximity_tolerance,
    qualify_levels, stop_and_target,
};
use crate::config::{AlertParams, LevelParams};
use crate::engine::CooldownRegistry;
use crate::models::{AlertEvent, CandleSeries};

/// Run the full detection pipeline over one series and return the alerts
/// that cleared the cooldown. Pure apart from the registry mutation, so the
/// whole path is testable with synthetic candles and a pinned `now`.
///
/// Stages: sanity-check the series, compute ATR, extract and cluster pivots,
/// qualify levels, then test the last two closes against each level's zone.
pub fn scan_series(
    series: &CandleSeries,
    levels: &LevelParams,
    alerts: &AlertParams,
    cooldowns: &mut CooldownRegistry,
    now: Instant,
) -> Vec<AlertEvent> {
    let needed = levels.atr_period + 2 * levels.pivot_span + 2;
    if series.len() < needed {
        debug!(
            "{} {}: only {} bars, need {}",
            series.symbol,
            series.timeframe,
            series.len(),
            needed
        );
        return Vec::new();
    }
    if !series.is_strictly_ordered() {
        warn!(
            "{} {}: candle timestamps not strictly increasing, skipping scan",
            series.symbol, series.timeframe
        );
        return Vec::new();
    }

    let Some(atr) = average_true_range(series, levels.atr_period) else {
        return Vec::new();
    };
    if !atr.is_usable() {
        debug!(
            "{} {}: ATR {} unusable, market flat",
            series.symbol, series.timeframe, atr
        );
        return Vec::new();
    }

    let (Some(curr_close), Some(prev_close), Some(ts)) =
        (series.last_close(), series.prev_close(), series.last_timestamp_ms())
    else {
        return Vec::new();
    };

    let pivots = find_pivots(series, levels.pivot_span);
    let cluster_tol = (curr_close * levels.cluster_pct).max(atr.value() * levels.cluster_atr);
    let clustered = cluster_levels(&pivots, cluster_tol);
    let mut qualified = qualify_levels(series, clustered, atr, levels);
    // Qualification ranks nearest-first; bound alert volume here.
    qualified.truncate(levels.max_levels);
    debug!(
        "{} {}: {} pivots -> {} qualified levels (ATR {})",
        series.symbol,
        series.timeframe,
        pivots.len(),
        qualified.len(),
        atr
    );

    let mut events = Vec::new();
    let tol = proximity_tolerance(curr_close, atr, alerts);
    for level in &qualified {
        if !detect_approach(prev_close, curr_close, level.price, tol) {
            continue;
        }

        let (stop_loss, take_profit) = stop_and_target(level, curr_close, atr, alerts);
        let event = AlertEvent {
            symbol: series.symbol.clone(),
            timeframe: series.timeframe,
            kind: level.kind,
            level_price: level.price,
            touch_count: level.touch_count(),
            current_price: curr_close,
            stop_loss,
            take_profit,
            rr_ratio: alerts.rr_ratio,
            atr,
            timestamp_ms: ts,
        };

        let key = event.key();
        if cooldowns.is_suppressed(&key, alerts.cooldown, now) {
            debug!(
                "{} {}: {} {:.2} still cooling down",
                series.symbol, series.timeframe, level.kind, level.price
            );
            continue;
        }
        cooldowns.mark_fired(key, now);
        events.push(event);
    }
    events
}

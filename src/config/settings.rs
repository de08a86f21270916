//! Environment-sourced runtime settings.
//!
//! Every knob has a default so a bare `DERIV_APP_ID=... level-sniper` run
//! works; missing credentials for the quote provider are the only fatal
//! startup condition.

use anyhow::{Context, Result, bail};
use std::str::FromStr;
use std::time::Duration;
use strum::IntoEnumIterator;

use crate::config::Timeframe;

const DEFAULT_SYMBOLS: &[&str] = &[
    "R_10", "R_25", "R_50", "R_75", "R_100", "JD10", "JD25", "JD50", "JD100",
];

/// Level detection knobs (pivot extraction, clustering, qualification).
#[derive(Debug, Clone)]
pub struct LevelParams {
    /// ATR lookback period.
    pub atr_period: usize,
    /// Neighborhood half-width for pivot confirmation.
    pub pivot_span: usize,
    /// Percent-of-price floor for the clustering tolerance.
    pub cluster_pct: f64,
    /// ATR multiple for the clustering tolerance.
    pub cluster_atr: f64,
    /// Minimum pivots merged into a level before it is reported.
    pub min_touches: usize,
    /// Strict mode: require wick-rejection and momentum evidence on top of
    /// the touch count.
    pub strict: bool,
    /// ATR multiple for the proximity-at-touch evidence check.
    pub touch_atr: f64,
    /// Minimum wick-rejection score for a touch to count as evidence.
    pub wick_score_min: f64,
    /// Bars inspected before a touch for momentum confirmation.
    pub momentum_look: usize,
    /// Fraction of those bars that must close toward the level.
    pub momentum_ratio: f64,
    /// Cap on reported levels per (symbol, timeframe), nearest first.
    pub max_levels: usize,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            atr_period: 14,
            pivot_span: 2,
            cluster_pct: 0.002,
            cluster_atr: 0.5,
            min_touches: 3,
            strict: false,
            touch_atr: 0.5,
            wick_score_min: 0.6,
            momentum_look: 5,
            momentum_ratio: 0.7,
            max_levels: 4,
        }
    }
}

/// Approach-alert policy knobs.
#[derive(Debug, Clone)]
pub struct AlertParams {
    /// Percent-of-price floor for the proximity zone.
    pub max_distance_pct: f64,
    /// ATR multiple for the proximity zone.
    pub near_atr: f64,
    /// ATR multiple placed behind the level for the suggested stop.
    pub sl_atr_factor: f64,
    /// Fixed reward-to-risk ratio for the suggested target.
    pub rr_ratio: f64,
    /// Minimum wall-clock gap between repeats of the same alert key.
    pub cooldown: Duration,
}

impl Default for AlertParams {
    fn default() -> Self {
        Self {
            max_distance_pct: 0.001,
            near_atr: 0.2,
            sl_atr_factor: 1.0,
            rr_ratio: 10.0,
            cooldown: Duration::from_secs(180),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelegramSettings {
    pub token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub deriv_app_id: String,
    pub deriv_token: Option<String>,
    /// Absent when either TG_TOKEN or TG_CHAT is missing; alerts then go to
    /// the log only.
    pub telegram: Option<TelegramSettings>,
    pub symbols: Vec<String>,
    pub timeframes: Vec<Timeframe>,
    pub lookback_bars: usize,
    pub scan_interval: Duration,
    pub levels: LevelParams,
    pub alerts: AlertParams,
}

fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn var_parsed<T: FromStr>(key: &str, default: T) -> Result<T> {
    match var(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{key} has unparseable value {raw:?}")),
    }
}

fn var_bool(key: &str, default: bool) -> Result<bool> {
    match var(key).as_deref().map(str::trim) {
        None => Ok(default),
        Some("1") | Some("true") | Some("yes") => Ok(true),
        Some("0") | Some("false") | Some("no") => Ok(false),
        Some(other) => bail!("{key} has unparseable value {other:?}"),
    }
}

impl Settings {
    /// Build settings from the process environment. Fatal on a missing
    /// `DERIV_APP_ID` or any unparseable value; everything else defaults.
    pub fn from_env() -> Result<Self> {
        let deriv_app_id =
            var("DERIV_APP_ID").context("DERIV_APP_ID is required (register at api.deriv.com)")?;
        let deriv_token = var("DERIV_TOKEN");

        let telegram = match (var("TG_TOKEN"), var("TG_CHAT")) {
            (Some(token), Some(chat_id)) => Some(TelegramSettings { token, chat_id }),
            (None, None) => None,
            _ => {
                log::warn!("Only one of TG_TOKEN / TG_CHAT is set; Telegram delivery disabled");
                None
            }
        };

        let symbols = match var("SYMBOLS") {
            None => DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            Some(raw) => {
                let list: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                if list.is_empty() {
                    bail!("SYMBOLS is set but contains no symbols");
                }
                list
            }
        };

        let timeframes = match var("TIMEFRAMES") {
            None => Timeframe::iter().collect(),
            Some(raw) => {
                let list: Vec<Timeframe> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.parse().map_err(anyhow::Error::msg))
                    .collect::<Result<_>>()
                    .context("TIMEFRAMES must be a comma list from {15m,30m,1h,4h,1d}")?;
                if list.is_empty() {
                    bail!("TIMEFRAMES is set but contains no timeframes");
                }
                list
            }
        };

        let defaults_levels = LevelParams::default();
        let levels = LevelParams {
            atr_period: var_parsed("ATR_PERIOD", defaults_levels.atr_period)?,
            pivot_span: var_parsed("PIVOT_SPAN", defaults_levels.pivot_span)?,
            cluster_pct: var_parsed("CLUSTER_PCT", defaults_levels.cluster_pct)?,
            cluster_atr: var_parsed("CLUSTER_ATR", defaults_levels.cluster_atr)?,
            min_touches: var_parsed("MIN_TOUCHES", defaults_levels.min_touches)?,
            strict: var_bool("STRICT_LEVELS", defaults_levels.strict)?,
            touch_atr: var_parsed("TOUCH_ATR", defaults_levels.touch_atr)?,
            wick_score_min: var_parsed("WICK_SCORE_MIN", defaults_levels.wick_score_min)?,
            momentum_look: var_parsed("MOMENTUM_LOOK", defaults_levels.momentum_look)?,
            momentum_ratio: var_parsed("MOMENTUM_RATIO", defaults_levels.momentum_ratio)?,
            max_levels: var_parsed("MAX_LEVELS", defaults_levels.max_levels)?,
        };
        if levels.atr_period == 0 {
            bail!("ATR_PERIOD must be at least 1");
        }
        if levels.pivot_span == 0 {
            bail!("PIVOT_SPAN must be at least 1");
        }

        let defaults_alerts = AlertParams::default();
        let alerts = AlertParams {
            max_distance_pct: var_parsed("MAX_DISTANCE_PCT", defaults_alerts.max_distance_pct)?,
            near_atr: var_parsed("NEAR_ATR", defaults_alerts.near_atr)?,
            sl_atr_factor: var_parsed("SL_ATR_FACTOR", defaults_alerts.sl_atr_factor)?,
            rr_ratio: var_parsed("RR_RATIO", defaults_alerts.rr_ratio)?,
            cooldown: Duration::from_secs(var_parsed("COOLDOWN_SEC", 180u64)?),
        };

        Ok(Self {
            deriv_app_id,
            deriv_token,
            telegram,
            symbols,
            timeframes,
            lookback_bars: var_parsed("LOOKBACK_BARS", 300usize)?,
            scan_interval: Duration::from_secs(var_parsed("SCAN_INTERVAL_SEC", 300u64)?),
            levels,
            alerts,
        })
    }
}

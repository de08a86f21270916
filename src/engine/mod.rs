pub mod cooldown;
pub mod scanner;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use log::{error, info, warn};

use crate::config::Settings;
use crate::data::MarketDataProvider;
use crate::models::CandleSeries;
use crate::notify::NotificationSink;

pub use {cooldown::CooldownRegistry, scanner::scan_series};

/// The long-running monitor: fetches candles for every configured
/// (symbol, timeframe) pair, scans them for level approaches, and pushes the
/// resulting alerts to the sink. One instance owns the cooldown state.
pub struct Sniper {
    settings: Settings,
    provider: Arc<dyn MarketDataProvider>,
    sink: Arc<dyn NotificationSink>,
    cooldowns: CooldownRegistry,
}

impl Sniper {
    pub fn new(
        settings: Settings,
        provider: Arc<dyn MarketDataProvider>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            settings,
            provider,
            sink,
            cooldowns: CooldownRegistry::new(),
        }
    }

    /// One pass over every pair. A failing pair is logged and skipped so a
    /// single bad symbol never starves the rest of the watchlist.
    pub async fn sweep(&mut self) -> usize {
        let mut fired = 0;
        for symbol in self.settings.symbols.clone() {
            for timeframe in self.settings.timeframes.clone() {
                let candles = match self
                    .provider
                    .fetch_candles(&symbol, timeframe, self.settings.lookback_bars)
                    .await
                {
                    Ok(candles) => candles,
                    Err(err) => {
                        warn!("{symbol} {timeframe}: fetch failed: {err}");
                        continue;
                    }
                };

                let series = CandleSeries::new(symbol.clone(), timeframe, candles);
                let events = scan_series(
                    &series,
                    &self.settings.levels,
                    &self.settings.alerts,
                    &mut self.cooldowns,
                    Instant::now(),
                );

                for event in events {
                    info!("{}", event.message().replace('\n', " | "));
                    if let Err(err) = self.sink.deliver(&event.message()).await {
                        error!("{symbol} {timeframe}: alert delivery failed: {err}");
                    }
                    fired += 1;
                }
            }
        }
        self.cooldowns
            .prune(self.settings.alerts.cooldown, Instant::now());
        fired
    }

    /// Scan loop. With `once` set, does a single sweep and returns; useful
    /// for cron-style runs and smoke tests. Otherwise sweeps every
    /// `scan_interval` until ctrl-c.
    pub async fn run(&mut self, once: bool) -> Result<()> {
        info!(
            "watching {} symbols x {} timeframes every {:?}",
            self.settings.symbols.len(),
            self.settings.timeframes.len(),
            self.settings.scan_interval
        );

        loop {
            let started = Instant::now();
            let fired = self.sweep().await;
            info!(
                "sweep done in {:.1}s, {} alert(s)",
                started.elapsed().as_secs_f64(),
                fired
            );

            if once {
                return Ok(());
            }

            tokio::select! {
                _ = tokio::time::sleep(self.settings.scan_interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupt received, shutting down");
                    return Ok(());
                }
            }
        }
    }
}

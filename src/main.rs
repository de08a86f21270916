use std::panic;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use level_sniper::{
    Cli, DerivProvider, LogSink, NotificationSink, Settings, Sniper, TelegramNotifier,
};

#[tokio::main]
async fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    dotenvy::dotenv().ok();

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Debug)
    } else {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    };

    env_logger::Builder::new()
        .filter(None, global_level)
        .filter(Some("level_sniper"), my_code_level)
        .parse_default_env()
        .init();

    let args = Cli::parse();
    let settings = Settings::from_env()?;

    let provider = Arc::new(DerivProvider::new(
        settings.deriv_app_id.clone(),
        settings.deriv_token.clone(),
    ));
    let sink: Arc<dyn NotificationSink> = match &settings.telegram {
        Some(tg) => Arc::new(TelegramNotifier::new(tg)),
        None => {
            log::warn!("No Telegram credentials; alerts will only be logged");
            Arc::new(LogSink)
        }
    };

    let mut sniper = Sniper::new(settings, provider, sink);
    sniper.run(args.once).await
}

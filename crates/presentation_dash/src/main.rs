//! Skylight terminal dashboard
//!
//! Polls the query service through the refresh coordinator and redraws the
//! dashboard whenever the connectivity signal changes. Degraded
//! connectivity shows a banner over the last committed data; it never
//! exits the program.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use application::{
    Freshness, RefreshCoordinator,
    ports::{BundleCachePort, QueryApiPort},
};
use chrono::{Local, Timelike, Utc};
use clap::Parser;
use domain::entities::ViewModel;
use infrastructure::{AppConfig, HttpQueryApi, JsonBundleCache};
use presentation_dash::{TemperatureUnit, Theme, render};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Skylight terminal dashboard
#[derive(Parser, Debug)]
#[command(name = "skylight-dash")]
#[command(author, version, about = "Terminal weather dashboard", long_about = None)]
struct Args {
    /// Query service base URL
    #[arg(long, env = "SKYLIGHT_API_URL", default_value = "http://127.0.0.1:3000")]
    api_url: String,

    /// Poll interval in seconds; 0 fetches once and exits (defaults to
    /// the `refresh.poll_secs` config value)
    #[arg(long)]
    poll_secs: Option<u64>,

    /// Temperature unit (celsius or fahrenheit)
    #[arg(long, default_value_t = TemperatureUnit::Celsius)]
    unit: TemperatureUnit,

    /// Durable view-model cache file
    #[arg(long, env = "SKYLIGHT_CACHE")]
    cache: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skylight_dash=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    let poll_secs = args.poll_secs.or(config.refresh.poll_secs).unwrap_or(0);
    let cache_path = args
        .cache
        .or_else(|| config.refresh.cache_path.as_deref().map(PathBuf::from));

    let api = HttpQueryApi::new(&args.api_url, Duration::from_secs(35))
        .map_err(|e| anyhow::anyhow!("Failed to build API client: {e}"))?;
    let cache = cache_path.map(|path| Arc::new(JsonBundleCache::new(path)) as Arc<dyn BundleCachePort>);

    let coordinator = Arc::new(RefreshCoordinator::new(
        Arc::new(api) as Arc<dyn QueryApiPort>,
        cache,
        config.refresh.schedule.clone(),
        config.refresh.plan,
    ));

    // Draw the cached view before touching the network.
    if coordinator.hydrate_from_cache() {
        info!("showing cached data while refreshing");
        draw(&coordinator.view(), Freshness::Unknown, args.unit);
    }

    if poll_secs == 0 {
        let outcome = coordinator.refresh().await;
        draw(&coordinator.view(), outcome.freshness, args.unit);
        return Ok(());
    }

    let mut status = coordinator.subscribe();
    coordinator.set_poll_interval(Some(Duration::from_secs(poll_secs)));

    loop {
        tokio::select! {
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let freshness = *status.borrow_and_update();
                draw(&coordinator.view(), freshness, args.unit);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Redraw the full dashboard
fn draw(view: &ViewModel, freshness: Freshness, unit: TemperatureUnit) {
    let now = Utc::now();
    let theme = Theme::for_hour(Local::now().hour());

    // ANSI clear; plain text everywhere else keeps the renderer testable.
    print!("\x1b[2J\x1b[H");
    for line in render::render_status(view, freshness) {
        println!("{line}");
    }
    println!();
    for line in render::render_current(view, unit) {
        println!("{line}");
    }
    println!();
    for line in render::render_hourly(view, unit, now) {
        println!("{line}");
    }
    println!();
    for line in render::render_daily(view, unit) {
        println!("{line}");
    }
    println!();
    println!("[{theme:?} theme, {unit}]");
}

//! Skylight HTTP server
//!
//! Main entry point for the query service.

use std::{sync::Arc, time::Duration};

use application::ports::{ForecastPort, ReadingStorePort};
use infrastructure::{AppConfig, ForecastAdapter, SqliteReadingStore, create_pool};
use integration_openmeteo::OpenMeteoConfig;
use presentation_http::{
    routes,
    state::{AppState, StationInfo},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skylight_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Skylight v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        place = %config.location.place,
        "Configuration loaded"
    );

    if config.location.coordinates().is_none() {
        anyhow::bail!(
            "Invalid station coordinates: {}, {}",
            config.location.latitude,
            config.location.longitude
        );
    }

    // Initialize the forecast provider adapter
    let forecast_adapter = ForecastAdapter::with_config(OpenMeteoConfig {
        base_url: config.provider.base_url.clone(),
        timeout_secs: config.provider.timeout_secs,
        latitude: config.location.latitude,
        longitude: config.location.longitude,
        tz: config.location.tz.clone(),
        user_agent: config.provider.user_agent.clone(),
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize forecast provider: {e}"))?;

    let forecast: Arc<dyn ForecastPort> = Arc::new(forecast_adapter);

    // Open the optional reading store
    let store: Option<Arc<dyn ReadingStorePort>> = if config.store.path.is_some() {
        let pool = create_pool(&config.store)
            .map_err(|e| anyhow::anyhow!("Failed to open reading store: {e}"))?;
        info!(path = ?config.store.path, "Reading store opened");
        Some(Arc::new(SqliteReadingStore::new(pool)))
    } else {
        info!("No reading store configured; logged-readings endpoints will answer 503");
        None
    };

    // Create app state
    let state = AppState {
        forecast,
        store,
        station: StationInfo {
            place: config.location.place.clone(),
            tz: config.location.tz.clone(),
        },
    };

    // Build router
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if !config.server.cors_enabled {
        CorsLayer::new()
    } else if config.server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production mode: restrict to configured origins
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET])
            .allow_headers(Any)
    };

    // Add middleware (order matters: first added = outermost)
    let app = app.layer(TraceLayer::new_for_http()).layer(cors_layer);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
    // The actual connection draining is handled by axum's graceful_shutdown
}

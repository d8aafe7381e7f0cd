//! PedalPoint Fleet service entry point
//!
//! Reads configuration from TOML (~/.config/pedalpoint-fleet/config.toml),
//! opens the database, starts the background tasks and serves the REST API.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use pedalpoint_fleet::application::services::{
    start_overdue_watch, AccrualMonitor, AccrualMonitorConfig, RentalService,
};
use pedalpoint_fleet::config::AppConfig;
use pedalpoint_fleet::domain::RepositoryProvider;
use pedalpoint_fleet::infrastructure::crypto::jwt::JwtConfig;
use pedalpoint_fleet::infrastructure::database::migrator::Migrator;
use pedalpoint_fleet::infrastructure::database::seed::{
    seed_demo_fleet, seed_notification_defaults,
};
use pedalpoint_fleet::shared::shutdown::ShutdownCoordinator;
use pedalpoint_fleet::shared::types::clock::SystemClock;
use pedalpoint_fleet::{
    create_api_router, default_config_path, init_database, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("FLEET_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load_or_init(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting PedalPoint Fleet service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("📊 Prometheus metrics recorder installed");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // Notification toggles always exist; the demo fleet only when asked for
    seed_notification_defaults(&*repos).await?;
    if app_cfg.database.seed_demo {
        seed_demo_fleet(&*repos).await?;
    }

    // ── Services ───────────────────────────────────────────────
    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "pedalpoint-fleet".to_string(),
    };
    info!(
        "JWT verification configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    let clock = Arc::new(SystemClock);
    let rental_service = Arc::new(RentalService::new(repos.clone()).with_clock(clock.clone()));

    let accrual_monitor = Arc::new(
        AccrualMonitor::new(repos.clone())
            .with_clock(clock.clone())
            .with_config(AccrualMonitorConfig {
                refresh_interval_secs: app_cfg.rental.accrual_refresh_secs,
            }),
    );

    // ── Shutdown & background tasks ────────────────────────────
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    accrual_monitor.start(shutdown_signal.clone());

    if let Some(max_rental_minutes) = app_cfg.rental.max_rental_minutes {
        start_overdue_watch(
            repos.clone(),
            clock.clone(),
            shutdown_signal.clone(),
            app_cfg.rental.overdue_check_secs,
            max_rental_minutes,
        );
    } else {
        info!("Overdue rental watch disabled (no max_rental_minutes configured)");
    }

    // ── REST API ───────────────────────────────────────────────
    let api_router = create_api_router(
        repos,
        rental_service,
        accrual_monitor,
        db.clone(),
        jwt_config,
        prometheus_handle,
    );

    let api_addr = app_cfg.api_address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
        api_shutdown.wait().await;
        info!("🛑 REST API server received shutdown signal");
    });

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");
    if let Err(e) = api_server.await {
        error!("REST API server error: {}", e);
    }

    // ── Final cleanup ──────────────────────────────────────────
    info!("🧹 Performing final cleanup...");
    let cleanup_window = std::time::Duration::from_secs(shutdown.timeout_secs());
    match tokio::time::timeout(cleanup_window, db.close()).await {
        Ok(Ok(())) => info!("✅ Database connection closed"),
        Ok(Err(e)) => warn!("Error closing database connection: {}", e),
        Err(_) => warn!("Database close timed out after {:?}", cleanup_window),
    }

    info!("👋 PedalPoint Fleet service shutdown complete");
    Ok(())
}

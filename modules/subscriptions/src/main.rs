use maintenance_gate::{spawn_refresher, HttpSource, MaintenanceStore};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use subscriptions_rs::{
    config::{Config, RepoType},
    db,
    repo::{InMemoryRepo, PgRepo, SubscriptionRepo},
    subscriptions_router, AppState, SubscriptionService, SystemClock,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    tracing::info!("Starting subscriptions service...");

    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        "Configuration loaded: repo_type={:?}, host={}, port={}, grace_period_days={}",
        config.repo_type,
        config.host,
        config.port,
        config.grace_period_days
    );

    let repo: Arc<dyn SubscriptionRepo> = match config.repo_type {
        RepoType::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .expect("DATABASE_URL required for postgres repository");

            let pool = db::init_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection established");

            db::run_migrations(&pool)
                .await
                .expect("Failed to run migrations");
            tracing::info!("Database migrations completed");

            Arc::new(PgRepo::new(pool))
        }
        RepoType::InMemory => {
            tracing::info!("Using in-memory subscription repository");
            Arc::new(InMemoryRepo::new())
        }
    };

    let maintenance = MaintenanceStore::new();
    match &config.maintenance_config_url {
        Some(url) => {
            tracing::info!("Polling maintenance config from {} every {}s", url, config.maintenance_refresh_secs);
            spawn_refresher(
                maintenance.clone(),
                Arc::new(HttpSource::new(url.clone())),
                Duration::from_secs(config.maintenance_refresh_secs),
            );
        }
        None => tracing::info!("No MAINTENANCE_CONFIG_URL set, maintenance gate stays open"),
    }

    let state = AppState {
        service: Arc::new(SubscriptionService::new(
            repo,
            maintenance,
            config.grace_period_days,
        )),
        clock: Arc::new(SystemClock),
    };

    let app = subscriptions_router(state).layer(
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    );

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Subscriptions service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}

//! Inventis Server - IT Asset Inventory
//!
//! REST API server tracking equipment lifecycle and assignments.

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventis_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::reconciler::ReconcileMode,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("inventis_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Inventis Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.audit.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Periodic reconciliation, when enabled
    spawn_reconciler_schedule(&state);

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run the reconciler on a fixed interval in the configured mode
fn spawn_reconciler_schedule(state: &AppState) {
    let cfg = state.config.reconciler.clone();
    if !cfg.enabled {
        return;
    }

    let mode: ReconcileMode = cfg
        .mode
        .parse()
        .expect("Invalid reconciler mode in configuration");
    let services = state.services.clone();

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(cfg.interval_minutes * 60));
        // First tick fires immediately; skip it so startup stays quiet
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match services
                .reconciler
                .run(mode, cfg.allow_downgrade_without_history)
                .await
            {
                Ok(report) => {
                    if !report.orphan_assigned_found.is_empty()
                        || !report.orphan_active_found.is_empty()
                    {
                        tracing::warn!(
                            orphan_assigned = report.orphan_assigned_found.len(),
                            orphan_active = report.orphan_active_found.len(),
                            "scheduled reconciliation found divergence"
                        );
                    }
                }
                Err(e) => tracing::error!("scheduled reconciliation failed: {}", e),
            }
        }
    });
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Equipment registry
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/equipment/:id", put(api::equipment::update_equipment))
        // Lifecycle transitions
        .route("/equipment/:id/transitions", post(api::transitions::request_transition))
        // Assignment projection
        .route("/equipment/:id/assignment", get(api::assignments::get_current_assignment))
        .route("/equipment/:id/history", get(api::assignments::get_history))
        // Reconciliation
        .route("/reconciliation", post(api::reconciliation::run_reconciliation))
        // Directory
        .route("/employees", get(api::directory::list_employees))
        .route("/locations", get(api::directory::list_locations))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

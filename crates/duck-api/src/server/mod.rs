//! Server setup and initialization
//!
//! Provides the application builder and the server runner, including the
//! lifecycle of the leaderboard scheduler.

use std::sync::Arc;

use axum::Router;
use duck_common::{AppConfig, AppError, JwtService};
use duck_db::{create_pool, run_migrations, DatabaseConfig, PgPool};
use duck_gateway::{GatewayState, LiveNotifier};
use duck_service::{LeaderboardScheduler, RankReconciler, SchedulerConfig, ServiceContextBuilder};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = apply_middleware(create_router(&state), state.config());
    router.merge(health_routes()).with_state(state)
}

/// Wire repositories, the live notifier and services on top of a pool
pub fn create_app_state(pool: PgPool, config: AppConfig) -> Result<AppState, AppError> {
    let notifier = LiveNotifier::new_shared();
    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret));

    let service_context = ServiceContextBuilder::new()
        .postgres(&pool)
        .publisher(notifier.clone())
        .jwt_service(jwt_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let gateway = GatewayState::new(notifier, &config.notifier);

    Ok(AppState::new(service_context, gateway, pool, config))
}

/// Build the leaderboard scheduler for an application state
pub fn create_scheduler(state: &AppState) -> LeaderboardScheduler {
    LeaderboardScheduler::new(
        RankReconciler::new(state.service_context().leaderboard_repo()),
        SchedulerConfig::from(&state.config().leaderboard),
    )
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
    info!("PostgreSQL connection established");

    let state = create_app_state(pool.clone(), config)?;

    let scheduler = create_scheduler(&state);
    scheduler.start();

    let result = run_server(create_app(state), &addr).await;

    // In-flight reconciliation is abandoned and rolled back
    scheduler.shutdown().await;
    pool.close().await;
    info!("Server stopped");

    result
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

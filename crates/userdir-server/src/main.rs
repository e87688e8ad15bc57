//! # Userdir Server
//!
//! Main entry point for the Userdir application: loads configuration,
//! connects to Postgres, runs migrations, and serves the REST API.

use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use userdir_core::{UserdirError, UserdirResult};
use userdir_repository::{create_pool, PgApiKeyRepository, PgUserRepository};
use userdir_rest::{create_router, AppState};
use userdir_service::{ApiKeyServiceImpl, UserServiceImpl};

#[tokio::main]
async fn main() {
    init_logging();

    info!("Starting Userdir Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> UserdirResult<()> {
    let config = userdir_config::ConfigLoader::from_default_location().load()?;

    let db_pool = create_pool(&config.database).await?;
    db_pool.run_migrations().await?;

    let user_repository = Arc::new(PgUserRepository::new(db_pool.clone()));
    let api_key_repository = Arc::new(PgApiKeyRepository::new(db_pool));

    let user_service = Arc::new(UserServiceImpl::new(user_repository));
    let api_key_service = Arc::new(ApiKeyServiceImpl::new(
        api_key_repository,
        config.auth.cache_ttl(),
    ));

    let app_state = AppState::new(user_service, api_key_service);
    let router = create_router(app_state, &config.server);

    let addr = config.server.addr();
    info!("Starting REST server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| UserdirError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| UserdirError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,userdir=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}

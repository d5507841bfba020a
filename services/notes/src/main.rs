use std::sync::Arc;

use anyhow::Result;
use auth::{AuthService, PasswordHasher, SqliteCredentialStore, TokenService};
use common::database::{health_check, init_pool, migrate};
use tokio::net::TcpListener;
use tracing::info;

use notes::{
    config::AppConfig,
    logging,
    repositories::SqliteNoteStore,
    routes::{create_router, with_http_layers},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // Initialize logging
    logging::init(&config.env)?;

    info!("Starting notes service");

    // Initialize database connection pool
    let pool = init_pool(&config.database).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    migrate(&pool).await?;

    let tokens = TokenService::new(&config.jwt)?;
    let hasher = PasswordHasher::new(&config.hasher)?;
    let users = Arc::new(SqliteCredentialStore::new(pool.clone()));
    let notes = Arc::new(SqliteNoteStore::new(pool));

    let app_state = AppState::new(AuthService::new(users, hasher, tokens), notes);

    info!("Notes service initialized successfully");

    // Start the web server
    let app = with_http_layers(create_router(app_state), &config.server);

    let listener = TcpListener::bind(&config.server.address).await?;
    info!("Notes service listening on {}", config.server.address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

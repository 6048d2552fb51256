//! DAVIVIENDA Quote Adapter - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! # In-memory application store, default profile
//! cargo run --bin davivienda-api
//!
//! # PostgreSQL store and a tuned profile
//! API_DATABASE_URL=postgres://... API_PROFILE__BASE_EA=0.21 cargo run --bin davivienda-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - trace, debug, info, warn, error (default: info); `RUST_LOG` wins
//! * `API_DATABASE_URL` - PostgreSQL connection string (default: in-memory store)
//! * `API_TIMEZONE` - IANA timezone for quote validity dates (default: America/Bogota)
//! * `API_PROFILE__<KEY>` - Pricing profile overrides, e.g. `API_PROFILE__W_DTI`

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::{Clock, SystemClock};
use domain_application::{ApplicationPort, InMemoryApplicationPort};
use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresApplicationAdapter};
use interface_api::{config::ApiConfig, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        timezone = %config.timezone,
        institution = %config.profile.institution_code,
        "Starting DAVIVIENDA quote adapter"
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.timezone));
    let registry = config
        .registry(clock)
        .context("Invalid institution profile")?;

    let applications = application_port(&config).await?;

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("Invalid server address")?;
    let app = create_router(AppState::new(config, registry, applications));

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Selects the application store: PostgreSQL when configured, otherwise memory
async fn application_port(config: &ApiConfig) -> anyhow::Result<Arc<dyn ApplicationPort>> {
    match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let pool = create_pool(DatabaseConfig::new(url))
                .await
                .context("Database connection failed")?;
            run_migrations(&pool).await.context("Database migration failed")?;
            tracing::info!("Database ready");
            Ok(Arc::new(PostgresApplicationAdapter::new(pool)))
        }
        None => {
            tracing::warn!("No database configured, applications are kept in memory");
            Ok(Arc::new(InMemoryApplicationPort::new()))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

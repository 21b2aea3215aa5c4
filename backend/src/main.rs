//! Dating API Backend
//!
//! User registration and login issuing signed session tokens.
//!
//! ## Architecture
//!
//! - Routes: HTTP request handling and routing
//! - Services: Credential verification
//! - Repositories: Data access
//! - Database: PostgreSQL with SQLx

use anyhow::Result;
use dating_api_backend::{auth::JwtService, config::AppConfig, db, routes, state::AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let production = AppConfig::is_production();
    init_tracing(production);

    let config = AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if production { "production" } else { "development" },
        "Starting Dating API Backend"
    );

    // Configuration faults stop the process before any connection is made
    let jwt = config
        .validate(production)
        .and_then(|_| JwtService::new(&config.jwt.secret))
        .map_err(|e| {
            error!("Configuration error: {:#}", e);
            e
        })?;

    let pool = db::connect(&config.database).await?;
    if !production {
        // Production runs migrations as a separate job
        db::run_migrations(&pool).await?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = routes::create_router(AppState::with_pool(pool, jwt));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Pretty logs in development, JSON in production; `RUST_LOG` overrides the filter
fn init_tracing(production: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if production {
            "dating_api_backend=info,tower_http=info".into()
        } else {
            "dating_api_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if production {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

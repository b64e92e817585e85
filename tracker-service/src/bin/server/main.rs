use std::sync::Arc;

use auth::Authenticator;
use auth::AuthenticatorSettings;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracker_service::config::Config;
use tracker_service::inbound::http::router::create_router;
use tracker_service::inbound::http::router::AppState;
use tracker_service::outbound::repositories::PostgresUserDirectory;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracker_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "tracker-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        issuer = %config.jwt.issuer,
        work_factor = config.password.work_factor,
        directory_timeout_ms = config.directory.timeout_ms,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let settings = AuthenticatorSettings::new(config.jwt.secret.as_bytes(), config.jwt.issuer.as_str())
        .with_access_token_ttl(chrono::Duration::hours(config.jwt.access_token_ttl_hours))
        .with_refresh_token_ttl(chrono::Duration::days(config.jwt.refresh_token_ttl_days))
        .with_work_factor(config.password.work_factor);
    let authenticator = Arc::new(Authenticator::new(settings)?);
    let user_directory = Arc::new(PostgresUserDirectory::new(pg_pool));

    let shutdown = CancellationToken::new();
    let state = AppState::new(
        user_directory,
        authenticator,
        config.directory.timeout(),
        shutdown.clone(),
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM, cancelling in-flight directory calls.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
    shutdown.cancel();
}

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marketrev_api::auth::identity::TrustedHeaderIdentity;
use marketrev_api::config::ServerConfig;
use marketrev_api::router::build_app_router;
use marketrev_api::state::AppState;
use marketrev_db::DbPool;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketrev_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        request_timeout_secs = config.request_timeout_secs,
        "Loaded server configuration",
    );

    let pool = connect_database(&config).await;

    let state = AppState {
        pool: pool.clone(),
        identity: Arc::new(TrustedHeaderIdentity),
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be an IP address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind review API listener");
    tracing::info!(%addr, "Review API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = shutdown_signal().await;
            tracing::info!(signal, "Shutdown requested, draining in-flight requests");
        })
        .await
        .expect("Server error");

    pool.close().await;
    tracing::info!("Database pool closed, exiting");
}

/// Open the pool, confirm the database answers, and bring the schema up to date.
async fn connect_database(config: &ServerConfig) -> DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = marketrev_db::create_pool(&database_url, config.db_max_connections)
        .await
        .expect("Failed to connect to database");
    marketrev_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    marketrev_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(
        max_connections = config.db_max_connections,
        "Database ready (pool open, migrations applied)",
    );
    pool
}

/// Resolve once SIGINT or (on Unix) SIGTERM arrives, naming the signal.
async fn shutdown_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.expect("Failed to install Ctrl-C handler");
                "SIGINT"
            }
            _ = sigterm.recv() => "SIGTERM",
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
        "SIGINT"
    }
}

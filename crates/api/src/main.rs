use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ticketing_api::config::ServerConfig;
use ticketing_api::router::build_app_router;
use ticketing_api::state::AppState;
use ticketing_api::storage::{ObjectStorage, PassthroughStorage, S3Storage};
use ticketing_api::tickets::{GatewayTicketApprover, TicketApprover};
use ticketing_cache::{CacheStore, FixedWindowLimiter, MemoryStore, RedisStore};
use ticketing_core::rate_limit::WINDOW;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "ticketing_api=debug,ticketing_cache=debug,tower_http=debug";

/// Timeout for calls to the ticket gateway.
const GATEWAY_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        environment = ?config.environment,
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = ticketing_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    ticketing_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    ticketing_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Backing services ---
    let cache = connect_cache(config.redis_url.as_deref()).await;
    let limiter = FixedWindowLimiter::new(Arc::clone(&cache), config.rate_limit_per_minute, WINDOW);
    let storage = object_storage(&config).await;
    let tickets = ticket_gateway(&config.ticket_gateway_url);

    // --- App state ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState {
        pool,
        config: Arc::new(config),
        cache,
        limiter,
        storage,
        tickets,
    };

    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Redis when `REDIS_URL` is set, otherwise a process-local store.
async fn connect_cache(redis_url: Option<&str>) -> Arc<dyn CacheStore> {
    let Some(url) = redis_url else {
        tracing::warn!("REDIS_URL not set, using process-local in-memory cache");
        return Arc::new(MemoryStore::new());
    };

    let store = RedisStore::connect(url)
        .await
        .expect("Failed to connect to Redis");
    store.ping().await.expect("Redis health check failed");
    tracing::info!("Redis connection established");
    Arc::new(store)
}

async fn object_storage(config: &ServerConfig) -> Arc<dyn ObjectStorage> {
    if config.is_test_mode() {
        tracing::info!("Test mode: uploads are not sent to object storage");
        return Arc::new(PassthroughStorage);
    }
    Arc::new(S3Storage::from_config(&config.storage).await)
}

fn ticket_gateway(base_url: &str) -> Arc<dyn TicketApprover> {
    let client = reqwest::Client::builder()
        .timeout(GATEWAY_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client");
    Arc::new(GatewayTicketApprover::new(client, base_url))
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

use cms_backend::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    menu::AccessEvaluator,
    repository::{PostgresRepository, RepositoryState},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Initializes Configuration, Logging, Database, the menu evaluator and the HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast on missing secrets).
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging. RUST_LOG wins; otherwise sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cms_backend=debug,tower_http=info,axum=trace".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // JSON lines for the log aggregator.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. Route-permission table, injected into the evaluator once.
    let routes = config
        .route_permissions()
        .unwrap_or_else(|e| panic!("FATAL: {e}"));
    tracing::info!(
        entries = routes.len(),
        source = config.route_permissions_path.as_deref().unwrap_or("built-in"),
        "route permission table loaded"
    );
    let evaluator = Arc::new(AccessEvaluator::new(routes));

    // 4. Database (Postgres).
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.db_url)
        .await
        .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");

    let repo = Arc::new(PostgresRepository::new(pool)) as RepositoryState;

    // 5. Router and Server Startup.
    let bind_addr = config.bind_addr.clone();
    let app = create_router(AppState {
        repo,
        evaluator,
        config,
    });

    let listener = TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("FATAL: cannot bind {bind_addr}: {e}"));

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
    }
}
